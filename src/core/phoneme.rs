//! The Norwegian digit/phoneme table.
//!
//! Every digit owns a fixed set of consonant spellings. The 6-class
//! clusters (`skj`, `sj`, `tj`, `kj`) are the only multi-letter entries and
//! are always tried before the single letters that start them.

use crate::domain::model::DigitSequence;
use crate::utils::error::{MnemonicError, Result};
use std::fmt;

/// Vowels, which carry no digit.
pub const VOWELS: &str = "aeiouyæøå";

/// Letters outside the phoneme table that behave like vowels.
pub const SILENT_LETTERS: &str = "hjwc";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Digit {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
}

impl Digit {
    pub const ALL: [Digit; 10] = [
        Digit::Zero,
        Digit::One,
        Digit::Two,
        Digit::Three,
        Digit::Four,
        Digit::Five,
        Digit::Six,
        Digit::Seven,
        Digit::Eight,
        Digit::Nine,
    ];

    pub fn value(self) -> u8 {
        match self {
            Digit::Zero => 0,
            Digit::One => 1,
            Digit::Two => 2,
            Digit::Three => 3,
            Digit::Four => 4,
            Digit::Five => 5,
            Digit::Six => 6,
            Digit::Seven => 7,
            Digit::Eight => 8,
            Digit::Nine => 9,
        }
    }

    /// Lowercase spellings of this digit, longest first.
    pub fn phonemes(self) -> &'static [&'static str] {
        match self {
            Digit::Zero => &["s", "z"],
            Digit::One => &["t", "d"],
            Digit::Two => &["n"],
            Digit::Three => &["m"],
            Digit::Four => &["r"],
            Digit::Five => &["l"],
            Digit::Six => &["skj", "sj", "tj", "kj"],
            Digit::Seven => &["k", "g"],
            Digit::Eight => &["f", "v"],
            Digit::Nine => &["p", "b"],
        }
    }

    /// Memory hook for the Norwegian rule table.
    pub fn hint(self) -> &'static str {
        match self {
            Digit::Zero => "S som i 'Sirkel', eller '0' på engelsk 'ZERO'",
            Digit::One => "t og d har én nedstrek",
            Digit::Two => "n har to nedstreker",
            Digit::Three => "m har tre nedstreker",
            Digit::Four => "tenk på 'fiRe', eller 'R som i rein, fire bein'",
            Digit::Five => "Romertallet 'L' er 50",
            Digit::Six => "'Sjø', 'Skje', 'Kjede', 'Tjue'. J har en kurve nederst slik som 6 har",
            Digit::Seven => "'K' inneholder to '7'-tall",
            Digit::Eight => "V som i V8. F lyder som V når den uttales, og 'F' ligner på '8'",
            Digit::Nine => "9 rotert 180 grader ser ut som b, speilvendt ser den ut som P",
        }
    }
}

impl TryFrom<u8> for Digit {
    type Error = MnemonicError;

    fn try_from(value: u8) -> Result<Self> {
        Digit::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(MnemonicError::InvalidDigit { value })
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// True for vowels and silent letters (not whitespace).
pub fn is_filler(c: char) -> bool {
    VOWELS.contains(c) || SILENT_LETTERS.contains(c)
}

/// Longest phoneme at the start of `text`, with its digit.
pub fn match_phoneme(text: &str) -> Option<(&'static str, Digit)> {
    let multi_letter = Digit::ALL.iter().flat_map(|&digit| {
        digit
            .phonemes()
            .iter()
            .filter(|p| p.len() > 1)
            .map(move |&p| (p, digit))
    });
    let single_letter = Digit::ALL.iter().flat_map(|&digit| {
        digit
            .phonemes()
            .iter()
            .filter(|p| p.len() == 1)
            .map(move |&p| (p, digit))
    });

    multi_letter
        .chain(single_letter)
        .find(|(phoneme, _)| text.starts_with(phoneme))
}

/// Parses a plain digit string such as `"314159"`.
pub fn parse_digit_string(input: &str) -> Result<DigitSequence> {
    input
        .trim()
        .chars()
        .enumerate()
        .map(|(position, c)| {
            c.to_digit(10)
                .map(|d| d as u8)
                .ok_or_else(|| MnemonicError::InvalidDigitString {
                    input: input.to_string(),
                    position,
                })
        })
        .collect()
}

/// The rule tables shown by `--rules`.
pub fn rules() -> String {
    let mut text = String::new();
    text.push_str(
        "The Mnemonic major system is a memory technique that converts numbers into consonant sounds,\n\
         which can then be combined with vowels to create words. This makes it easier to remember long\n\
         sequences of numbers by converting them into more memorable words or phrases.\n\n",
    );

    text.push_str("Original System:\n\n");
    for (digit, letters, hint) in [
        (0, "S, Z", "Zero begins with Z. Other letters sound similar when spoken."),
        (1, "T, D", "t and d each have one downstroke, and sound similar when voiced."),
        (2, "N", "n has two downstrokes when written."),
        (3, "M", "m has three downstrokes when written."),
        (4, "R", "Last letter of 'fouR'"),
        (5, "L", "Roman numeral 'L' = 50"),
        (6, "CH, J, SH", "j has a curve near the bottom, like 6 does"),
        (7, "K, G", "'K' contains two '7's"),
        (8, "F, V", "'F' looks like '8', and V sounds like F when spoken"),
        (9, "P, B", "9 rotated 180 degrees looks like b. 9 flipped horizontally looks like P."),
    ] {
        text.push_str(&format!("{} = {:<12}{}\n", digit, letters, hint));
    }

    text.push_str("\nNorwegian Adaptation:\n\n");
    for digit in Digit::ALL {
        let letters = digit
            .phonemes()
            .iter()
            .map(|p| p.to_uppercase())
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&format!("{} = {:<15}{}\n", digit, letters, digit.hint()));
    }

    text.push_str(
        "\nNote: Vowels (A, E, I, O, U, Y, Æ, Ø, Å) and the letters H, J, W and C are ignored.\n\
         A doubled consonant counts once; a vowel or space between two equal consonants makes them count twice.\n",
    );
    text
}
