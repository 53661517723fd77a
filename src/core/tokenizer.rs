//! Text -> digits.
//!
//! The scanner walks lower-cased text left to right. At each position it
//! tries the phoneme table (multi-letter clusters first), then a run of
//! filler letters, then a run of whitespace. Anything else is skipped
//! without producing a token.
//!
//! Two phonemes of the same digit with no filler token between them are one
//! encoded digit (`kk`, `tt`, `td`); a vowel or space between them makes two.

use crate::core::phoneme::{is_filler, match_phoneme};
use crate::domain::model::{DigitSequence, MnemonicToken};

pub fn tokenize(text: &str) -> Vec<MnemonicToken> {
    let lowered = text.to_lowercase();
    let mut tokens: Vec<MnemonicToken> = Vec::new();
    let mut rest = lowered.as_str();

    while let Some(c) = rest.chars().next() {
        if let Some((phoneme, digit)) = match_phoneme(rest) {
            let digit = digit.value();
            match tokens.last_mut() {
                Some(MnemonicToken::Phoneme {
                    text,
                    digit: previous,
                }) if *previous == digit => text.push_str(phoneme),
                _ => tokens.push(MnemonicToken::Phoneme {
                    text: phoneme.to_string(),
                    digit,
                }),
            }
            rest = &rest[phoneme.len()..];
            continue;
        }

        let run_len = if is_filler(c) {
            span_len(rest, is_filler)
        } else if c.is_whitespace() {
            span_len(rest, char::is_whitespace)
        } else {
            rest = &rest[c.len_utf8()..];
            continue;
        };

        tokens.push(MnemonicToken::Filler {
            text: rest[..run_len].to_string(),
        });
        rest = &rest[run_len..];
    }

    tokens
}

/// Byte length of the leading run of characters accepted by `accept`.
fn span_len(text: &str, accept: impl Fn(char) -> bool) -> usize {
    text.char_indices()
        .find(|&(_, c)| !accept(c))
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// The digits encoded by `text`.
pub fn parse_digits(text: &str) -> DigitSequence {
    tokenize(text)
        .iter()
        .filter_map(MnemonicToken::digit)
        .collect()
}

/// Annotated breakdown, e.g. `"m(3) [o] t(1) [o] r(4)"`.
pub fn to_mnemonic(text: &str) -> String {
    tokenize(text)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(parse_digits("").is_empty());
        assert_eq!(to_mnemonic(""), "");
    }

    #[test]
    fn test_doubled_consonant_merges() {
        let tokens = tokenize("kjøtt");
        assert_eq!(
            tokens,
            vec![
                MnemonicToken::Phoneme {
                    text: "kj".to_string(),
                    digit: 6
                },
                MnemonicToken::Filler {
                    text: "ø".to_string()
                },
                MnemonicToken::Phoneme {
                    text: "tt".to_string(),
                    digit: 1
                },
            ]
        );
    }

    #[test]
    fn test_mixed_spellings_of_one_digit_merge() {
        assert_eq!(parse_digits("utdanning"), vec![1, 2, 2, 7]);
        assert_eq!(to_mnemonic("utdanning"), "[u] td(1) [a] nn(2) [i] n(2) g(7)");
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        // 'q', 'x', digits and punctuation produce no tokens and do not separate
        assert_eq!(parse_digits("t-t"), vec![1]);
        assert_eq!(parse_digits("x9q!"), Vec::<u8>::new());
        assert_eq!(to_mnemonic("mat!"), "m(3) [a] t(1)");
    }

    #[test]
    fn test_uppercase_input() {
        assert_eq!(parse_digits("SKJERM"), vec![6, 4, 3]);
        assert_eq!(to_mnemonic("Sjø"), "sj(6) [ø]");
    }

    #[test]
    fn test_whitespace_and_vowels_form_separate_fillers() {
        assert_eq!(to_mnemonic("penkjole  omveier"), "p(9) [e] n(2) kj(6) [o] l(5) [e] [space] [o] m(3) v(8) [eie] r(4)");
    }

    #[test]
    fn test_every_digit_in_range() {
        let text = "Det var en gang en skjeggete tjukkas som kjøpte sjokolade, 42 biter!";
        assert!(parse_digits(text).iter().all(|&d| d <= 9));
    }

    #[test]
    fn test_phoneme_tokens_match_digits() {
        let text = "motorhotell penkjole";
        let tokens = tokenize(text);
        let digits = parse_digits(text);
        let phoneme_digits: Vec<u8> = tokens.iter().filter_map(MnemonicToken::digit).collect();
        assert_eq!(phoneme_digits, digits);
        assert_eq!(
            tokens.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "),
            to_mnemonic(text)
        );
    }
}
