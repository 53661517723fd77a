use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered digits 0-9, the unit the encoder and decoder exchange.
pub type DigitSequence = Vec<u8>;

/// Joins digit values with `separator`, e.g. `[3, 1, 4]` -> `"3,1,4"`.
pub fn join_digits(digits: &[u8], separator: &str) -> String {
    digits
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// One element of a tokenized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MnemonicToken {
    /// Consonant run encoding a single digit, e.g. `kk` -> 7.
    Phoneme { text: String, digit: u8 },
    /// Vowels, silent letters or whitespace; carries no digit.
    Filler { text: String },
}

impl MnemonicToken {
    pub fn digit(&self) -> Option<u8> {
        match self {
            MnemonicToken::Phoneme { digit, .. } => Some(*digit),
            MnemonicToken::Filler { .. } => None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            MnemonicToken::Phoneme { text, .. } | MnemonicToken::Filler { text } => text,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, MnemonicToken::Filler { text } if text.chars().all(char::is_whitespace))
    }
}

impl fmt::Display for MnemonicToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MnemonicToken::Phoneme { text, digit } => write!(f, "{}({})", text, digit),
            MnemonicToken::Filler { .. } if self.is_whitespace() => f.write_str("[space]"),
            MnemonicToken::Filler { text } => write!(f, "[{}]", text),
        }
    }
}

/// Candidate words found for one contiguous chunk of the input digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitsWords {
    digits: DigitSequence,
    candidates: Vec<String>,
}

impl DigitsWords {
    pub fn new(digits: DigitSequence, candidates: Vec<String>) -> Self {
        Self { digits, candidates }
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn first_candidate(&self) -> Option<&str> {
        self.candidates.first().map(String::as_str)
    }

    pub fn digits_as_string(&self) -> String {
        join_digits(&self.digits, ",")
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl fmt::Display for DigitsWords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Candidates={}",
            self.digits_as_string(),
            self.candidates.len()
        )
    }
}

/// Read-only word collection, kept both as entries and as one newline-joined blob.
#[derive(Debug, Clone)]
pub struct Dictionary {
    name: String,
    words: Vec<String>,
    text: String,
}

impl Dictionary {
    pub fn from_words<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        // Entries are lines of the blob, so they must not contain line breaks.
        let words: Vec<String> = words
            .into_iter()
            .flat_map(|w| {
                w.as_ref()
                    .lines()
                    .map(|line| line.trim_end_matches('\r').trim().to_string())
                    .collect::<Vec<_>>()
            })
            .filter(|w| !w.is_empty())
            .collect();
        let text = words.join("\n");

        Self {
            name: name.into(),
            words,
            text,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Outcome of one dictionary search over a digit sequence.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub dictionary: String,
    pub digits: DigitSequence,
    pub groups: Vec<DigitsWords>,
    pub digits_processed: usize,
}

impl SearchResult {
    pub fn is_complete(&self) -> bool {
        self.digits_processed == self.digits.len()
    }

    /// Digits left unconverted when no word matched at the stop position.
    pub fn remainder(&self) -> &[u8] {
        &self.digits[self.digits_processed..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_rendering() {
        let phoneme = MnemonicToken::Phoneme {
            text: "kk".to_string(),
            digit: 7,
        };
        let vowel = MnemonicToken::Filler {
            text: "ø".to_string(),
        };
        let space = MnemonicToken::Filler {
            text: " ".to_string(),
        };

        assert_eq!(phoneme.to_string(), "kk(7)");
        assert_eq!(vowel.to_string(), "[ø]");
        assert_eq!(space.to_string(), "[space]");
        assert_eq!(phoneme.digit(), Some(7));
        assert_eq!(space.digit(), None);
    }

    #[test]
    fn test_digits_words_accessors() {
        let group = DigitsWords::new(vec![6, 7, 2, 1], vec!["kjøkkenet".to_string()]);
        assert_eq!(group.digits_as_string(), "6,7,2,1");
        assert_eq!(group.first_candidate(), Some("kjøkkenet"));
        assert_eq!(group.len(), 4);
        assert_eq!(group.to_string(), "[6,7,2,1] Candidates=1");
    }

    #[test]
    fn test_dictionary_drops_blank_entries_and_carriage_returns() {
        let dictionary = Dictionary::from_words("test", ["motor\r", "", "  ", "hotell", "a\nb"]);
        assert_eq!(dictionary.words(), &["motor", "hotell", "a", "b"]);
        assert_eq!(dictionary.text(), "motor\nhotell\na\nb");
        assert_eq!(dictionary.len(), 4);
    }

    #[test]
    fn test_search_result_remainder() {
        let result = SearchResult {
            dictionary: "test".to_string(),
            digits: vec![3, 1, 4, 1],
            groups: vec![DigitsWords::new(vec![3, 1], vec!["mat".to_string()])],
            digits_processed: 2,
        };
        assert!(!result.is_complete());
        assert_eq!(result.remainder(), &[4, 1]);
    }
}
