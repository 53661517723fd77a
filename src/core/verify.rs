use crate::core::tokenizer::{parse_digits, to_mnemonic};
use crate::domain::model::{DigitSequence, DigitsWords};
use std::fmt;

const COLUMN_WIDTH: usize = 3;

/// Re-encoding of the chosen words compared with the digits they should spell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    expected: DigitSequence,
    found: DigitSequence,
    sentence: String,
}

impl Verification {
    pub fn expected(&self) -> &[u8] {
        &self.expected
    }

    pub fn found(&self) -> &[u8] {
        &self.found
    }

    /// First candidate of every group, space separated.
    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn is_match(&self) -> bool {
        self.expected == self.found
    }

    /// Indices where the sequences differ, including the tail of the longer one.
    pub fn mismatch_positions(&self) -> Vec<usize> {
        let longest = self.expected.len().max(self.found.len());
        (0..longest)
            .filter(|&i| self.expected.get(i) != self.found.get(i))
            .collect()
    }

    pub fn mnemonic(&self) -> String {
        to_mnemonic(&self.sentence)
    }

    /// Position-aligned diff, empty when the sequences agree.
    pub fn report(&self) -> String {
        if self.is_match() {
            return String::new();
        }

        let longest = self.expected.len().max(self.found.len());
        let mismatches = self.mismatch_positions();
        let markers = (0..longest).map(|i| if mismatches.contains(&i) { "^" } else { " " });

        [
            "Failed - Sequences not identical".to_string(),
            format!("Position: {}", columns(0..longest)),
            format!("Expected: {}", columns(self.expected.iter())),
            format!("Found   : {}", columns(self.found.iter())),
            format!("Diff    : {}", columns(markers)),
            format!("Word    : {}", self.sentence),
            format!("Mnemonic: {}", self.mnemonic()),
        ]
        .join("\n")
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_match() {
            write!(f, "OK - {}", self.sentence)
        } else {
            f.write_str(&self.report())
        }
    }
}

fn columns<T: fmt::Display>(values: impl Iterator<Item = T>) -> String {
    values
        .map(|v| format!("{:>width$}", v.to_string(), width = COLUMN_WIDTH))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn verify(expected: &[u8], groups: &[DigitsWords]) -> Verification {
    let sentence = groups
        .iter()
        .filter_map(DigitsWords::first_candidate)
        .collect::<Vec<_>>()
        .join(" ");
    let found = parse_digits(&sentence);

    if found != expected {
        tracing::debug!("Verification failed for '{}'", sentence);
    }

    Verification {
        expected: expected.to_vec(),
        found,
        sentence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(digits: &[u8], word: &str) -> DigitsWords {
        DigitsWords::new(digits.to_vec(), vec![word.to_string()])
    }

    #[test]
    fn test_mismatch_report() {
        let verification = verify(&[6, 7, 2, 2, 1], &[group(&[6, 7, 2, 1], "kjøkkenet")]);

        assert!(!verification.is_match());
        assert_eq!(verification.mismatch_positions(), vec![3, 4]);

        let report = verification.report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Failed - Sequences not identical");
        assert_eq!(lines[1], "Position:   0   1   2   3   4");
        assert_eq!(lines[2], "Expected:   6   7   2   2   1");
        assert_eq!(lines[3], "Found   :   6   7   2   1");
        assert_eq!(lines[4], "Diff    :               ^   ^");
        assert_eq!(lines[5], "Word    : kjøkkenet");
        assert_eq!(lines[6], "Mnemonic: kj(6) [ø] kk(7) [e] n(2) [e] t(1)");
    }

    #[test]
    fn test_space_separated_candidate_matches() {
        let verification = verify(&[6, 4, 3, 3, 0], &[group(&[6, 4, 3, 3, 0], "skjerm mus")]);
        assert!(verification.is_match());
        assert!(verification.report().is_empty());
        assert_eq!(verification.to_string(), "OK - skjerm mus");
    }

    #[test]
    fn test_groups_are_joined_with_spaces() {
        // The space keeps the final t of "mat" and the t of "tur" apart
        let groups = [group(&[3, 1], "mat"), group(&[1, 4], "tur")];
        let verification = verify(&[3, 1, 1, 4], &groups);
        assert_eq!(verification.sentence(), "mat tur");
        assert!(verification.is_match());
    }

    #[test]
    fn test_found_longer_than_expected() {
        let verification = verify(&[3, 1], &[group(&[3, 1, 4], "motor")]);
        assert_eq!(verification.mismatch_positions(), vec![2]);
        assert!(verification.report().contains("Expected:   3   1\n"));
    }

    #[test]
    fn test_empty_groups_verify_empty_digits() {
        assert!(verify(&[], &[]).is_match());
        assert!(!verify(&[1], &[]).is_match());
    }
}
