//! Digits -> word matcher.
//!
//! For a digit sequence the compiler builds one anchored, multi-line,
//! case-insensitive regular expression that accepts a dictionary line when
//! its consonant skeleton spells exactly those digits:
//!
//! ```text
//! 3,1,4  =>  ^[fill]*(?:m)(?:m)?[fill]*(?:t|d)(?:t|d)?[fill]*(?:r)(?:r)?[fill]*$
//! 1,1    =>  ^[fill]*(?:t|d)(?:t|d)?[fill]+(?:t|d)(?:t|d)?[fill]*$
//! ```
//!
//! Equal neighbours need at least one filler character between them, which
//! mirrors the tokenizer's merge rule. A regular expression cannot express
//! the tokenizer's cluster rule (`s` + `kj` reads as `skj`, `k` + `j` reads
//! as `kj`), so every line the expression accepts is re-tokenized and kept
//! only when its digits agree.
//!
//! A digit spelling may repeat at most once (`tt`, `kg`). Three or more
//! same-digit letters in a row, as in the compound `bakkgrunn`, tokenize to
//! one digit but are never matched.

use crate::core::phoneme::{Digit, SILENT_LETTERS, VOWELS};
use crate::core::tokenizer::parse_digits;
use crate::domain::model::{join_digits, DigitSequence};
use crate::utils::error::Result;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::Arc;

/// Compiled "words spelling these digits" matcher.
#[derive(Debug)]
pub struct Matcher {
    digits: DigitSequence,
    regex: Regex,
}

impl Matcher {
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the single entry `word` spells the digits.
    pub fn is_match(&self, word: &str) -> bool {
        !word.contains('\n') && self.regex.is_match(word) && self.confirms(word)
    }

    /// Every line of `text` that spells the digits, in order of appearance.
    pub fn find_in<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.regex
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(move |line| self.confirms(line))
    }

    fn confirms(&self, word: &str) -> bool {
        parse_digits(word) == self.digits
    }
}

/// Builds matchers and keeps them for the lifetime of the compiler.
#[derive(Debug, Default)]
pub struct PatternCompiler {
    cache: HashMap<String, Arc<Matcher>>,
}

impl PatternCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the matcher for `digits`, compiling it on first use.
    pub fn compile(&mut self, digits: &[u8]) -> Result<Arc<Matcher>> {
        let key = join_digits(digits, ",");
        if let Some(matcher) = self.cache.get(&key) {
            return Ok(Arc::clone(matcher));
        }

        let validated = digits
            .iter()
            .map(|&d| Digit::try_from(d))
            .collect::<Result<Vec<_>>>()?;
        let pattern = build_pattern(&validated);
        tracing::trace!("Compiled pattern for [{}]: {}", key, pattern);

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()?;
        let matcher = Arc::new(Matcher {
            digits: digits.to_vec(),
            regex,
        });
        self.cache.insert(key, Arc::clone(&matcher));
        Ok(matcher)
    }

    pub fn cached_patterns(&self) -> usize {
        self.cache.len()
    }
}

fn filler_class() -> String {
    // Any whitespace but newline: a match must never run into the next line.
    format!("[{}{}[^\\S\\n]]", VOWELS, SILENT_LETTERS)
}

/// One spelling of the digit, optionally doubled.
fn digit_unit(digit: Digit) -> String {
    let alternatives = digit
        .phonemes()
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    format!("(?:{alt})(?:{alt})?", alt = alternatives)
}

fn build_pattern(digits: &[Digit]) -> String {
    let filler = filler_class();
    let mut pattern = String::from("^");
    pattern.push_str(&filler);
    pattern.push('*');

    for (i, &digit) in digits.iter().enumerate() {
        pattern.push_str(&digit_unit(digit));
        pattern.push_str(&filler);
        match digits.get(i + 1) {
            Some(&next) if next == digit => pattern.push('+'),
            _ => pattern.push('*'),
        }
    }

    pattern.push('$');
    pattern
}
