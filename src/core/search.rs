//! Chunked dictionary search with backoff.
//!
//! The digits are consumed greedily: from the cursor, take up to
//! `max_chunk` digits and look for dictionary words spelling them. When
//! nothing matches, drop the last digit and try again. An accepted chunk is
//! never revisited, and an empty chunk ends the search with a partial result.

use crate::core::pattern::PatternCompiler;
use crate::domain::model::{join_digits, Dictionary, DigitsWords, SearchResult};
use crate::utils::error::Result;
use std::collections::HashSet;

pub const DEFAULT_MAX_CHUNK: usize = 16;

#[derive(Debug)]
pub struct WordFinder {
    compiler: PatternCompiler,
    max_chunk: usize,
    deduplicate: bool,
}

impl Default for WordFinder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK)
    }
}

impl WordFinder {
    /// `max_chunk` below 1 is treated as 1.
    pub fn new(max_chunk: usize) -> Self {
        Self {
            compiler: PatternCompiler::new(),
            max_chunk: max_chunk.max(1),
            deduplicate: true,
        }
    }

    /// Keep repeated dictionary entries as separate candidates.
    pub fn keep_duplicates(mut self) -> Self {
        self.deduplicate = false;
        self
    }

    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    pub fn max_chunk(&self) -> usize {
        self.max_chunk
    }

    pub fn compiler(&self) -> &PatternCompiler {
        &self.compiler
    }

    pub fn find_words(&mut self, dictionary: &Dictionary, digits: &[u8]) -> Result<SearchResult> {
        let mut groups = Vec::new();
        let mut cursor = 0;

        while cursor < digits.len() {
            let end = (cursor + self.max_chunk).min(digits.len());
            match self.lookup(dictionary, &digits[cursor..end])? {
                Some(group) => {
                    cursor += group.len();
                    groups.push(group);
                }
                None => {
                    tracing::warn!(
                        "No words in {} for the digits starting at position {}: [{}]",
                        dictionary.name(),
                        cursor,
                        join_digits(&digits[cursor..], ",")
                    );
                    break;
                }
            }
        }

        Ok(SearchResult {
            dictionary: dictionary.name().to_string(),
            digits: digits.to_vec(),
            groups,
            digits_processed: cursor,
        })
    }

    /// Longest prefix of `chunk` with at least one matching word.
    fn lookup(&mut self, dictionary: &Dictionary, chunk: &[u8]) -> Result<Option<DigitsWords>> {
        let mut chunk = chunk;

        while !chunk.is_empty() {
            tracing::debug!("Searching for {}", join_digits(chunk, ","));
            let matcher = self.compiler.compile(chunk)?;
            let candidates = self.collect_candidates(matcher.find_in(dictionary.text()));

            if !candidates.is_empty() {
                tracing::info!(
                    "Found digits {}: {} candidate(s)",
                    join_digits(chunk, ","),
                    candidates.len()
                );
                return Ok(Some(DigitsWords::new(chunk.to_vec(), candidates)));
            }

            chunk = &chunk[..chunk.len() - 1];
        }

        Ok(None)
    }

    fn collect_candidates<'t>(&self, words: impl Iterator<Item = &'t str>) -> Vec<String> {
        if !self.deduplicate {
            return words.map(str::to_string).collect();
        }

        let mut seen = HashSet::new();
        words
            .filter(|w| seen.insert(w.to_lowercase()))
            .map(str::to_string)
            .collect()
    }
}
