use crate::domain::model::{join_digits, DigitsWords, SearchResult};
use crate::utils::error::{MnemonicError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

const WORDS_PER_LINE: usize = 4;
const TABLE_INDENT: &str = "    ";

/// Result file name for a dictionary, e.g. `words_nsf2023.csv`.
pub fn output_file_name(dictionary_stem: &str, extension: &str) -> String {
    format!("words_{}.{}", dictionary_stem, extension)
}

/// First record: the input digits. Then one record per group: its digits
/// followed by every candidate. All fields are quoted.
pub fn write_csv(digits: &[u8], groups: &[DigitsWords]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record([join_digits(digits, ",")])?;
    for group in groups {
        let mut record = vec![group.digits_as_string()];
        record.extend(group.candidates().iter().cloned());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| MnemonicError::IoError(e.into_error()))
}

#[derive(Debug, Serialize)]
struct GroupDocument<'a> {
    digits: &'a [u8],
    candidates: &'a [String],
}

#[derive(Debug, Serialize)]
struct ResultDocument<'a> {
    dictionary: &'a str,
    digits: &'a [u8],
    digits_processed: usize,
    complete: bool,
    verified: bool,
    generated_at: DateTime<Utc>,
    groups: Vec<GroupDocument<'a>>,
}

pub fn write_json(
    result: &SearchResult,
    verified: bool,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>> {
    let document = ResultDocument {
        dictionary: &result.dictionary,
        digits: &result.digits,
        digits_processed: result.digits_processed,
        complete: result.is_complete(),
        verified,
        generated_at,
        groups: result
            .groups
            .iter()
            .map(|g| GroupDocument {
                digits: g.digits(),
                candidates: g.candidates(),
            })
            .collect(),
    };

    Ok(serde_json::to_vec_pretty(&document)?)
}

/// Console listing of one group's candidates, four per line, each padded to
/// the widest candidate.
pub fn format_word_table(candidates: &[String]) -> String {
    let width = candidates
        .iter()
        .map(|w| w.chars().count())
        .max()
        .unwrap_or(0);

    candidates
        .chunks(WORDS_PER_LINE)
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|w| format!("{:<width$}  ", w, width = width))
                .collect();
            format!("{}{}", TABLE_INDENT, cells.trim_end())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
