use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// On-disk layout of a dictionary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionaryFormat {
    /// One word per line.
    WordList,
    /// CSV `Place,Frequency,Percentage,Cumulated,Word` with a header row.
    Ord10k,
    /// `frequency word` per line.
    Ord10000,
    /// `word frequency` per line.
    Wiktionary,
    /// Norsk ordbank full-form list, `word ... class` per line.
    Nsf2012,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Latin1,
}

/// Word classes of the NSF 2012 list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordClass {
    Noun,
    Adjective,
    Pronoun,
    Verb,
    Adverb,
    Preposition,
    Conjunction,
    Interjection,
    Subjunction,
    Article,
    Determinative,
}

/// How an NSF class tag is treated by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassTag {
    Collected(WordClass),
    /// Known tag whose words are skipped.
    Ignored,
    Unknown,
}

impl WordClass {
    pub fn parse_tag(tag: &str) -> ClassTag {
        let class = match tag {
            "subst" => WordClass::Noun,
            "adj" | "adjektiv" => WordClass::Adjective,
            "pron" => WordClass::Pronoun,
            "verb" => WordClass::Verb,
            "adv" => WordClass::Adverb,
            "prep" => WordClass::Preposition,
            "konj" => WordClass::Conjunction,
            "interj" => WordClass::Interjection,
            "sbu" => WordClass::Subjunction,
            "art" => WordClass::Article,
            "det" => WordClass::Determinative,
            "verbalsubst" | "numeral" | "nominal" | "musikkuttr" | "CLB" => {
                return ClassTag::Ignored
            }
            _ => return ClassTag::Unknown,
        };
        ClassTag::Collected(class)
    }
}

/// A registered dictionary: where it lives and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionarySpec {
    pub name: String,
    /// Path relative to the dictionary directory.
    pub path: PathBuf,
    pub format: DictionaryFormat,
    #[serde(default)]
    pub encoding: TextEncoding,
    #[serde(default)]
    pub ignore_single_letter_words: bool,
    /// Only used by [`DictionaryFormat::Nsf2012`]; defaults to nouns.
    #[serde(default)]
    pub word_class: Option<WordClass>,
}

impl DictionarySpec {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        format: DictionaryFormat,
        encoding: TextEncoding,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            format,
            encoding,
            ignore_single_letter_words: false,
            word_class: None,
        }
    }

    /// File name without extension, used to name result files.
    pub fn file_stem(&self) -> String {
        Path::new(&self.path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
