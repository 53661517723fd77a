//! Dictionary file readers and the built-in dictionary registry.

use crate::domain::catalog::{ClassTag, DictionaryFormat, DictionarySpec, TextEncoding, WordClass};
use crate::domain::model::Dictionary;
use crate::utils::error::{MnemonicError, Result};
use std::collections::{HashMap, HashSet};

/// The dictionaries shipped under the dictionary directory.
pub fn builtin_dictionaries() -> Vec<DictionarySpec> {
    use DictionaryFormat::*;
    use TextEncoding::*;

    [
        ("wiktionary", "wiktionary_frequency_list.txt", Wiktionary, Utf8),
        ("ord10000", "ord10000.txt", Ord10000, Latin1),
        ("ord10k", "ord10k.csv", Ord10k, Latin1),
        ("norwegian", "norwegian.txt", WordList, Latin1),
        ("norwegian_large", "norwegian_large.txt", WordList, Latin1),
        ("nsf2012", "nsf2012/nsf2012.txt", Nsf2012, Utf8),
        ("nsf2023", "nsf2023/nsf2023.txt", WordList, Utf8),
    ]
    .into_iter()
    .map(|(name, path, format, encoding)| DictionarySpec::new(name, path, format, encoding))
    .collect()
}

pub fn available_names(specs: &[DictionarySpec]) -> String {
    specs
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Case-insensitive lookup by registered name.
pub fn find_dictionary<'a>(specs: &'a [DictionarySpec], name: &str) -> Result<&'a DictionarySpec> {
    specs
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| MnemonicError::UnknownDictionary {
            name: name.to_string(),
            available: available_names(specs),
        })
}

pub fn decode(source_name: &str, bytes: &[u8], encoding: TextEncoding) -> Result<String> {
    match encoding {
        TextEncoding::Utf8 => {
            let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
            String::from_utf8(bytes.to_vec()).map_err(|e| MnemonicError::Encoding {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })
        }
        // ISO-8859-1 maps every byte to the code point of the same value
        TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// One row of a frequency list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub place: usize,
    pub frequency: u64,
    pub word: String,
}

impl std::fmt::Display for FrequencyEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Place {}, Freq. {} = '{}'", self.place, self.frequency, self.word)
    }
}

pub fn read_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// `Place,Frequency,Percentage,Cumulated,Word` with a header row.
pub fn read_ord10k(
    source_name: &str,
    text: &str,
    ignore_single_letter_words: bool,
) -> Result<Vec<FrequencyEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let field = |index: usize| {
            record
                .get(index)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| format_error(source_name, line, format!("missing column {}", index + 1)))
        };

        let word = field(4)?;
        if ignore_single_letter_words && word.chars().count() < 2 {
            continue;
        }

        entries.push(FrequencyEntry {
            place: parse_number(source_name, line, field(0)?)?,
            frequency: parse_number(source_name, line, field(1)?)?,
            word: word.to_string(),
        });
    }
    Ok(entries)
}

/// `word frequency` per line.
pub fn read_wiktionary(
    source_name: &str,
    text: &str,
    ignore_single_letter_words: bool,
) -> Result<Vec<FrequencyEntry>> {
    read_columns(source_name, text, ignore_single_letter_words, 0, 1)
}

/// `frequency word` per line.
pub fn read_ord10000(
    source_name: &str,
    text: &str,
    ignore_single_letter_words: bool,
) -> Result<Vec<FrequencyEntry>> {
    read_columns(source_name, text, ignore_single_letter_words, 1, 0)
}

/// Space separated frequency list; the place is the 1-based line number.
fn read_columns(
    source_name: &str,
    text: &str,
    ignore_single_letter_words: bool,
    word_column: usize,
    frequency_column: usize,
) -> Result<Vec<FrequencyEntry>> {
    let mut entries = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let place = index + 1;
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.is_empty() {
            continue;
        }
        if columns.len() < 2 {
            return Err(format_error(source_name, place, "expected a word and a frequency"));
        }

        let word = columns[word_column];
        if ignore_single_letter_words && word.chars().count() < 2 {
            continue;
        }

        entries.push(FrequencyEntry {
            place,
            frequency: parse_number(source_name, place, columns[frequency_column])?,
            word: word.to_string(),
        });
    }

    Ok(entries)
}

fn parse_number<T: std::str::FromStr>(source_name: &str, line: usize, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| format_error(source_name, line, format!("'{}' is not a number", value)))
}

fn format_error(source_name: &str, line: usize, message: impl Into<String>) -> MnemonicError {
    MnemonicError::DictionaryFormat {
        source_name: source_name.to_string(),
        line,
        message: message.into(),
    }
}

/// Words of the NSF 2012 full-form list grouped by word class.
#[derive(Debug, Default)]
pub struct Lexicon {
    classes: HashMap<WordClass, Vec<String>>,
}

impl Lexicon {
    /// Each line is `word ... class`; the word is lower-cased and kept once per class.
    pub fn parse(source_name: &str, text: &str) -> Self {
        let mut classes: HashMap<WordClass, Vec<String>> = HashMap::new();
        let mut seen: HashSet<(WordClass, String)> = HashSet::new();
        let mut unknown: HashSet<&str> = HashSet::new();

        for line in text.lines() {
            let mut columns = line.split_whitespace();
            let Some(first) = columns.next() else {
                continue;
            };
            let tag = columns.last().unwrap_or(first);

            match WordClass::parse_tag(tag) {
                ClassTag::Collected(class) => {
                    let word = first.to_lowercase();
                    if seen.insert((class, word.clone())) {
                        classes.entry(class).or_default().push(word);
                    }
                }
                ClassTag::Ignored => {}
                ClassTag::Unknown => {
                    if unknown.insert(tag) {
                        tracing::warn!("Unknown word class '{}' in {}", tag, source_name);
                    }
                }
            }
        }

        Self { classes }
    }

    pub fn words(&self, class: WordClass) -> &[String] {
        self.classes.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nouns(&self) -> &[String] {
        self.words(WordClass::Noun)
    }

    pub fn len(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decodes and parses raw dictionary bytes according to `spec`.
pub fn load_dictionary(spec: &DictionarySpec, bytes: &[u8]) -> Result<Dictionary> {
    let source_name = spec.path.display().to_string();
    let text = decode(&source_name, bytes, spec.encoding)?;
    let ignore_single = spec.ignore_single_letter_words;

    let words: Vec<String> = match spec.format {
        DictionaryFormat::WordList => read_word_list(&text)
            .into_iter()
            .filter(|w| !ignore_single || w.chars().count() > 1)
            .collect(),
        DictionaryFormat::Ord10k => into_words(read_ord10k(&source_name, &text, ignore_single)?),
        DictionaryFormat::Ord10000 => {
            into_words(read_ord10000(&source_name, &text, ignore_single)?)
        }
        DictionaryFormat::Wiktionary => {
            into_words(read_wiktionary(&source_name, &text, ignore_single)?)
        }
        DictionaryFormat::Nsf2012 => {
            let class = spec.word_class.unwrap_or(WordClass::Noun);
            Lexicon::parse(&source_name, &text).words(class).to_vec()
        }
    };

    tracing::debug!("Loaded {} words from {}", words.len(), source_name);
    Ok(Dictionary::from_words(spec.name.clone(), words))
}

fn into_words(entries: Vec<FrequencyEntry>) -> Vec<String> {
    entries.into_iter().map(|e| e.word).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let specs = builtin_dictionaries();
        assert_eq!(specs.len(), 7);
        assert_eq!(
            available_names(&specs),
            "wiktionary, ord10000, ord10k, norwegian, norwegian_large, nsf2012, nsf2023"
        );
        let nsf = find_dictionary(&specs, "NSF2023").unwrap();
        assert_eq!(nsf.path.to_str(), Some("nsf2023/nsf2023.txt"));
        assert_eq!(nsf.file_stem(), "nsf2023");
    }

    #[test]
    fn test_unknown_dictionary_lists_names() {
        let specs = builtin_dictionaries();
        match find_dictionary(&specs, "klingon") {
            Err(MnemonicError::UnknownDictionary { name, available }) => {
                assert_eq!(name, "klingon");
                assert!(available.contains("ord10k"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_decode_latin1_and_utf8() {
        let latin1 = [b'k', b'j', 0xF8, b't', b't'];
        assert_eq!(decode("x", &latin1, TextEncoding::Latin1).unwrap(), "kjøtt");
        assert!(matches!(
            decode("x", &latin1, TextEncoding::Utf8),
            Err(MnemonicError::Encoding { .. })
        ));
        assert_eq!(
            decode("x", "\u{feff}sjø".as_bytes(), TextEncoding::Utf8).unwrap(),
            "sjø"
        );
    }

    #[test]
    fn test_ord10k_skips_header() {
        let text = "Place,Frequency,Percentage,Cumulated,Word\n\
                    1,5000,2.5,2.5,og\n\
                    2,4000,2.0,4.5,i\n\
                    3,3000,1.5,6.0,motor\n";
        let entries = read_ord10k("ord10k.csv", text, false).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries[2],
            FrequencyEntry {
                place: 3,
                frequency: 3000,
                word: "motor".to_string()
            }
        );

        let words = read_ord10k("ord10k.csv", text, true).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.iter().all(|e| e.word != "i"));
    }

    #[test]
    fn test_ord10k_missing_word_column() {
        let text = "Place,Frequency,Percentage,Cumulated,Word\n1,5000,2.5\n";
        assert!(matches!(
            read_ord10k("ord10k.csv", text, false),
            Err(MnemonicError::DictionaryFormat { .. })
        ));
    }

    #[test]
    fn test_space_separated_frequency_lists() {
        let wiktionary = read_wiktionary("w", "og 100\n\ni 90\nmotor 5\n", true).unwrap();
        assert_eq!(wiktionary.len(), 2);
        assert_eq!(wiktionary[0].place, 1);
        assert_eq!(wiktionary[1].word, "motor");
        assert_eq!(wiktionary[1].place, 4);

        let ord10000 = read_ord10000("o", "120 og\n80 mat\n", false).unwrap();
        assert_eq!(ord10000[1].frequency, 80);
        assert_eq!(ord10000[1].word, "mat");
        assert_eq!(ord10000[1].to_string(), "Place 2, Freq. 80 = 'mat'");
    }

    #[test]
    fn test_bad_frequency_is_reported_with_line() {
        match read_ord10000("ord10000.txt", "120 og\nmange mat\n", false) {
            Err(MnemonicError::DictionaryFormat { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_lexicon_groups_by_class() {
        let text = "Motor motor subst\nmotor motoren subst\nkjøre kjører verb\nrask raske adj\n\
                    tre tre numeral\nrar rar woops\n";
        let lexicon = Lexicon::parse("nsf2012.txt", text);
        assert_eq!(lexicon.nouns(), &["motor".to_string()]);
        assert_eq!(lexicon.words(WordClass::Verb), &["kjøre".to_string()]);
        assert_eq!(lexicon.words(WordClass::Adjective), &["rask".to_string()]);
        assert!(lexicon.words(WordClass::Article).is_empty());
        assert_eq!(lexicon.len(), 3);
    }

    #[test]
    fn test_load_dictionary_by_format() {
        let spec = DictionarySpec::new("norwegian", "norwegian.txt", DictionaryFormat::WordList, TextEncoding::Latin1);
        let dictionary = load_dictionary(&spec, b"motor\r\n\r\nmat\r\n").unwrap();
        assert_eq!(dictionary.name(), "norwegian");
        assert_eq!(dictionary.words(), &["motor", "mat"]);

        let mut spec = DictionarySpec::new("nsf2012", "nsf2012/nsf2012.txt", DictionaryFormat::Nsf2012, TextEncoding::Utf8);
        let text = "bil bil subst\nkjøre kjøre verb\n";
        assert_eq!(load_dictionary(&spec, text.as_bytes()).unwrap().words(), &["bil"]);

        spec.word_class = Some(WordClass::Verb);
        assert_eq!(load_dictionary(&spec, text.as_bytes()).unwrap().words(), &["kjøre"]);
    }
}
