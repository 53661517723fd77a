use crate::adapters::dictionary::load_dictionary;
use crate::adapters::output::{output_file_name, write_csv, write_json};
use crate::core::search::WordFinder;
use crate::core::verify::{verify, Verification};
use crate::core::{ConfigProvider, Storage};
use crate::domain::catalog::{DictionarySpec, OutputFormat};
use crate::domain::model::{Dictionary, SearchResult};
use crate::utils::error::Result;

/// Search result for one dictionary together with its round-trip check.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub result: SearchResult,
    pub verification: Verification,
}

impl RunOutcome {
    pub fn is_verified(&self) -> bool {
        self.verification.is_match()
    }
}

pub trait Pipeline {
    /// Reads and parses the dictionary file.
    fn extract(&self, spec: &DictionarySpec) -> Result<Dictionary>;
    /// Finds words for `digits` and verifies the first candidates.
    fn transform(&mut self, dictionary: &Dictionary, digits: &[u8]) -> Result<RunOutcome>;
    /// Writes the configured result files, returning where they went.
    fn load(&self, spec: &DictionarySpec, outcome: &RunOutcome) -> Result<Vec<String>>;
}

pub struct MnemonicPipeline<S: Storage, C: ConfigProvider> {
    dictionaries: S,
    output: S,
    config: C,
    finder: WordFinder,
}

impl<S: Storage, C: ConfigProvider> MnemonicPipeline<S, C> {
    pub fn new(dictionaries: S, output: S, config: C) -> Self {
        let finder = WordFinder::new(config.max_chunk()).with_deduplicate(config.deduplicate());
        Self {
            dictionaries,
            output,
            config,
            finder,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for MnemonicPipeline<S, C> {
    fn extract(&self, spec: &DictionarySpec) -> Result<Dictionary> {
        let path = spec.path.to_string_lossy();
        tracing::debug!("Reading dictionary {} from {}", spec.name, self.dictionaries.display_path(&path));

        let bytes = self.dictionaries.read_file(&path)?;
        load_dictionary(spec, &bytes)
    }

    fn transform(&mut self, dictionary: &Dictionary, digits: &[u8]) -> Result<RunOutcome> {
        let result = self.finder.find_words(dictionary, digits)?;
        let verification = verify(digits, &result.groups);

        Ok(RunOutcome {
            result,
            verification,
        })
    }

    fn load(&self, spec: &DictionarySpec, outcome: &RunOutcome) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in self.config.output_formats() {
            let file_name = output_file_name(&spec.file_stem(), format.extension());
            let data = match format {
                OutputFormat::Csv => write_csv(&outcome.result.digits, &outcome.result.groups)?,
                OutputFormat::Json => write_json(
                    &outcome.result,
                    outcome.is_verified(),
                    chrono::Utc::now(),
                )?,
            };

            tracing::debug!("Writing {} ({} bytes)", file_name, data.len());
            self.output.write_file(&file_name, &data)?;
            written.push(self.output.display_path(&file_name));
        }

        Ok(written)
    }
}
