pub mod cli;
pub mod toml_config;

use crate::adapters::dictionary::builtin_dictionaries;
use crate::core::ConfigProvider;
use crate::domain::catalog::{DictionarySpec, OutputFormat};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use self::toml_config::TomlConfig;

pub const DEFAULT_DICT_DIR: &str = "dict";
pub const DEFAULT_OUTPUT_PATH: &str = "output";
pub const DEFAULT_DICTIONARY: &str = "nsf2023";
/// First twelve digits of pi, used when no digits are given.
pub const DEFAULT_DIGITS: &str = "314159265358";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "major-mnemonic", version))]
#[cfg_attr(
    feature = "cli",
    command(about = "Turn digit sequences into Norwegian words with the Major mnemonic system")
)]
pub struct CliConfig {
    /// Digits to convert into words [default: 314159265358]
    #[cfg_attr(feature = "cli", arg(value_name = "DIGITS"))]
    pub digits: Option<String>,

    /// Parse the given text into digits and show its mnemonic
    #[cfg_attr(feature = "cli", arg(short = 's', long = "string", value_name = "TEXT"))]
    pub string: Option<String>,

    /// Show the mnemonic major system rules
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub rules: bool,

    /// Dictionary to search [default: nsf2023]
    #[cfg_attr(feature = "cli", arg(short, long, value_name = "NAME"))]
    pub dictionary: Option<String>,

    /// Search every registered dictionary
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub all: bool,

    /// Write the results as CSV
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub csv: bool,

    /// Write the results as JSON
    #[cfg_attr(feature = "cli", arg(long))]
    pub json: bool,

    /// Directory holding the dictionary files [default: dict]
    #[cfg_attr(feature = "cli", arg(long))]
    pub dict_dir: Option<String>,

    /// Directory for result files [default: output]
    #[cfg_attr(feature = "cli", arg(long))]
    pub output_path: Option<String>,

    /// Longest digit chunk tried per word [default: 16]
    #[cfg_attr(feature = "cli", arg(long))]
    pub max_chunk: Option<usize>,

    /// Keep repeated dictionary entries as separate candidates
    #[cfg_attr(feature = "cli", arg(long))]
    pub keep_duplicates: bool,

    /// TOML configuration file
    #[cfg_attr(feature = "cli", arg(long, value_name = "FILE"))]
    pub config: Option<String>,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    /// Log per-phase CPU and memory usage
    #[cfg_attr(feature = "cli", arg(long))]
    pub monitor: bool,

    /// Emit logs as JSON lines
    #[cfg_attr(feature = "cli", arg(long))]
    pub log_json: bool,

    #[cfg_attr(feature = "cli", arg(skip))]
    #[serde(default)]
    pub custom_dictionaries: Vec<DictionarySpec>,

    /// Fallback log filter from `[monitoring] log_level`.
    #[cfg_attr(feature = "cli", arg(skip))]
    #[serde(default)]
    pub log_level: Option<String>,
}

impl CliConfig {
    /// Fills every option not given on the command line from `file`.
    pub fn merge_file_config(&mut self, file: &TomlConfig) {
        if self.dict_dir.is_none() {
            self.dict_dir = file.dictionaries.dir.clone();
        }
        if self.dictionary.is_none() {
            self.dictionary = file.dictionaries.default.clone();
        }
        if self.output_path.is_none() {
            self.output_path = file.output.path.clone();
        }
        if self.max_chunk.is_none() {
            self.max_chunk = file.search.max_chunk;
        }
        if file.search.deduplicate == Some(false) {
            self.keep_duplicates = true;
        }
        for format in file.output_formats() {
            match format {
                OutputFormat::Csv => self.csv = true,
                OutputFormat::Json => self.json = true,
            }
        }
        self.monitor |= file.monitoring_enabled();
        self.log_level = file.log_level().map(str::to_string);
        self.custom_dictionaries = file.dictionaries.custom.clone();
    }

    pub fn dictionary_name(&self) -> &str {
        self.dictionary.as_deref().unwrap_or(DEFAULT_DICTIONARY)
    }

    pub fn digits_or_default(&self) -> &str {
        self.digits.as_deref().unwrap_or(DEFAULT_DIGITS)
    }
}

impl ConfigProvider for CliConfig {
    fn dict_dir(&self) -> &str {
        self.dict_dir.as_deref().unwrap_or(DEFAULT_DICT_DIR)
    }

    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn max_chunk(&self) -> usize {
        self.max_chunk.unwrap_or(crate::core::search::DEFAULT_MAX_CHUNK)
    }

    fn deduplicate(&self) -> bool {
        !self.keep_duplicates
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        let mut formats = Vec::new();
        if self.csv {
            formats.push(OutputFormat::Csv);
        }
        if self.json {
            formats.push(OutputFormat::Json);
        }
        formats
    }

    fn dictionaries(&self) -> Vec<DictionarySpec> {
        let mut specs = builtin_dictionaries();
        specs.extend(self.custom_dictionaries.iter().cloned());
        specs
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("dict_dir", self.dict_dir())?;
        validation::validate_path("output_path", self.output_path())?;
        validation::validate_max_chunk("max_chunk", self.max_chunk())?;
        validation::validate_non_empty_string("dictionary", self.dictionary_name())?;
        validation::validate_unique_names(
            "dictionaries",
            self.dictionaries().iter().map(|s| s.name.as_str()),
        )?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["major-mnemonic"]);
        assert_eq!(config.digits_or_default(), DEFAULT_DIGITS);
        assert_eq!(config.dictionary_name(), "nsf2023");
        assert_eq!(config.dict_dir(), "dict");
        assert_eq!(config.output_path(), "output");
        assert_eq!(config.max_chunk(), 16);
        assert!(config.deduplicate());
        assert!(config.output_formats().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = CliConfig::parse_from([
            "major-mnemonic",
            "-d",
            "ORD10K",
            "-c",
            "--json",
            "--max-chunk",
            "8",
            "271828",
        ]);
        assert_eq!(config.digits.as_deref(), Some("271828"));
        assert_eq!(config.dictionary_name(), "ORD10K");
        assert_eq!(config.max_chunk(), 8);
        assert_eq!(
            config.output_formats(),
            vec![OutputFormat::Csv, OutputFormat::Json]
        );
    }

    #[test]
    fn test_string_and_rules() {
        let config = CliConfig::parse_from(["major-mnemonic", "-s", "skjerm mus", "-r"]);
        assert_eq!(config.string.as_deref(), Some("skjerm mus"));
        assert!(config.rules);
    }

    #[test]
    fn test_invalid_max_chunk() {
        let config = CliConfig::parse_from(["major-mnemonic", "--max-chunk", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_command_line_wins_over_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[search]
max_chunk = 6
deduplicate = false

[dictionaries]
dir = "/srv/dict"
default = "ord10k"

[output]
path = "/srv/out"
formats = ["json"]

[monitoring]
enabled = false
log_level = "warn"
"#,
        )
        .unwrap();

        let mut config = CliConfig::parse_from(["major-mnemonic", "--max-chunk", "10"]);
        config.merge_file_config(&file);

        assert_eq!(config.max_chunk(), 10);
        assert_eq!(config.dict_dir(), "/srv/dict");
        assert_eq!(config.output_path(), "/srv/out");
        assert_eq!(config.dictionary_name(), "ord10k");
        assert!(!config.deduplicate());
        assert_eq!(config.output_formats(), vec![OutputFormat::Json]);
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert!(!config.monitor);
    }
}
