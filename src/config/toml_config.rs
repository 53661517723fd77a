use crate::adapters::dictionary::builtin_dictionaries;
use crate::core::search::DEFAULT_MAX_CHUNK;
use crate::core::ConfigProvider;
use crate::domain::catalog::{DictionarySpec, OutputFormat};
use crate::utils::error::{MnemonicError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const VALID_FORMATS: [&str; 2] = ["csv", "json"];
const DICTIONARY_EXTENSIONS: [&str; 2] = ["txt", "csv"];
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub dictionaries: DictionariesConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub max_chunk: Option<usize>,
    pub deduplicate: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionariesConfig {
    pub dir: Option<String>,
    pub default: Option<String>,
    #[serde(default)]
    pub custom: Vec<DictionarySpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    #[serde(default)]
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MnemonicError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(dir) = &self.dictionaries.dir {
            validation::validate_path("dictionaries.dir", dir)?;
        }
        if let Some(path) = &self.output.path {
            validation::validate_path("output.path", path)?;
        }
        if let Some(max_chunk) = self.search.max_chunk {
            validation::validate_max_chunk("search.max_chunk", max_chunk)?;
        }
        if let Some(name) = &self.dictionaries.default {
            validation::validate_non_empty_string("dictionaries.default", name)?;
        }

        if let Some(level) = self.log_level() {
            validate_log_level(level)?;
        }

        for format in &self.output.formats {
            if !VALID_FORMATS.contains(&format.to_lowercase().as_str()) {
                return Err(MnemonicError::InvalidConfigValueError {
                    field: "output.formats".to_string(),
                    value: format.clone(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        VALID_FORMATS.join(", ")
                    ),
                });
            }
        }

        for spec in &self.dictionaries.custom {
            validation::validate_non_empty_string("dictionaries.custom.name", &spec.name)?;
        }
        let custom_paths: Vec<String> = self
            .dictionaries
            .custom
            .iter()
            .map(|s| s.path.to_string_lossy().into_owned())
            .collect();
        validation::validate_file_extensions(
            "dictionaries.custom.path",
            &custom_paths,
            &DICTIONARY_EXTENSIONS,
        )?;
        validation::validate_unique_names(
            "dictionaries.custom.name",
            self.dictionaries().iter().map(|s| s.name.as_str()),
        )?;

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

/// A bare level must be one `tracing` knows; full filter directives are
/// checked by `EnvFilter` when the logger starts.
fn validate_log_level(level: &str) -> Result<()> {
    validation::validate_non_empty_string("monitoring.log_level", level)?;
    if level.contains('=') || LOG_LEVELS.contains(&level.trim().to_lowercase().as_str()) {
        return Ok(());
    }
    Err(MnemonicError::InvalidConfigValueError {
        field: "monitoring.log_level".to_string(),
        value: level.to_string(),
        reason: format!("Unknown log level. Valid levels: {}", LOG_LEVELS.join(", ")),
    })
}

impl ConfigProvider for TomlConfig {
    fn dict_dir(&self) -> &str {
        self.dictionaries
            .dir
            .as_deref()
            .unwrap_or(super::DEFAULT_DICT_DIR)
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or(super::DEFAULT_OUTPUT_PATH)
    }

    fn max_chunk(&self) -> usize {
        self.search.max_chunk.unwrap_or(DEFAULT_MAX_CHUNK)
    }

    fn deduplicate(&self) -> bool {
        self.search.deduplicate.unwrap_or(true)
    }

    /// Unknown names are skipped here; `validate_config` reports them.
    fn output_formats(&self) -> Vec<OutputFormat> {
        let mut formats = Vec::new();
        for name in &self.output.formats {
            let format = match name.to_lowercase().as_str() {
                "csv" => OutputFormat::Csv,
                "json" => OutputFormat::Json,
                _ => continue,
            };
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        formats
    }

    fn dictionaries(&self) -> Vec<DictionarySpec> {
        let mut specs = builtin_dictionaries();
        specs.extend(self.dictionaries.custom.iter().cloned());
        specs
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{DictionaryFormat, TextEncoding};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[search]
max_chunk = 12
deduplicate = false

[dictionaries]
dir = "./dict"
default = "ord10k"

[[dictionaries.custom]]
name = "mine"
path = "mine/words.txt"
format = "word_list"
encoding = "latin1"
ignore_single_letter_words = true

[output]
path = "./results"
formats = ["csv", "JSON"]

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.max_chunk(), 12);
        assert!(!config.deduplicate());
        assert_eq!(config.dict_dir(), "./dict");
        assert_eq!(config.output_path(), "./results");
        assert_eq!(
            config.output_formats(),
            vec![OutputFormat::Csv, OutputFormat::Json]
        );
        assert!(config.monitoring_enabled());

        let custom = config.dictionaries().pop().unwrap();
        assert_eq!(custom.name, "mine");
        assert_eq!(custom.format, DictionaryFormat::WordList);
        assert_eq!(custom.encoding, TextEncoding::Latin1);
        assert!(custom.ignore_single_letter_words);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.max_chunk(), DEFAULT_MAX_CHUNK);
        assert!(config.deduplicate());
        assert_eq!(config.dict_dir(), "dict");
        assert!(config.output_formats().is_empty());
        assert!(!config.monitoring_enabled());
        assert_eq!(config.dictionaries().len(), 7);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MAJOR_MNEMONIC_TEST_DICT_DIR", "/data/dict");

        let toml_content = r#"
[dictionaries]
dir = "${MAJOR_MNEMONIC_TEST_DICT_DIR}"

[output]
path = "${MAJOR_MNEMONIC_TEST_UNSET}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.dict_dir(), "/data/dict");
        assert_eq!(config.output_path(), "${MAJOR_MNEMONIC_TEST_UNSET}");

        std::env::remove_var("MAJOR_MNEMONIC_TEST_DICT_DIR");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad_format = TomlConfig::from_toml_str("[output]\nformats = [\"tsv\"]\n").unwrap();
        assert!(matches!(
            bad_format.validate(),
            Err(MnemonicError::InvalidConfigValueError { .. })
        ));

        let bad_chunk = TomlConfig::from_toml_str("[search]\nmax_chunk = 0\n").unwrap();
        assert!(bad_chunk.validate().is_err());

        let clash = TomlConfig::from_toml_str(
            "[[dictionaries.custom]]\nname = \"NSF2023\"\npath = \"x.txt\"\nformat = \"word_list\"\n",
        )
        .unwrap();
        assert!(clash.validate().is_err());

        let bad_extension = TomlConfig::from_toml_str(
            "[[dictionaries.custom]]\nname = \"x\"\npath = \"x.docx\"\nformat = \"word_list\"\n",
        )
        .unwrap();
        assert!(bad_extension.validate().is_err());
    }

    #[test]
    fn test_monitoring_log_level() {
        let config = TomlConfig::from_toml_str(
            "[monitoring]\nenabled = false\nlog_level = \"debug\"\n",
        )
        .unwrap();
        assert_eq!(config.log_level(), Some("debug"));
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());

        let directive = TomlConfig::from_toml_str(
            "[monitoring]\nenabled = true\nlog_level = \"major_mnemonic=trace\"\n",
        )
        .unwrap();
        assert!(directive.validate().is_ok());

        let bad = TomlConfig::from_toml_str(
            "[monitoring]\nenabled = true\nlog_level = \"loud\"\n",
        )
        .unwrap();
        assert!(matches!(
            bad.validate(),
            Err(MnemonicError::InvalidConfigValueError { .. })
        ));
        assert_eq!(TomlConfig::default().log_level(), None);
    }

    #[test]
    fn test_unknown_format_name_is_a_parse_error() {
        let result = TomlConfig::from_toml_str(
            "[[dictionaries.custom]]\nname = \"x\"\npath = \"x.txt\"\nformat = \"yaml\"\n",
        );
        assert!(matches!(
            result,
            Err(MnemonicError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[dictionaries]\ndefault = \"wiktionary\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.dictionaries.default.as_deref(), Some("wiktionary"));
    }
}
