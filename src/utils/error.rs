use thiserror::Error;

#[derive(Error, Debug)]
pub enum MnemonicError {
    #[error("Invalid digit value {value}: digits must be between 0 and 9")]
    InvalidDigit { value: u8 },

    #[error("Invalid digit string '{input}': unexpected character at position {position}")]
    InvalidDigitString { input: String, position: usize },

    #[error("Unknown dictionary '{name}'. Available dictionaries: {available}")]
    UnknownDictionary { name: String, available: String },

    #[error("Malformed entry in {source_name} at line {line}: {message}")]
    DictionaryFormat {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("Could not decode {source_name}: {message}")]
    Encoding { source_name: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pattern compilation error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Dictionary,
    Output,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MnemonicError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MnemonicError::InvalidDigit { .. } | MnemonicError::InvalidDigitString { .. } => {
                ErrorCategory::Input
            }
            MnemonicError::UnknownDictionary { .. }
            | MnemonicError::DictionaryFormat { .. }
            | MnemonicError::Encoding { .. } => ErrorCategory::Dictionary,
            MnemonicError::CsvError(_)
            | MnemonicError::IoError(_)
            | MnemonicError::SerializationError(_) => ErrorCategory::Output,
            MnemonicError::ConfigError { .. }
            | MnemonicError::ConfigValidationError { .. }
            | MnemonicError::InvalidConfigValueError { .. }
            | MnemonicError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MnemonicError::PatternError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Dictionary => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MnemonicError::InvalidDigit { .. } => {
                "Only the digits 0-9 can be encoded".to_string()
            }
            MnemonicError::InvalidDigitString { .. } => {
                "Pass the number as plain digits, e.g. 314159".to_string()
            }
            MnemonicError::UnknownDictionary { available, .. } => {
                format!("Choose one of: {}", available)
            }
            MnemonicError::DictionaryFormat { source_name, .. } => format!(
                "Check that {} matches the format registered for it",
                source_name
            ),
            MnemonicError::Encoding { .. } => {
                "Register the dictionary with encoding = \"latin1\" or convert it to UTF-8"
                    .to_string()
            }
            MnemonicError::IoError(_) => {
                "Check that the dictionary directory and output path exist and are accessible"
                    .to_string()
            }
            MnemonicError::CsvError(_) | MnemonicError::SerializationError(_) => {
                "Check that the output directory is writable".to_string()
            }
            MnemonicError::ConfigError { .. }
            | MnemonicError::ConfigValidationError { .. }
            | MnemonicError::InvalidConfigValueError { .. }
            | MnemonicError::MissingConfigError { .. } => {
                "Review the command-line options or the TOML configuration file".to_string()
            }
            MnemonicError::PatternError(_) => {
                "This is a bug in the pattern compiler, please report it".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Dictionary => format!("Dictionary problem: {}", self),
            ErrorCategory::Output => format!("Could not read or write files: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MnemonicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_and_severity() {
        let err = MnemonicError::InvalidDigit { value: 12 };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);

        let err = MnemonicError::UnknownDictionary {
            name: "klingon".to_string(),
            available: "nsf2023".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Dictionary);
        assert!(err.recovery_suggestion().contains("nsf2023"));
        assert!(err.user_friendly_message().starts_with("Dictionary problem"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: MnemonicError = io.into();
        assert_eq!(err.category(), ErrorCategory::Output);
        assert!(err.to_string().contains("missing"));
    }
}
