pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};

pub use crate::core::engine::MnemonicEngine;
pub use crate::core::pipeline::{MnemonicPipeline, Pipeline, RunOutcome};
pub use crate::core::search::WordFinder;
pub use crate::core::tokenizer::{parse_digits, to_mnemonic, tokenize};
pub use crate::core::verify::{verify, Verification};
pub use crate::utils::error::{MnemonicError, Result};
