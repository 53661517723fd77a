pub mod engine;
pub mod pattern;
pub mod phoneme;
pub mod pipeline;
pub mod search;
pub mod tokenizer;
pub mod verify;

pub use crate::domain::model::{DigitSequence, DigitsWords, MnemonicToken, SearchResult};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
