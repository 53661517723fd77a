use crate::domain::catalog::{DictionarySpec, OutputFormat};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    /// Location of `path` as shown to the user.
    fn display_path(&self, path: &str) -> String;
}

pub trait ConfigProvider {
    fn dict_dir(&self) -> &str;
    fn output_path(&self) -> &str;
    fn max_chunk(&self) -> usize;
    fn deduplicate(&self) -> bool;
    fn output_formats(&self) -> Vec<OutputFormat>;
    /// Every dictionary that can be selected by name, in run order.
    fn dictionaries(&self) -> Vec<DictionarySpec>;
}
