// Adapters: dictionary file readers and result writers.

pub mod dictionary;
pub mod output;
