// Domain layer: data model, dictionary catalog and ports.

pub mod catalog;
pub mod model;
pub mod ports;
