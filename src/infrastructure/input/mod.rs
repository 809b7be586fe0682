//! Record source adapters

pub mod delimited;

pub use delimited::{parse_delimited, DelimitedFileSource};
