//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that infrastructure adapters must implement:
//! - RecordSource: yields raw employee rows from some external format
//!
//! These traits keep hierarchy construction and reporting independent of
//! where the employee records come from.

pub mod record_source;

pub use record_source::{InMemorySource, RecordSource};
