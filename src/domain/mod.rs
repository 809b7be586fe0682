//! Domain layer for orgaudit
//!
//! This module contains the employee, hierarchy, metrics and report models,
//! the domain error taxonomy, and the ports implemented by infrastructure.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{DomainError, DomainResult};
