//! Domain errors for the orgaudit hierarchy and report pipeline.

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Format a cycle path as a human-readable string: `A -> B -> C -> A`.
fn format_cycle_path(path: &[String]) -> String {
    let mut rendered = path.join(" -> ");
    if let Some(first) = path.first() {
        rendered.push_str(" -> ");
        rendered.push_str(first);
    }
    rendered
}

/// Domain-level errors that can occur while ingesting records or building the hierarchy.
///
/// Every variant is terminal for a run: they describe structural properties of
/// the input, so retrying with the same input cannot succeed.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("Salary {salary} of employee {employee} is out of range")]
    SalaryOutOfRange { employee: String, salary: Decimal },

    #[error("Duplicate employee identity: {0}")]
    DuplicateIdentity(String),

    #[error("Manager {manager} of employee {employee} not found")]
    ManagerNotFound { employee: String, manager: String },

    #[error("No root employee found: every employee has a manager")]
    NoRootFound,

    #[error("Multiple root employees found: {first} and {second} have no manager")]
    MultipleRoots { first: String, second: String },

    #[error("Management cycle detected: {}", format_cycle_path(.0))]
    ManagementCycle(Vec<String>),

    #[error("Failed to read employee source {}: {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DomainError {
    /// Shorthand for an [`DomainError::InvalidRecord`] at the given line.
    pub fn invalid_record(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            reason: reason.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
