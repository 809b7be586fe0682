//! orgaudit - Organization hierarchy and compensation report
//!
//! orgaudit reads a flat list of employee records, reconstructs the implied
//! reporting hierarchy, and reports managers paid outside the salary band set
//! by their direct reports as well as employees sitting too deep below the root.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Records, hierarchy arena, metrics, errors and ports
//! - **Service Layer** (`services`): Validation, construction, policy and traversal
//! - **Infrastructure Layer** (`infrastructure`): File input, configuration, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use orgaudit::domain::models::PolicyConfig;
//! use orgaudit::infrastructure::input::DelimitedFileSource;
//! use orgaudit::services::OrgReportService;
//!
//! let source = DelimitedFileSource::new("employees.csv", ',');
//! let report = OrgReportService::new(PolicyConfig::default()).generate(&source)?;
//! println!("{} overpaid managers", report.overpaid().len());
//! # Ok::<(), orgaudit::DomainError>(())
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, EmployeeDirectory, EmployeeRecord, EmployeeResult, Hierarchy, NodeId, NodeMetrics,
    PolicyConfig, RawRecord, ReportCollections,
};
pub use domain::ports::RecordSource;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    HierarchyBuilder, OrgReportService, PolicyEvaluator, RecordValidator, ReportTraversal,
};
