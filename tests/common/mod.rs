//! Common test utilities for integration tests
//!
//! Provides shared fixtures, helpers, and test utilities used across
//! multiple integration test files.

#![allow(dead_code)]

use std::io::Write;

use orgaudit::domain::models::EmployeeRecord;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

/// Five employees; Joe is the root.
pub const SMALL_ORG_CSV: &str = "\
Id,firstName,lastName,salary,managerId
123,Joe,Doe,60000,
124,Martin,Chekov,45000,123
125,Bob,Ronstad,47000,123
300,Alice,Hasacat,50000,124
305,Brett,Hardleaf,34000,300
";

/// Ten employees with a long management chain below Brett.
pub const REFERENCE_ORG_CSV: &str = "\
Id,firstName,lastName,salary,managerId
123,Joe,Doe,1000000,
124,Martin,Chekov,450000,123
125,Bob,Ronstad,47000,123
300,Alice,Hasacat,50000,124
305,Brett,Hardleaf,34000,300
306,Andre,Silva,30000,305
307,Andrey,Kokonenko,33000,305
308,Brandy,Silver,25000,306
309,Carlos,Garcia,20000,308
310,Jose,Perez,10000,309
";

/// Write CSV content to a temporary file that lives as long as the handle
pub fn write_csv(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Build a validated record without going through text parsing
pub fn employee(id: &str, salary: i64, manager: Option<&str>) -> EmployeeRecord {
    EmployeeRecord {
        id: id.to_string(),
        first_name: format!("{id}-first"),
        last_name: format!("{id}-last"),
        salary: Decimal::from(salary),
        manager_id: manager.map(str::to_string),
    }
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
