//! Employee record domain models
//!
//! Raw input rows, validated employee records, and the identity-unique
//! directory that feeds hierarchy construction.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Normalized field names recognized in a record header.
pub mod fields {
    pub const ID: &str = "id";
    pub const FIRST_NAME: &str = "firstname";
    pub const LAST_NAME: &str = "lastname";
    pub const SALARY: &str = "salary";
    pub const MANAGER_ID: &str = "managerid";

    /// Columns that every header must declare.
    pub const REQUIRED: [&str; 4] = [ID, FIRST_NAME, LAST_NAME, SALARY];

    /// Normalize a header cell into its lookup key.
    pub fn normalize(header: &str) -> String {
        header.trim().to_lowercase()
    }
}

/// Largest accepted salary, in whole currency units.
///
/// Payroll sums over any organization that fits in memory stay far inside the
/// range of [`Decimal`] below this bound.
pub const MAX_SALARY_UNITS: i64 = 1_000_000_000_000_000;

/// [`MAX_SALARY_UNITS`] as a decimal
pub fn max_salary() -> Decimal {
    Decimal::from(MAX_SALARY_UNITS)
}

/// One unvalidated input row: field values keyed by normalized header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line number of the row in its source
    pub line: usize,
    /// Field values keyed by normalized header name
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    /// Create a raw record for the given source line
    pub fn new(line: usize) -> Self {
        Self {
            line,
            fields: HashMap::new(),
        }
    }

    /// Builder-style field insertion, normalizing the key
    pub fn with_field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields.insert(fields::normalize(key), value.into());
        self
    }

    /// Trimmed value of a field, `None` when absent or blank
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// A validated, immutable employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub salary: Decimal,
    /// Identity of the direct manager; `None` marks a root candidate
    pub manager_id: Option<String>,
}

impl EmployeeRecord {
    /// Whether this record has no manager and so competes for the root slot
    pub fn is_root_candidate(&self) -> bool {
        self.manager_id.is_none()
    }
}

/// Validated records in input order, guaranteed unique by identity.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    records: Vec<EmployeeRecord>,
    index: HashMap<String, usize>,
}

impl EmployeeDirectory {
    /// Build a directory, rejecting the first identity that appears twice.
    pub fn from_records(records: impl IntoIterator<Item = EmployeeRecord>) -> DomainResult<Self> {
        let mut directory = Self::default();
        for record in records {
            directory.insert(record)?;
        }
        Ok(directory)
    }

    /// Append a record.
    ///
    /// Fails with `SalaryOutOfRange` when the salary is negative or above
    /// [`max_salary`], and with `DuplicateIdentity` if the id is taken.
    pub fn insert(&mut self, record: EmployeeRecord) -> DomainResult<()> {
        if record.salary < Decimal::ZERO || record.salary > max_salary() {
            return Err(DomainError::SalaryOutOfRange {
                employee: record.id,
                salary: record.salary,
            });
        }
        if self.index.contains_key(&record.id) {
            return Err(DomainError::DuplicateIdentity(record.id));
        }
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Input position of the record with the given identity
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&EmployeeRecord> {
        self.position(id).map(|pos| &self.records[pos])
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<EmployeeRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
