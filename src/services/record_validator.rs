use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::employee::{fields, max_salary, MAX_SALARY_UNITS};
use crate::domain::models::{EmployeeDirectory, EmployeeRecord, RawRecord};

/// Service turning raw field maps into validated employee records
#[derive(Debug, Clone, Default)]
pub struct RecordValidator;

impl RecordValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a single row
    ///
    /// Identity, first name, last name and salary are required; salary must be
    /// an exact non-negative decimal no larger than [`MAX_SALARY_UNITS`]. A
    /// blank or missing manager id marks a root candidate.
    pub fn validate(&self, raw: &RawRecord) -> DomainResult<EmployeeRecord> {
        let required = |key: &str| {
            raw.get(key)
                .map(str::to_string)
                .ok_or_else(|| DomainError::invalid_record(raw.line, format!("{key} is missing or empty")))
        };

        let id = required(fields::ID)?;
        let first_name = required(fields::FIRST_NAME)?;
        let last_name = required(fields::LAST_NAME)?;
        let salary = parse_salary(raw.line, &required(fields::SALARY)?)?;
        let manager_id = raw.get(fields::MANAGER_ID).map(str::to_string);

        Ok(EmployeeRecord {
            id,
            first_name,
            last_name,
            salary,
            manager_id,
        })
    }

    /// Validate every row and collect them into a directory.
    ///
    /// Stops at the first invalid row; a partially ingested organization would
    /// silently produce a wrong hierarchy.
    #[instrument(skip_all, fields(rows = raws.len()))]
    pub fn validate_all(&self, raws: &[RawRecord]) -> DomainResult<EmployeeDirectory> {
        let mut directory = EmployeeDirectory::default();
        for raw in raws {
            let record = self.validate(raw)?;
            directory.insert(record)?;
        }
        debug!(employees = directory.len(), "records validated");
        Ok(directory)
    }
}

fn parse_salary(line: usize, value: &str) -> DomainResult<Decimal> {
    // from_str would round away digits beyond Decimal's precision
    let salary = Decimal::from_str_exact(value).map_err(|e| {
        DomainError::invalid_record(line, format!("salary '{value}' is not an exact decimal: {e}"))
    })?;

    if salary < Decimal::ZERO {
        return Err(DomainError::invalid_record(
            line,
            format!("salary '{value}' is negative"),
        ));
    }

    if salary > max_salary() {
        return Err(DomainError::invalid_record(
            line,
            format!("salary '{value}' exceeds {MAX_SALARY_UNITS}"),
        ));
    }

    Ok(salary)
}
