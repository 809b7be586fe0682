use crate::domain::errors::DomainResult;
use crate::domain::models::RawRecord;

/// Port for reading raw employee rows following hexagonal architecture
///
/// Implementations only split their input into field maps; validation of the
/// individual fields happens in the record validator.
///
/// # Examples
///
/// ```no_run
/// use orgaudit::domain::ports::RecordSource;
/// use orgaudit::domain::errors::DomainResult;
///
/// fn count_rows(source: &dyn RecordSource) -> DomainResult<usize> {
///     Ok(source.read_records()?.len())
/// }
/// ```
pub trait RecordSource: Send + Sync {
    /// Short human-readable description of the source, used in logs
    fn describe(&self) -> String;

    /// Read every data row in source order
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<RawRecord>)` - One entry per data row, header excluded
    /// * `Err(DomainError::SourceRead)` - The source could not be read
    /// * `Err(DomainError::InvalidRecord)` - A row could not be split into fields
    fn read_records(&self) -> DomainResult<Vec<RawRecord>>;
}

/// Source over rows that are already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<RawRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for InMemorySource {
    fn describe(&self) -> String {
        format!("in-memory ({} rows)", self.records.len())
    }

    fn read_records(&self) -> DomainResult<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}
