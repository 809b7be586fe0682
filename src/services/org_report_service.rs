//! Organization report pipeline
//!
//! Drives a [`RecordSource`] through validation, hierarchy construction and
//! the policy traversal. Either a complete report is produced or the run fails
//! before any metric is computed; there is no partial success.

use tracing::{info, instrument};

use crate::domain::errors::DomainResult;
use crate::domain::models::{Hierarchy, PolicyConfig, RawRecord, ReportCollections};
use crate::domain::ports::RecordSource;
use crate::services::{HierarchyBuilder, PolicyEvaluator, RecordValidator, ReportTraversal};

/// Service producing the compensation and depth report for an organization
#[derive(Debug, Clone, Default)]
pub struct OrgReportService {
    validator: RecordValidator,
    builder: HierarchyBuilder,
    traversal: ReportTraversal,
}

impl OrgReportService {
    pub fn new(policy: PolicyConfig) -> Self {
        Self {
            validator: RecordValidator::new(),
            builder: HierarchyBuilder::new(),
            traversal: ReportTraversal::new(PolicyEvaluator::new(policy)),
        }
    }

    /// Replace the hierarchy builder (e.g. with a sequential one)
    pub fn with_builder(mut self, builder: HierarchyBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Validate raw rows and build the hierarchy they describe
    pub fn build_hierarchy(&self, rows: &[RawRecord]) -> DomainResult<Hierarchy> {
        let directory = self.validator.validate_all(rows)?;
        self.builder.build(directory)
    }

    /// Read, validate, build and evaluate in one go
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub fn generate(&self, source: &dyn RecordSource) -> DomainResult<ReportCollections> {
        let rows = source.read_records()?;
        let hierarchy = self.build_hierarchy(&rows)?;
        let report = self.traversal.traverse(&hierarchy);

        info!(
            employees = hierarchy.len(),
            overpaid = report.overpaid().len(),
            underpaid = report.underpaid().len(),
            far_from_root = report.far_from_root().len(),
            "report generated"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::ports::InMemorySource;

    fn row(line: usize, id: &str, salary: &str, manager: &str) -> RawRecord {
        RawRecord::new(line)
            .with_field("Id", id)
            .with_field("firstName", "First")
            .with_field("lastName", "Last")
            .with_field("salary", salary)
            .with_field("managerId", manager)
    }

    #[test]
    fn test_generate_from_memory() {
        let source = InMemorySource::new(vec![
            row(2, "1", "1000", ""),
            row(3, "2", "500", "1"),
            row(4, "3", "100", "2"),
        ]);

        let report = OrgReportService::default().generate(&source).unwrap();
        assert_eq!(report.overpaid().len(), 1);
        assert_eq!(report.overpaid()[0].id, "2");
        assert!(report.underpaid().is_empty());
    }

    #[test]
    fn test_generate_empty_source() {
        let report = OrgReportService::default()
            .generate(&InMemorySource::default())
            .unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_payroll_overflowing_salaries_are_rejected() {
        let source = InMemorySource::new(vec![
            row(2, "1", "60000000000000000000000000000", ""),
            row(3, "2", "60000000000000000000000000000", "1"),
            row(4, "3", "100", "2"),
        ]);

        let result = OrgReportService::default().generate(&source);
        assert!(matches!(result, Err(DomainError::InvalidRecord { line: 2, .. })));
    }

    #[test]
    fn test_maximum_salaries_produce_report() {
        let top = "1000000000000000";
        let source = InMemorySource::new(vec![
            row(2, "1", top, ""),
            row(3, "2", top, "1"),
            row(4, "3", top, "1"),
            row(5, "4", "1", "2"),
        ]);

        let report = OrgReportService::default().generate(&source).unwrap();
        assert_eq!(report.overpaid().len(), 1);
        assert_eq!(report.overpaid()[0].id, "2");
    }

    #[test]
    fn test_invalid_row_aborts_before_building() {
        let source = InMemorySource::new(vec![row(2, "1", "1000", ""), row(3, "2", "x", "1")]);

        let result = OrgReportService::default().generate(&source);
        assert!(matches!(result, Err(DomainError::InvalidRecord { line: 3, .. })));
    }
}
