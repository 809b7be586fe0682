//! Report output models

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use super::employee::EmployeeRecord;

/// Evaluation outcome for one non-root employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeResult {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub salary: Decimal,
    pub manager_id: Option<String>,
    /// Signed amount above the upper band or below the lower band; zero inside the band
    pub deviation_from_expected_pay: Decimal,
    /// Management levels strictly between this employee and the root
    pub layers_to_root: u32,
}

impl EmployeeResult {
    pub fn from_record(record: &EmployeeRecord, deviation: Decimal, layers_to_root: u32) -> Self {
        Self {
            id: record.id.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            salary: record.salary,
            manager_id: record.manager_id.clone(),
            deviation_from_expected_pay: deviation,
            layers_to_root,
        }
    }
}

/// The three report sections.
///
/// A result flagged in more than one section is the same shared `Arc` in each.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportCollections {
    overpaid: Vec<Arc<EmployeeResult>>,
    underpaid: Vec<Arc<EmployeeResult>>,
    far_from_root: Vec<Arc<EmployeeResult>>,
}

impl ReportCollections {
    pub fn new(
        overpaid: Vec<Arc<EmployeeResult>>,
        underpaid: Vec<Arc<EmployeeResult>>,
        far_from_root: Vec<Arc<EmployeeResult>>,
    ) -> Self {
        Self {
            overpaid,
            underpaid,
            far_from_root,
        }
    }

    pub fn overpaid(&self) -> &[Arc<EmployeeResult>] {
        &self.overpaid
    }

    pub fn underpaid(&self) -> &[Arc<EmployeeResult>] {
        &self.underpaid
    }

    pub fn far_from_root(&self) -> &[Arc<EmployeeResult>] {
        &self.far_from_root
    }

    pub fn is_empty(&self) -> bool {
        self.overpaid.is_empty() && self.underpaid.is_empty() && self.far_from_root.is_empty()
    }
}
