use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::models::{NodeMetrics, PolicyConfig};

/// Policy classification of one employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolicyVerdict {
    pub is_overpaid: bool,
    pub is_underpaid: bool,
    /// Signed distance from the violated salary band; zero when inside the band
    pub deviation_from_expected_pay: Decimal,
    pub is_far_from_root: bool,
    pub layers_to_root: u32,
}

/// Service evaluating salary-band and depth policy
///
/// Salary bands are multiples of the direct-report average salary:
/// `underpaid_ratio x average <= salary <= overpaid_ratio x average`.
/// Employees without direct reports have no band and are never flagged.
#[derive(Debug, Clone, Default)]
pub struct PolicyEvaluator {
    policy: PolicyConfig,
}

impl PolicyEvaluator {
    pub fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Highest acceptable salary, if the employee has direct reports
    pub fn maximum_accepted_salary(&self, direct_report_average: Option<Decimal>) -> Option<Decimal> {
        direct_report_average.map(|average| band_edge(average, self.policy.overpaid_ratio))
    }

    /// Lowest acceptable salary, if the employee has direct reports
    pub fn minimum_accepted_salary(&self, direct_report_average: Option<Decimal>) -> Option<Decimal> {
        direct_report_average.map(|average| band_edge(average, self.policy.underpaid_ratio))
    }

    pub fn is_overpaid(&self, salary: Decimal, direct_report_average: Option<Decimal>) -> bool {
        self.maximum_accepted_salary(direct_report_average)
            .is_some_and(|maximum| salary > maximum)
    }

    pub fn is_underpaid(&self, salary: Decimal, direct_report_average: Option<Decimal>) -> bool {
        self.minimum_accepted_salary(direct_report_average)
            .is_some_and(|minimum| salary < minimum)
    }

    /// Salary minus the violated band edge; zero inside the band or without reports
    pub fn deviation_from_expected_pay(
        &self,
        salary: Decimal,
        direct_report_average: Option<Decimal>,
    ) -> Decimal {
        match (
            self.maximum_accepted_salary(direct_report_average),
            self.minimum_accepted_salary(direct_report_average),
        ) {
            (Some(maximum), _) if salary > maximum => salary - maximum,
            (_, Some(minimum)) if salary < minimum => salary - minimum,
            _ => Decimal::ZERO,
        }
    }

    pub fn is_far_from_root(&self, depth_from_root: u32) -> bool {
        depth_from_root > self.policy.max_depth_from_root
    }

    /// Managers strictly between the employee and the root
    pub fn layers_to_root(&self, depth_from_root: u32) -> u32 {
        depth_from_root.saturating_sub(1)
    }

    /// Classify an employee from its salary and cached node metrics
    pub fn evaluate(&self, salary: Decimal, metrics: &NodeMetrics) -> PolicyVerdict {
        let average = metrics.direct_report_average_salary;
        PolicyVerdict {
            is_overpaid: self.is_overpaid(salary, average),
            is_underpaid: self.is_underpaid(salary, average),
            deviation_from_expected_pay: self.deviation_from_expected_pay(salary, average),
            is_far_from_root: self.is_far_from_root(metrics.depth_from_root),
            layers_to_root: self.layers_to_root(metrics.depth_from_root),
        }
    }
}

/// `average x ratio`, saturating at `Decimal::MAX` for oversized ratios.
///
/// Both factors are non-negative, so the saturated edge is still an upper
/// bound on every representable salary.
fn band_edge(average: Decimal, ratio: Decimal) -> Decimal {
    average.checked_mul(ratio).unwrap_or(Decimal::MAX)
}
