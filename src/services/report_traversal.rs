use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::models::{EmployeeResult, Hierarchy, ReportCollections};
use crate::services::policy_evaluator::PolicyEvaluator;

/// Service walking a hierarchy and partitioning employees into report sections
#[derive(Debug, Clone, Default)]
pub struct ReportTraversal {
    evaluator: PolicyEvaluator,
}

impl ReportTraversal {
    pub fn new(evaluator: PolicyEvaluator) -> Self {
        Self { evaluator }
    }

    /// Evaluate every employee except the root, level by level.
    ///
    /// Each visited employee yields exactly one result. Over- and underpaid
    /// are exclusive; far-from-root is independent and shares the same `Arc`.
    #[instrument(skip_all, fields(employees = hierarchy.len()))]
    pub fn traverse(&self, hierarchy: &Hierarchy) -> ReportCollections {
        let mut overpaid = Vec::new();
        let mut underpaid = Vec::new();
        let mut far_from_root = Vec::new();

        for id in hierarchy.breadth_first().skip(1) {
            let record = hierarchy[id].record();
            let verdict = self
                .evaluator
                .evaluate(record.salary, hierarchy.node_metrics(id));

            let result = Arc::new(EmployeeResult::from_record(
                record,
                verdict.deviation_from_expected_pay,
                verdict.layers_to_root,
            ));

            if verdict.is_overpaid {
                overpaid.push(Arc::clone(&result));
            } else if verdict.is_underpaid {
                underpaid.push(Arc::clone(&result));
            }

            if verdict.is_far_from_root {
                far_from_root.push(result);
            }
        }

        debug!(
            overpaid = overpaid.len(),
            underpaid = underpaid.len(),
            far_from_root = far_from_root.len(),
            "hierarchy traversed"
        );
        ReportCollections::new(overpaid, underpaid, far_from_root)
    }
}
