//! Per-node hierarchy metrics
//!
//! Metrics are derived in a single pass over a frozen hierarchy: depth flows
//! top-down in breadth-first order, cumulative headcount and payroll flow
//! bottom-up in reverse breadth-first order, and averages come straight from
//! the immediate child lists.

use std::ops::Index;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::hierarchy::{Hierarchy, NodeId};

/// Decimal places kept for salary averages
pub const AVERAGE_SCALE: u32 = 2;

/// Mean of `total` over `count` items, rounded half-up to two decimal places.
pub fn average_salary(total: Decimal, count: usize) -> Option<Decimal> {
    if count == 0 {
        return None;
    }
    let mut average = (total / Decimal::from(count))
        .round_dp_with_strategy(AVERAGE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    average.rescale(AVERAGE_SCALE);
    Some(average)
}

/// Cached metrics of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeMetrics {
    /// Mean salary of direct reports; `None` for leaves
    pub direct_report_average_salary: Option<Decimal>,
    /// This node plus everyone below it
    pub headcount_below_inclusive: usize,
    /// Own salary plus the salaries of everyone below
    pub payroll_below_inclusive: Decimal,
    /// Mean salary of everyone strictly below; `None` for leaves
    pub subordinate_average_salary: Option<Decimal>,
    /// 0 for the root
    pub depth_from_root: u32,
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self {
            direct_report_average_salary: None,
            headcount_below_inclusive: 1,
            payroll_below_inclusive: Decimal::ZERO,
            subordinate_average_salary: None,
            depth_from_root: 0,
        }
    }
}

/// Metrics for every node of a hierarchy, indexed by [`NodeId`].
#[derive(Debug, Clone, Default)]
pub struct HierarchyMetrics {
    nodes: Vec<NodeMetrics>,
}

impl HierarchyMetrics {
    /// Run the metrics pass over a fully built hierarchy.
    pub fn compute(hierarchy: &Hierarchy) -> Self {
        let mut nodes = vec![NodeMetrics::default(); hierarchy.len()];
        let order: Vec<NodeId> = hierarchy.breadth_first().collect();

        // Top-down: a parent is always visited before its children.
        for &id in &order {
            if let Some(parent) = hierarchy[id].parent() {
                nodes[id.index()].depth_from_root = nodes[parent.index()].depth_from_root + 1;
            }
        }

        // Bottom-up: children are finalized before their parent. Directory
        // salaries are capped at MAX_SALARY_UNITS, so the sums cannot overflow.
        for &id in order.iter().rev() {
            let node = &hierarchy[id];
            let salary = node.record().salary;

            let mut headcount = 1;
            let mut payroll = salary;
            let mut direct_total = Decimal::ZERO;
            for child in node.children() {
                let child_metrics = &nodes[child.index()];
                headcount += child_metrics.headcount_below_inclusive;
                payroll += child_metrics.payroll_below_inclusive;
                direct_total += hierarchy[*child].record().salary;
            }

            let metrics = &mut nodes[id.index()];
            metrics.headcount_below_inclusive = headcount;
            metrics.payroll_below_inclusive = payroll;
            metrics.direct_report_average_salary =
                average_salary(direct_total, node.children().len());
            metrics.subordinate_average_salary = average_salary(payroll - salary, headcount - 1);
        }

        Self { nodes }
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeMetrics> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Index<NodeId> for HierarchyMetrics {
    type Output = NodeMetrics;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_average_salary_rounds_half_up() {
        assert_eq!(average_salary(dec!(0.05), 2), Some(dec!(0.03)));
        assert_eq!(average_salary(dec!(100), 3), Some(dec!(33.33)));
        assert_eq!(average_salary(dec!(200), 3), Some(dec!(66.67)));
    }

    #[test]
    fn test_average_salary_keeps_two_decimal_places() {
        let average = average_salary(dec!(92000), 2).unwrap();
        assert_eq!(average.to_string(), "46000.00");
    }

    #[test]
    fn test_average_salary_of_nothing_is_undefined() {
        assert_eq!(average_salary(Decimal::ZERO, 0), None);
    }
}
