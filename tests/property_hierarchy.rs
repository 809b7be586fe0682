mod common;

use std::collections::HashSet;

use common::employee;
use orgaudit::domain::models::{EmployeeDirectory, EmployeeRecord, PolicyConfig};
use orgaudit::services::{HierarchyBuilder, PolicyEvaluator, ReportTraversal};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

/// Random tree shapes: entry `i` picks a manager among employees `0..=i`,
/// so every generated organization has exactly one root.
fn org_strategy(max_size: usize) -> impl Strategy<Value = Vec<EmployeeRecord>> {
    (1usize..max_size)
        .prop_flat_map(|size| {
            (
                prop::collection::vec(any::<prop::sample::Index>(), size - 1),
                prop::collection::vec(1_000i64..200_000, size),
            )
        })
        .prop_map(|(managers, salaries)| {
            let mut records = vec![employee("e0", salaries[0], None)];
            for (i, manager) in managers.iter().enumerate() {
                let manager = format!("e{}", manager.index(i + 1));
                records.push(employee(&format!("e{}", i + 1), salaries[i + 1], Some(&manager)));
            }
            records
        })
}

fn directory(records: Vec<EmployeeRecord>) -> Result<EmployeeDirectory, TestCaseError> {
    EmployeeDirectory::from_records(records).map_err(|e| TestCaseError::fail(e.to_string()))
}

proptest! {
    /// Property: every record becomes exactly one node, with one root
    #[test]
    fn prop_build_keeps_every_employee(records in org_strategy(60)) {
        let size = records.len();
        let hierarchy = HierarchyBuilder::new()
            .build(directory(records)?)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(hierarchy.len(), size);
        let roots = hierarchy.nodes().filter(|(_, node)| node.parent().is_none()).count();
        prop_assert_eq!(roots, 1);

        let depth_zero = hierarchy
            .nodes()
            .filter(|(id, _)| hierarchy.node_metrics(*id).depth_from_root == 0)
            .count();
        prop_assert_eq!(depth_zero, 1);

        let visited: HashSet<_> = hierarchy.breadth_first().collect();
        prop_assert_eq!(visited.len(), size);
    }

    /// Property: parallel and sequential construction agree on structure
    #[test]
    fn prop_parallel_matches_sequential(records in org_strategy(60)) {
        let parallel = HierarchyBuilder::new()
            .build(directory(records.clone())?)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let sequential = HierarchyBuilder::sequential()
            .build(directory(records)?)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        for (id, node) in sequential.nodes() {
            let other = parallel
                .find(&node.record().id)
                .ok_or_else(|| TestCaseError::fail("missing node"))?;

            let mut expected: Vec<&str> = node.children().iter().map(|c| sequential[*c].record().id.as_str()).collect();
            let mut actual: Vec<&str> = parallel[other].children().iter().map(|c| parallel[*c].record().id.as_str()).collect();
            expected.sort_unstable();
            actual.sort_unstable();
            prop_assert_eq!(expected, actual);
            prop_assert_eq!(sequential.node_metrics(id), parallel.node_metrics(other));
        }
    }

    /// Property: headcount and payroll add up along the tree
    #[test]
    fn prop_cumulative_metrics_are_consistent(records in org_strategy(60)) {
        let hierarchy = HierarchyBuilder::new()
            .build(directory(records)?)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let root = hierarchy.root().ok_or_else(|| TestCaseError::fail("no root"))?;
        prop_assert_eq!(hierarchy.node_metrics(root).headcount_below_inclusive, hierarchy.len());

        for (id, node) in hierarchy.nodes() {
            let metrics = hierarchy.node_metrics(id);
            let children_headcount: usize = node
                .children()
                .iter()
                .map(|c| hierarchy.node_metrics(*c).headcount_below_inclusive)
                .sum();
            prop_assert_eq!(metrics.headcount_below_inclusive, children_headcount + 1);

            if let Some(parent) = node.parent() {
                prop_assert_eq!(
                    metrics.depth_from_root,
                    hierarchy.node_metrics(parent).depth_from_root + 1
                );
            }
            prop_assert_eq!(metrics.direct_report_average_salary.is_none(), node.is_leaf());
        }
    }

    /// Property: no employee is both over- and underpaid, and the root is never reported
    #[test]
    fn prop_pay_sections_are_exclusive(records in org_strategy(60)) {
        let hierarchy = HierarchyBuilder::new()
            .build(directory(records)?)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let report = ReportTraversal::new(PolicyEvaluator::new(PolicyConfig::default()))
            .traverse(&hierarchy);

        let overpaid: HashSet<&str> = report.overpaid().iter().map(|r| r.id.as_str()).collect();
        let underpaid: HashSet<&str> = report.underpaid().iter().map(|r| r.id.as_str()).collect();

        prop_assert!(overpaid.is_disjoint(&underpaid));
        prop_assert!(!overpaid.contains("e0"));
        prop_assert!(!underpaid.contains("e0"));
        prop_assert!(report.far_from_root().iter().all(|r| r.layers_to_root >= 5));
        prop_assert!(report.overpaid().iter().all(|r| r.deviation_from_expected_pay.is_sign_positive()));
        prop_assert!(report.underpaid().iter().all(|r| r.deviation_from_expected_pay.is_sign_negative()));
    }
}
