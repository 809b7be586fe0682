//! Hierarchy Builder Service
//!
//! Turns an identity-unique [`EmployeeDirectory`] into a frozen, single-rooted
//! [`Hierarchy`]. Records are placed concurrently: root candidates race for
//! the root slot through one compare-and-swap, and every other record appends
//! itself to its manager's child list under that manager's own lock, so
//! attachments to different managers never serialize.
//!
//! Violations are detected during the parallel phase but reported afterwards
//! in a deterministic order (lowest input position first), so the same input
//! always fails with the same error.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{EmployeeDirectory, EmployeeRecord, Hierarchy, Node, NodeId};

/// Sentinel stored in the root slot until a candidate claims it
const UNCLAIMED: usize = usize::MAX;

/// Outcome of placing one record during the attach phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Won the root slot
    Root,
    /// Attached under the given manager
    Child(NodeId),
    /// Had no manager but another candidate already holds the root slot
    RootTaken,
    /// Manager id does not exist in the directory
    DanglingManager,
}

/// Shared state of one build: the root slot and one child list per node
struct AttachState {
    root: AtomicUsize,
    children: Vec<Mutex<Vec<NodeId>>>,
}

impl AttachState {
    fn new(len: usize) -> Self {
        Self {
            root: AtomicUsize::new(UNCLAIMED),
            children: (0..len).map(|_| Mutex::new(Vec::new())).collect(),
        }
    }

    fn claim_root(&self, position: usize) -> bool {
        self.root
            .compare_exchange(UNCLAIMED, position, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn attach(&self, manager: usize, child: NodeId) {
        self.children[manager]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(child);
    }

    fn root(&self) -> Option<NodeId> {
        match self.root.load(Ordering::Acquire) {
            UNCLAIMED => None,
            position => Some(NodeId::new(position)),
        }
    }
}

/// Service for building the organization hierarchy
///
/// # Examples
///
/// ```
/// use orgaudit::domain::models::{EmployeeDirectory, EmployeeRecord};
/// use orgaudit::services::HierarchyBuilder;
/// use rust_decimal::Decimal;
///
/// let record = |id: &str, manager: Option<&str>| EmployeeRecord {
///     id: id.to_string(),
///     first_name: "First".to_string(),
///     last_name: "Last".to_string(),
///     salary: Decimal::from(1000),
///     manager_id: manager.map(str::to_string),
/// };
/// let directory =
///     EmployeeDirectory::from_records(vec![record("1", None), record("2", Some("1"))]).unwrap();
///
/// let hierarchy = HierarchyBuilder::new().build(directory).unwrap();
/// assert_eq!(hierarchy.root_node().unwrap().children().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct HierarchyBuilder {
    parallel: bool,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyBuilder {
    /// Create a builder that places records on the rayon thread pool
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Create a builder that places records one by one in input order.
    ///
    /// Child lists then follow input order, which makes report order reproducible.
    pub fn sequential() -> Self {
        Self { parallel: false }
    }

    pub fn with_parallelism(parallel: bool) -> Self {
        Self { parallel }
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Build the hierarchy
    ///
    /// # Returns
    ///
    /// * `Ok(Hierarchy)` - Single-rooted tree; empty when the directory is empty
    /// * `Err(ManagerNotFound)` - A record names a manager absent from the directory
    /// * `Err(MultipleRoots)` - More than one record has no manager
    /// * `Err(NoRootFound)` - Every record has a manager
    /// * `Err(ManagementCycle)` - Some manager chain loops without reaching the root
    #[instrument(skip_all, fields(employees = directory.len(), parallel = self.parallel))]
    pub fn build(&self, directory: EmployeeDirectory) -> DomainResult<Hierarchy> {
        if directory.is_empty() {
            debug!("empty directory, building empty hierarchy");
            return Ok(Hierarchy::empty());
        }

        let state = AttachState::new(directory.len());
        let placements: Vec<Placement> = if self.parallel {
            directory
                .records()
                .par_iter()
                .enumerate()
                .map(|(position, record)| place(position, record, &directory, &state))
                .collect()
        } else {
            directory
                .records()
                .iter()
                .enumerate()
                .map(|(position, record)| place(position, record, &directory, &state))
                .collect()
        };

        if let Some(violation) = first_violation(&directory, &placements) {
            warn!(error = %violation, "hierarchy construction failed");
            return Err(violation);
        }

        let Some(root) = state.root() else {
            warn!("no root candidate in a non-empty directory");
            return Err(DomainError::NoRootFound);
        };

        let nodes: Vec<Node> = directory
            .into_records()
            .into_iter()
            .zip(state.children)
            .zip(placements)
            .map(|((record, children), placement)| {
                let parent = match placement {
                    Placement::Child(manager) => Some(manager),
                    _ => None,
                };
                let children = children.into_inner().unwrap_or_else(PoisonError::into_inner);
                Node::new(record, parent, children)
            })
            .collect();

        let hierarchy = Hierarchy::from_parts(nodes, Some(root));
        ensure_acyclic(&hierarchy)?;

        info!(
            employees = hierarchy.len(),
            root = %hierarchy[root].record().id,
            "hierarchy built"
        );
        Ok(hierarchy)
    }
}

/// Place one record: claim the root slot or attach under the manager
fn place(
    position: usize,
    record: &EmployeeRecord,
    directory: &EmployeeDirectory,
    state: &AttachState,
) -> Placement {
    let Some(manager_id) = record.manager_id.as_deref() else {
        return if state.claim_root(position) {
            Placement::Root
        } else {
            Placement::RootTaken
        };
    };

    match directory.position(manager_id) {
        Some(manager) => {
            state.attach(manager, NodeId::new(position));
            Placement::Child(NodeId::new(manager))
        }
        None => Placement::DanglingManager,
    }
}

/// Pick the reported violation independently of scheduling.
///
/// Dangling managers are reported at their own input position. A root
/// conflict is reported at the second root candidate in input order and names
/// the first two candidates, whichever candidate actually won the slot.
fn first_violation(directory: &EmployeeDirectory, placements: &[Placement]) -> Option<DomainError> {
    let records = directory.records();
    let mut candidates = placements
        .iter()
        .enumerate()
        .filter(|(_, placement)| matches!(placement, Placement::Root | Placement::RootTaken))
        .map(|(position, _)| position);
    let first_candidate = candidates.next();
    let second_candidate = candidates.next();

    placements
        .iter()
        .enumerate()
        .find_map(|(position, placement)| match (placement, first_candidate) {
            (Placement::DanglingManager, _) => Some(DomainError::ManagerNotFound {
                employee: records[position].id.clone(),
                manager: records[position].manager_id.clone().unwrap_or_default(),
            }),
            (_, Some(first)) if second_candidate == Some(position) => {
                Some(DomainError::MultipleRoots {
                    first: records[first].id.clone(),
                    second: records[position].id.clone(),
                })
            }
            _ => None,
        })
}

/// Every node must be reachable from the root.
///
/// With exactly one root and every manager resolved, an unreachable node can
/// only sit on (or hang below) a loop of managers.
fn ensure_acyclic(hierarchy: &Hierarchy) -> DomainResult<()> {
    let mut reachable = vec![false; hierarchy.len()];
    for id in hierarchy.breadth_first() {
        reachable[id.index()] = true;
    }

    let Some(stray) = reachable.iter().position(|seen| !seen) else {
        return Ok(());
    };

    let cycle = cycle_from(hierarchy, NodeId::new(stray));
    warn!(cycle = ?cycle, "management cycle detected");
    Err(DomainError::ManagementCycle(cycle))
}

/// Follow manager links from `start` until a node repeats; return the loop.
fn cycle_from(hierarchy: &Hierarchy, start: NodeId) -> Vec<String> {
    let mut path: Vec<NodeId> = Vec::new();
    let mut current = Some(start);

    while let Some(id) = current {
        if let Some(loop_start) = path.iter().position(|&seen| seen == id) {
            path.drain(..loop_start);
            break;
        }
        path.push(id);
        current = hierarchy[id].parent();
    }

    path.into_iter()
        .map(|id| hierarchy[id].record().id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record(id: &str, manager: Option<&str>) -> EmployeeRecord {
        EmployeeRecord {
            id: id.to_string(),
            first_name: format!("{id}-first"),
            last_name: format!("{id}-last"),
            salary: Decimal::from(1000),
            manager_id: manager.map(str::to_string),
        }
    }

    fn directory(records: Vec<EmployeeRecord>) -> EmployeeDirectory {
        EmployeeDirectory::from_records(records).unwrap()
    }

    fn five_people() -> EmployeeDirectory {
        directory(vec![
            record("123", None),
            record("124", Some("123")),
            record("125", Some("123")),
            record("300", Some("124")),
            record("305", Some("300")),
        ])
    }

    #[test]
    fn test_build_links_parents_and_children() {
        let hierarchy = HierarchyBuilder::new().build(five_people()).unwrap();

        let root = hierarchy.root().unwrap();
        assert_eq!(hierarchy[root].record().id, "123");
        assert_eq!(hierarchy[root].children().len(), 2);
        assert_eq!(hierarchy[root].parent(), None);

        let brett = hierarchy.find("305").unwrap();
        assert_eq!(hierarchy[brett].parent(), hierarchy.find("300"));
        assert!(hierarchy[brett].is_leaf());
        assert_eq!(hierarchy.breadth_first().count(), 5);
    }

    #[test]
    fn test_sequential_build_keeps_input_order() {
        let hierarchy = HierarchyBuilder::sequential().build(five_people()).unwrap();
        let children: Vec<&str> = hierarchy
            .root_node()
            .unwrap()
            .children()
            .iter()
            .map(|&id| hierarchy[id].record().id.as_str())
            .collect();

        assert_eq!(children, vec!["124", "125"]);
    }

    #[test]
    fn test_empty_directory_builds_empty_hierarchy() {
        let hierarchy = HierarchyBuilder::new()
            .build(EmployeeDirectory::default())
            .unwrap();

        assert!(hierarchy.is_empty());
        assert!(hierarchy.root().is_none());
    }

    #[test]
    fn test_manager_not_found() {
        let result = HierarchyBuilder::new().build(directory(vec![
            record("123", None),
            record("124", Some("100")),
            record("125", Some("123")),
        ]));

        match result {
            Err(DomainError::ManagerNotFound { employee, manager }) => {
                assert_eq!(employee, "124");
                assert_eq!(manager, "100");
            }
            other => panic!("Expected ManagerNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_roots_names_first_two_candidates() {
        for _ in 0..20 {
            let result = HierarchyBuilder::new().build(directory(vec![
                record("123", None),
                record("124", Some("123")),
                record("300", None),
                record("305", Some("300")),
                record("400", None),
            ]));

            match result {
                Err(DomainError::MultipleRoots { first, second }) => {
                    assert_eq!(first, "123");
                    assert_eq!(second, "300");
                }
                other => panic!("Expected MultipleRoots, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_lowest_position_violation_wins() {
        // Dangling manager at position 1 precedes the second root at position 2.
        let result = HierarchyBuilder::new().build(directory(vec![
            record("1", None),
            record("2", Some("missing")),
            record("3", None),
        ]));
        assert!(matches!(result, Err(DomainError::ManagerNotFound { .. })));

        // Second root at position 1 precedes the dangling manager at position 2.
        let result = HierarchyBuilder::new().build(directory(vec![
            record("1", None),
            record("3", None),
            record("2", Some("missing")),
        ]));
        assert!(matches!(result, Err(DomainError::MultipleRoots { .. })));
    }

    #[test]
    fn test_no_root_found() {
        let result = HierarchyBuilder::new().build(directory(vec![
            record("123", Some("305")),
            record("124", Some("123")),
            record("300", Some("124")),
            record("305", Some("300")),
        ]));

        assert!(matches!(result, Err(DomainError::NoRootFound)));
    }

    #[test]
    fn test_detached_cycle_is_rejected() {
        let result = HierarchyBuilder::new().build(directory(vec![
            record("ceo", None),
            record("a", Some("ceo")),
            record("x", Some("z")),
            record("y", Some("x")),
            record("z", Some("y")),
        ]));

        match result {
            Err(DomainError::ManagementCycle(cycle)) => {
                assert_eq!(cycle, vec!["x", "z", "y"]);
            }
            other => panic!("Expected ManagementCycle, got {other:?}"),
        }
    }

    #[test]
    fn test_self_managed_employee_is_a_cycle() {
        let result = HierarchyBuilder::new().build(directory(vec![
            record("ceo", None),
            record("loner", Some("loner")),
        ]));

        match result {
            Err(DomainError::ManagementCycle(cycle)) => assert_eq!(cycle, vec!["loner"]),
            other => panic!("Expected ManagementCycle, got {other:?}"),
        }
    }

    #[test]
    fn test_parallel_build_attaches_every_report() {
        let mut records = vec![record("boss", None)];
        records.extend((0..500).map(|i| record(&format!("e{i}"), Some("boss"))));

        let hierarchy = HierarchyBuilder::new().build(directory(records)).unwrap();

        let mut children: Vec<usize> = hierarchy
            .root_node()
            .unwrap()
            .children()
            .iter()
            .map(|id| id.index())
            .collect();
        children.sort_unstable();
        assert_eq!(children, (1..=500).collect::<Vec<_>>());
    }
}
