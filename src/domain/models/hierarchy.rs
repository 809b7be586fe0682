//! Organization hierarchy domain models
//!
//! The hierarchy is an arena of [`Node`]s addressed by [`NodeId`]. Parent links
//! are plain indices and child lists are owned vectors on the parent, so the
//! tree holds no reference cycles. A [`Hierarchy`] is frozen once built: it is
//! `Send + Sync`, holds no locks, and can be shared freely between readers.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::ops::Index;
use std::sync::OnceLock;

use serde::Serialize;

use super::employee::EmployeeRecord;
use super::metrics::{HierarchyMetrics, NodeMetrics};

/// Stable arena index of a node within its [`Hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single employee in the hierarchy
#[derive(Debug, Clone)]
pub struct Node {
    record: EmployeeRecord,
    parent: Option<NodeId>,
    /// Direct reports in attachment order
    children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(record: EmployeeRecord, parent: Option<NodeId>, children: Vec<NodeId>) -> Self {
        Self {
            record,
            parent,
            children,
        }
    }

    pub fn record(&self) -> &EmployeeRecord {
        &self.record
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A frozen, single-rooted organization tree.
#[derive(Debug, Default)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    index: HashMap<String, NodeId>,
    metrics: OnceLock<HierarchyMetrics>,
}

impl Hierarchy {
    /// The hierarchy of an empty organization: no nodes and no root
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble a hierarchy from already linked nodes.
    ///
    /// Node `i` must live at `NodeId::new(i)`; links are trusted as given.
    pub(crate) fn from_parts(nodes: Vec<Node>, root: Option<NodeId>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.record.id.clone(), NodeId::new(i)))
            .collect();

        Self {
            nodes,
            root,
            index,
            metrics: OnceLock::new(),
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&Node> {
        self.root.map(|id| &self[id])
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Look up a node by employee identity
    pub fn find(&self, employee_id: &str) -> Option<NodeId> {
        self.index.get(employee_id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i), node))
    }

    /// Level-by-level walk starting at the root (root included).
    pub fn breadth_first(&self) -> BreadthFirst<'_> {
        BreadthFirst::new(self, self.root)
    }

    /// Metrics for every node, computed in one pass on first access.
    pub fn metrics(&self) -> &HierarchyMetrics {
        self.metrics.get_or_init(|| HierarchyMetrics::compute(self))
    }

    /// Cached metrics of a single node
    pub fn node_metrics(&self, id: NodeId) -> &NodeMetrics {
        &self.metrics()[id]
    }
}

impl Index<NodeId> for Hierarchy {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

/// Breadth-first iterator over node ids.
///
/// Children are visited in attachment order. Only nodes reachable from the
/// start node are produced, so it always terminates on a frozen hierarchy.
pub struct BreadthFirst<'a> {
    hierarchy: &'a Hierarchy,
    queue: VecDeque<NodeId>,
}

impl<'a> BreadthFirst<'a> {
    fn new(hierarchy: &'a Hierarchy, start: Option<NodeId>) -> Self {
        Self {
            hierarchy,
            queue: start.into_iter().collect(),
        }
    }
}

impl Iterator for BreadthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        self.queue
            .extend(self.hierarchy[id].children.iter().copied());
        Some(id)
    }
}
