//! Incoming-edge index.

use rustc_hash::{FxHashMap, FxHashSet};

use super::node::NodeId;

/// One edge pointing at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Incoming {
    /// Node holding the edge.
    pub from: NodeId,
    /// Field slot of the edge on `from`.
    pub slot: usize,
    /// `Child`/`Children` rather than `Ref`/`Refs`.
    pub tree: bool,
}

/// Reverse relation of every edge of a graph.
///
/// Filled by [`VisitorReverseEdges`](crate::visit::VisitorReverseEdges) and
/// cached by the factory until a node is created or handed out mutably.
#[derive(Debug, Clone, Default)]
pub struct ReverseEdges {
    incoming: FxHashMap<NodeId, Vec<Incoming>>,
    edges: usize,
}

impl ReverseEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edges pointing at `id`, in the order they were recorded.
    pub fn incoming(&self, id: NodeId) -> &[Incoming] {
        self.incoming
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// First recorded node holding a tree edge to `id`.
    pub fn tree_parent(&self, id: NodeId) -> Option<NodeId> {
        self.incoming(id)
            .iter()
            .find(|edge| edge.tree)
            .map(|edge| edge.from)
    }

    /// Tree parents of `id` up to the top of its tree, nearest first.
    pub fn tree_ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();
        let mut cursor = id;
        while let Some(parent) = self.tree_parent(cursor) {
            if !seen.insert(parent) {
                tracing::warn!(id, parent, "tree edges form a cycle");
                break;
            }
            chain.push(parent);
            cursor = parent;
        }
        chain
    }

    /// Nodes referring to `id` through cross edges.
    pub fn referrers(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incoming(id)
            .iter()
            .filter(|edge| !edge.tree)
            .map(|edge| edge.from)
    }

    /// Number of recorded edges.
    pub fn len(&self) -> usize {
        self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.edges == 0
    }

    pub(crate) fn insert_edge(&mut self, to: NodeId, edge: Incoming) {
        self.incoming.entry(to).or_default().push(edge);
        self.edges += 1;
    }
}
