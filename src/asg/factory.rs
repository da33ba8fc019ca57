//! Node arena, filter side table and shared string table.

use crate::base::{AsgError, AsgResult, StrTable};
use crate::schema::{NodeKind, is_valid_id};

use super::filter::{Filter, FilterState};
use super::node::{Node, NodeId};
use super::reverse::ReverseEdges;

/// First id handed out by [`Factory::create_node`]; 0 and 1 are reserved.
pub(crate) const FIRST_ID: NodeId = 2;

/// Read-only view of the node arena.
///
/// Traversals borrow this while the filter table is borrowed mutably through a
/// [`VisitContext`](crate::visit::VisitContext).
#[derive(Debug, Clone)]
pub struct NodeStore {
    slots: Vec<Option<Node>>,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self {
            slots: vec![None; FIRST_ID as usize],
        }
    }
}

impl NodeStore {
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// One past the largest id ever allocated.
    pub fn id_bound(&self) -> NodeId {
        NodeId::try_from(self.slots.len()).unwrap_or(NodeId::MAX)
    }

    /// Every stored node in id order, filtered or not.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id as usize).and_then(Option::as_mut)
    }

    fn insert(&mut self, node: Node) {
        let index = node.id() as usize;
        if self.slots.len() <= index {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(node);
    }
}

/// Owner of every node of one graph.
///
/// Ids are assigned once, in increasing order, and never reused.
#[derive(Debug, Clone)]
pub struct Factory {
    nodes: NodeStore,
    filter: Filter,
    strings: StrTable,
    root: Option<NodeId>,
    count: usize,
    reverse_edges: Option<ReverseEdges>,
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

impl Factory {
    pub fn new() -> Self {
        let mut filter = Filter::new();
        filter.reserve_id(FIRST_ID - 1);
        Self {
            nodes: NodeStore::default(),
            filter,
            strings: StrTable::new(),
            root: None,
            count: 0,
            reverse_edges: None,
        }
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Create a node of a concrete kind and return its id.
    pub fn create_node(&mut self, kind: NodeKind) -> AsgResult<NodeId> {
        let id = self.nodes.id_bound();
        if id == NodeId::MAX {
            return Err(AsgError::illegal_state(
                "Factory::create_node",
                "node id space exhausted",
            ));
        }
        self.insert_node(Node::new(id, kind), "Factory::create_node")?;
        Ok(id)
    }

    /// Create a node with a caller-chosen id.
    ///
    /// Leaving gaps below the largest id makes the graph unsaveable.
    pub fn create_node_with_id(&mut self, id: NodeId, kind: NodeKind) -> AsgResult<()> {
        self.adopt_node(Node::new(id, kind), "Factory::create_node_with_id")
    }

    /// Store a node built outside the factory, keeping its id.
    pub(crate) fn adopt_node(&mut self, node: Node, location: &'static str) -> AsgResult<()> {
        let id = node.id();
        if !is_valid_id(id) || id == NodeId::MAX {
            return Err(AsgError::illegal_state(location, format!("invalid node id {id}")));
        }
        if self.nodes.contains(id) {
            return Err(AsgError::illegal_state(
                location,
                format!("node {id} already exists"),
            ));
        }
        self.insert_node(node, location)
    }

    fn insert_node(&mut self, node: Node, location: &'static str) -> AsgResult<()> {
        let (id, kind) = (node.id(), node.kind());
        if kind.is_abstract() {
            return Err(AsgError::illegal_state(
                location,
                format!("cannot instantiate abstract kind {kind}"),
            ));
        }
        self.reverse_edges = None;
        self.nodes.insert(node);
        self.filter.reserve_id(id);
        self.count += 1;
        tracing::trace!(id, %kind, "node created");
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> AsgResult<&Node> {
        self.check_id(id, "Factory::node")?;
        self.nodes
            .get(id)
            .ok_or_else(|| AsgError::no_such_element("Factory::node", format!("no node {id}")))
    }

    /// Mutable access drops the cached reverse-edge index.
    pub fn node_mut(&mut self, id: NodeId) -> AsgResult<&mut Node> {
        self.check_id(id, "Factory::node_mut")?;
        self.reverse_edges = None;
        self.nodes
            .get_mut(id)
            .ok_or_else(|| AsgError::no_such_element("Factory::node_mut", format!("no node {id}")))
    }

    fn check_id(&self, id: NodeId, location: &'static str) -> AsgResult<()> {
        if is_valid_id(id) {
            Ok(())
        } else {
            Err(AsgError::illegal_state(location, format!("invalid node id {id}")))
        }
    }

    pub fn exists(&self, id: NodeId) -> bool {
        self.nodes.contains(id)
    }

    pub fn kind_of(&self, id: NodeId) -> AsgResult<NodeKind> {
        Ok(self.node(id)?.kind())
    }

    /// Number of stored nodes, filtered ones included.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Nodes in id order, skipping filtered ones while the filter is on.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(|node| !self.filter.is_filtered(node.id()))
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) -> AsgResult<()> {
        self.check_id(id, "Factory::set_root")?;
        if !self.nodes.contains(id) {
            return Err(AsgError::no_such_element(
                "Factory::set_root",
                format!("no node {id}"),
            ));
        }
        self.root = Some(id);
        Ok(())
    }

    pub fn strings(&self) -> &StrTable {
        &self.strings
    }

    pub fn strings_mut(&mut self) -> &mut StrTable {
        &mut self.strings
    }

    /// Borrow the arena and the filter table separately.
    pub(crate) fn split_mut(&mut self) -> (&NodeStore, &mut Filter, &StrTable) {
        (&self.nodes, &mut self.filter, &self.strings)
    }

    /// Drop every node, filter state and string, keeping the filter switch.
    pub fn clear(&mut self) {
        let on = self.filter.is_on();
        *self = Self::new();
        if !on {
            self.filter.turn_off();
        }
    }

    /// True while a reverse-edge index is cached.
    pub fn has_reverse_edges(&self) -> bool {
        self.reverse_edges.is_some()
    }

    pub fn disable_reverse_edges(&mut self) {
        self.reverse_edges = None;
    }

    pub(crate) fn cached_reverse_edges(&self) -> Option<&ReverseEdges> {
        self.reverse_edges.as_ref()
    }

    pub(crate) fn cache_reverse_edges(&mut self, edges: ReverseEdges) {
        self.reverse_edges = Some(edges);
    }

    pub(crate) fn filter(&self) -> &Filter {
        &self.filter
    }

    pub(crate) fn filter_mut(&mut self) -> &mut Filter {
        &mut self.filter
    }

    // ------------------------------------------------------------------
    // Filter
    // ------------------------------------------------------------------

    pub fn is_filter_on(&self) -> bool {
        self.filter.is_on()
    }

    pub fn turn_filter_on(&mut self) {
        self.filter.turn_on();
    }

    pub fn turn_filter_off(&mut self) {
        self.filter.turn_off();
    }

    /// Run `f` with the filter switched off, then restore the previous switch.
    pub fn with_filter_off<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let was_on = self.filter.is_on();
        self.filter.turn_off();
        let result = f(self);
        if was_on {
            self.filter.turn_on();
        }
        result
    }

    /// False for every node while the filter is off.
    pub fn is_filtered(&self, id: NodeId) -> bool {
        self.filter.is_filtered(id)
    }

    pub fn filter_state(&self, id: NodeId) -> FilterState {
        self.filter.state(id)
    }

    pub fn set_filtered_this_node_only(&mut self, id: NodeId) -> AsgResult<()> {
        self.filter.set_filtered_this_node_only(id)
    }

    pub fn set_not_filtered_this_node_only(&mut self, id: NodeId) -> AsgResult<()> {
        self.filter.set_not_filtered_this_node_only(id)
    }
}
