//! Depth-first walk driving a [`Visitor`].
//!
//! Nodes are entered in pre-order and left in post-order. Children are walked
//! left to right in field order. The walk is iterative, so deep trees do not
//! grow the call stack.

use rustc_hash::FxHashSet;

use crate::asg::{Factory, Node, NodeId, NodeStore};
use crate::base::{AsgError, AsgResult};
use crate::visit::{VisitContext, Visitor, dispatch};

/// Options for [`Preorder`]. Everything is off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreorderOptions {
    /// Enter every node at most once.
    pub safe_mode: bool,
    /// Also walk the targets of `Ref`/`Refs` fields. Each target is walked
    /// through a cross edge at most once per run.
    pub visit_cross_edges: bool,
    /// After the root's subtree, walk every node not reached yet, in id order.
    pub visit_special_nodes: bool,
    /// Walk filtered nodes even while the filter is on.
    pub visit_filtered: bool,
}

/// Pre-order traversal driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preorder {
    options: PreorderOptions,
}

enum Frame {
    Enter(NodeId),
    Exit(NodeId),
}

#[derive(Default)]
struct WalkState {
    seen: FxHashSet<NodeId>,
    cross_walked: FxHashSet<NodeId>,
    entered: usize,
}

impl Preorder {
    pub fn new(options: PreorderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> PreorderOptions {
        self.options
    }

    /// Walk from the factory's root. Returns the number of nodes entered.
    ///
    /// Without a root only special nodes (if enabled) are walked.
    pub fn run<V: Visitor + ?Sized>(&self, factory: &mut Factory, visitor: &mut V) -> AsgResult<usize> {
        let root = factory.root();
        let (nodes, filter, strings) = factory.split_mut();
        let mut cx = VisitContext::new(nodes, filter, strings);
        let mut state = WalkState::default();

        match root {
            Some(root) => {
                if !self.options.visit_filtered && cx.filter().is_filtered(root) {
                    tracing::warn!(root, "root is filtered; its subtree is skipped");
                }
                self.walk(&mut state, nodes, &mut cx, visitor, root)?;
            }
            None => tracing::debug!("graph has no root"),
        }

        if self.options.visit_special_nodes {
            for node in nodes.iter() {
                if !state.seen.contains(&node.id()) {
                    self.walk(&mut state, nodes, &mut cx, visitor, node.id())?;
                }
            }
        }

        tracing::debug!(entered = state.entered, options = ?self.options, "preorder run finished");
        Ok(state.entered)
    }

    /// Walk the subtree under `start`. Returns the number of nodes entered.
    pub fn run_from<V: Visitor + ?Sized>(
        &self,
        factory: &mut Factory,
        start: NodeId,
        visitor: &mut V,
    ) -> AsgResult<usize> {
        factory.node(start)?;
        let (nodes, filter, strings) = factory.split_mut();
        let mut cx = VisitContext::new(nodes, filter, strings);
        let mut state = WalkState::default();
        self.walk(&mut state, nodes, &mut cx, visitor, start)?;
        tracing::debug!(start, entered = state.entered, "preorder run finished");
        Ok(state.entered)
    }

    fn walk<V: Visitor + ?Sized>(
        &self,
        state: &mut WalkState,
        nodes: &NodeStore,
        cx: &mut VisitContext<'_>,
        visitor: &mut V,
        start: NodeId,
    ) -> AsgResult<()> {
        let mut stack = vec![Frame::Enter(start)];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(id) => {
                    let node = lookup(nodes, id)?;
                    if !self.options.visit_filtered && cx.filter().is_filtered(id) {
                        tracing::trace!(id, "skipping filtered node");
                        continue;
                    }
                    let first_time = state.seen.insert(id);
                    if self.options.safe_mode && !first_time {
                        continue;
                    }
                    dispatch::enter(visitor, cx, node, true)?;
                    state.entered += 1;
                    stack.push(Frame::Exit(id));

                    let mut next: Vec<NodeId> = node.tree_children().collect();
                    if self.options.visit_cross_edges {
                        next.extend(
                            node.cross_references()
                                .filter(|target| state.cross_walked.insert(*target)),
                        );
                    }
                    stack.extend(next.into_iter().rev().map(Frame::Enter));
                }
                Frame::Exit(id) => {
                    let node = lookup(nodes, id)?;
                    dispatch::exit(visitor, cx, node, true)?;
                }
            }
        }
        Ok(())
    }
}

fn lookup(nodes: &NodeStore, id: NodeId) -> AsgResult<&Node> {
    nodes.get(id).ok_or_else(|| {
        AsgError::no_such_element("Preorder::walk", format!("edge to missing node {id}"))
    })
}
