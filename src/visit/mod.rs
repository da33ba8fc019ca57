//! Visitor dispatch over the kind taxonomy.
//!
//! A [`Visitor`] sees each node once per ancestor level of its kind. The
//! [`dispatch`] functions walk the chain `kind → parent → … → Base` and call the
//! visitor at every level; a level the visitor does not handle answers
//! [`Step::Pass`]. With `cascade` set, every handled level fires, most-derived
//! first. Without it, dispatch stops after the first handled level.

pub mod dispatch;
mod filter;
mod handlers;
mod reverse;
mod save;
mod subtree;

pub use filter::{Selector, VisitorFilter};
pub use handlers::HandlerVisitor;
pub use reverse::VisitorReverseEdges;
pub use save::VisitorSave;
pub use subtree::VisitorSubtreeCollector;

use crate::asg::{Filter, Node, NodeId, NodeStore};
use crate::base::{AsgResult, StrTable};
use crate::schema::NodeKind;

/// What a handler tells the dispatcher after running at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No handler at this level; try the next one up.
    Pass,
    /// Handled; keep forwarding upward when cascading.
    Continue,
    /// Handled; do not forward to any further ancestor level.
    Stop,
}

/// State a visitor may read or change during a walk.
///
/// Passed explicitly to every handler, so visitors never reach for shared
/// state on their own.
pub struct VisitContext<'a> {
    nodes: &'a NodeStore,
    filter: &'a mut Filter,
    strings: &'a StrTable,
}

impl<'a> VisitContext<'a> {
    pub fn new(nodes: &'a NodeStore, filter: &'a mut Filter, strings: &'a StrTable) -> Self {
        Self {
            nodes,
            filter,
            strings,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&'a Node> {
        self.nodes.get(id)
    }

    pub fn filter(&self) -> &Filter {
        &*self.filter
    }

    pub fn filter_mut(&mut self) -> &mut Filter {
        &mut *self.filter
    }

    pub fn strings(&self) -> &'a StrTable {
        self.strings
    }
}

/// Per-level node handlers.
///
/// `level` is the ancestor kind currently being dispatched; `node.kind()` is
/// always the node's own concrete kind. Default implementations handle nothing.
pub trait Visitor {
    /// Called before the node's children are walked.
    fn visit(
        &mut self,
        _cx: &mut VisitContext<'_>,
        _level: NodeKind,
        _node: &Node,
    ) -> AsgResult<Step> {
        Ok(Step::Pass)
    }

    /// Called after the node's children are walked.
    fn visit_end(
        &mut self,
        _cx: &mut VisitContext<'_>,
        _level: NodeKind,
        _node: &Node,
    ) -> AsgResult<Step> {
        Ok(Step::Pass)
    }
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    fn visit(&mut self, cx: &mut VisitContext<'_>, level: NodeKind, node: &Node) -> AsgResult<Step> {
        (**self).visit(cx, level, node)
    }

    fn visit_end(
        &mut self,
        cx: &mut VisitContext<'_>,
        level: NodeKind,
        node: &Node,
    ) -> AsgResult<Step> {
        (**self).visit_end(cx, level, node)
    }
}
