//! Classifier queries over the kind taxonomy.
//!
//! Every "is-a" question reduces to [`is_ancestor`] plus the parent table in
//! [`NodeKind::parent`]. None of these functions fail: a kind that reaches the
//! root without matching simply yields `false`.

use super::kind::{NodeKind, Shape};

/// Anything that carries a node kind.
pub trait HasKind {
    fn kind(&self) -> NodeKind;
}

impl HasKind for NodeKind {
    fn kind(&self) -> NodeKind {
        *self
    }
}

/// True iff `base` equals `what` or is a strict ancestor of `what`.
///
/// Reflexive, antisymmetric for distinct kinds, and transitive.
pub fn is_ancestor(what: NodeKind, base: NodeKind) -> bool {
    if base.depth() > what.depth() {
        return false;
    }
    let mut cursor = what;
    let mut steps = 0;
    loop {
        if cursor == base {
            return true;
        }
        match cursor.parent() {
            Some(parent) => cursor = parent,
            None => return false,
        }
        steps += 1;
        // The table is checked at compile time; this only trips if that check
        // is ever bypassed.
        assert!(
            steps <= NodeKind::COUNT,
            "ancestry walk from {what} did not reach the root"
        );
    }
}

/// Dynamic type test: does `node` have `kind` or a descendant of it?
pub fn is_kind<N: HasKind + ?Sized>(node: &N, kind: NodeKind) -> bool {
    is_ancestor(node.kind(), kind)
}

/// True if the node's kind descends from `Positioned`.
pub fn is_positioned<N: HasKind + ?Sized>(node: &N) -> bool {
    is_kind(node, NodeKind::Positioned)
}

/// True if the node's kind is in the authored leaf set.
pub fn is_leaf<N: HasKind + ?Sized>(node: &N) -> bool {
    node.kind().shape() == Shape::Leaf
}

/// Negation of [`is_leaf`]; every kind is in exactly one of the two sets.
pub fn is_composite<N: HasKind + ?Sized>(node: &N) -> bool {
    !is_leaf(node)
}

/// Ids 0 and 1 are reserved sentinels for "absent".
pub fn is_valid_id(id: u32) -> bool {
    id > 1
}

/// Walk `kind, parent(kind), ..., Base`.
pub fn ancestors(kind: NodeKind) -> Ancestors {
    Ancestors { next: Some(kind) }
}

/// Iterator returned by [`ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<NodeKind>,
}

impl Iterator for Ancestors {
    type Item = NodeKind;

    fn next(&mut self) -> Option<NodeKind> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.next.map_or(0, |kind| kind.depth() + 1);
        (len, Some(len))
    }
}

impl ExactSizeIterator for Ancestors {}

impl NodeKind {
    /// `self` is `base` or descends from it.
    pub fn is_a(self, base: NodeKind) -> bool {
        is_ancestor(self, base)
    }

    pub fn is_leaf(self) -> bool {
        self.shape() == Shape::Leaf
    }

    pub fn is_composite(self) -> bool {
        !self.is_leaf()
    }

    pub fn ancestors(self) -> Ancestors {
        ancestors(self)
    }
}
