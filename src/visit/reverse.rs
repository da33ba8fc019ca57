use crate::asg::{Incoming, Node, ReverseEdges};
use crate::base::AsgResult;
use crate::schema::{NodeKind, is_valid_id};

use super::{Step, VisitContext, Visitor};

/// Records every set edge of each entered node into a [`ReverseEdges`] index.
pub struct VisitorReverseEdges<'a> {
    edges: &'a mut ReverseEdges,
}

impl<'a> VisitorReverseEdges<'a> {
    pub fn new(edges: &'a mut ReverseEdges) -> Self {
        Self { edges }
    }
}

impl Visitor for VisitorReverseEdges<'_> {
    fn visit(&mut self, _cx: &mut VisitContext<'_>, level: NodeKind, node: &Node) -> AsgResult<Step> {
        if level != NodeKind::ROOT {
            return Ok(Step::Pass);
        }
        for (slot, field) in node.fields().iter().enumerate() {
            if !field.is_tree_edge() && !field.is_cross_edge() {
                continue;
            }
            let tree = field.is_tree_edge();
            for &to in field.targets().iter().filter(|id| is_valid_id(**id)) {
                self.edges.insert_edge(
                    to,
                    Incoming {
                        from: node.id(),
                        slot,
                        tree,
                    },
                );
            }
        }
        Ok(Step::Continue)
    }
}
