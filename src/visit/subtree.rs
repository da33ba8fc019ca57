use crate::asg::{Node, NodeId};
use crate::base::AsgResult;
use crate::schema::NodeKind;

use super::{Step, VisitContext, Visitor};

/// Appends the id of every entered node, in walk order.
///
/// Revisits are appended again; the result is a sequence, not a set.
pub struct VisitorSubtreeCollector<'a> {
    ids: &'a mut Vec<NodeId>,
}

impl<'a> VisitorSubtreeCollector<'a> {
    pub fn new(ids: &'a mut Vec<NodeId>) -> Self {
        Self { ids }
    }
}

impl Visitor for VisitorSubtreeCollector<'_> {
    fn visit(&mut self, _cx: &mut VisitContext<'_>, level: NodeKind, node: &Node) -> AsgResult<Step> {
        if level != NodeKind::ROOT {
            return Ok(Step::Pass);
        }
        self.ids.push(node.id());
        Ok(Step::Continue)
    }
}
