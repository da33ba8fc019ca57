use crate::asg::{Filter, Node, NodeId};
use crate::base::AsgResult;
use crate::schema::NodeKind;

use super::{Step, VisitContext, Visitor};

/// Filter-table operation applied to each visited node.
pub type Selector = fn(&mut Filter, NodeId) -> AsgResult<()>;

/// Marks or unmarks every node it leaves.
///
/// Fires at the node's concrete kind on exit only. Edges and node storage are
/// never touched.
#[derive(Debug, Clone, Copy)]
pub struct VisitorFilter {
    selector: Selector,
}

impl VisitorFilter {
    pub fn new(mark_filtered: bool) -> Self {
        let selector: Selector = if mark_filtered {
            Filter::set_filtered_this_node_only
        } else {
            Filter::set_not_filtered_this_node_only
        };
        Self { selector }
    }
}

impl Visitor for VisitorFilter {
    fn visit_end(
        &mut self,
        cx: &mut VisitContext<'_>,
        level: NodeKind,
        node: &Node,
    ) -> AsgResult<Step> {
        if level.is_abstract() {
            return Ok(Step::Pass);
        }
        (self.selector)(cx.filter_mut(), node.id())?;
        Ok(Step::Continue)
    }
}
