//! Subtree filtering on the factory, driven by [`VisitorFilter`].

use crate::asg::{Factory, NodeId};
use crate::base::AsgResult;
use crate::visit::VisitorFilter;

use super::preorder::{Preorder, PreorderOptions};

impl Factory {
    /// Filter `id` and every tree descendant of it.
    pub fn set_filtered(&mut self, id: NodeId) -> AsgResult<()> {
        self.mark_subtree(id, true)
    }

    /// Unfilter `id`, every tree descendant and every tree ancestor of it.
    pub fn set_not_filtered(&mut self, id: NodeId) -> AsgResult<()> {
        self.mark_subtree(id, false)?;
        self.unfilter_ancestors(id)
    }

    /// Unfilter `id` and its tree ancestors, leaving descendants alone.
    pub fn set_not_filtered_this_node(&mut self, id: NodeId) -> AsgResult<()> {
        self.node(id)?;
        self.set_not_filtered_this_node_only(id)?;
        self.unfilter_ancestors(id)
    }

    fn mark_subtree(&mut self, id: NodeId, filtered: bool) -> AsgResult<()> {
        let mut visitor = VisitorFilter::new(filtered);
        let walker = Preorder::new(PreorderOptions {
            safe_mode: true,
            visit_filtered: true,
            ..PreorderOptions::default()
        });
        let marked = walker.run_from(self, id, &mut visitor)?;
        tracing::debug!(id, filtered, marked, "subtree filter state set");
        Ok(())
    }

    fn unfilter_ancestors(&mut self, id: NodeId) -> AsgResult<()> {
        let ancestors = self.reverse_edges()?.tree_ancestors(id);
        for parent in ancestors {
            self.set_not_filtered_this_node_only(parent)?;
        }
        Ok(())
    }
}
