//! Cached reverse-edge index on the factory.

use crate::asg::{Factory, ReverseEdges};
use crate::base::{AsgError, AsgResult};
use crate::visit::VisitorReverseEdges;

use super::preorder::{Preorder, PreorderOptions};

impl Factory {
    /// Build the reverse-edge index unless one is already cached.
    ///
    /// Every node is walked, filtered or not.
    pub fn enable_reverse_edges(&mut self) -> AsgResult<()> {
        if self.has_reverse_edges() {
            return Ok(());
        }
        let mut edges = ReverseEdges::new();
        let walker = Preorder::new(PreorderOptions {
            safe_mode: true,
            visit_special_nodes: true,
            visit_filtered: true,
            ..PreorderOptions::default()
        });
        walker.run(self, &mut VisitorReverseEdges::new(&mut edges))?;
        tracing::debug!(edges = edges.len(), "reverse edges built");
        self.cache_reverse_edges(edges);
        Ok(())
    }

    /// The reverse-edge index, built on first use.
    pub fn reverse_edges(&mut self) -> AsgResult<&ReverseEdges> {
        self.enable_reverse_edges()?;
        self.cached_reverse_edges().ok_or_else(|| {
            AsgError::illegal_state("Factory::reverse_edges", "reverse edges were not built")
        })
    }
}
