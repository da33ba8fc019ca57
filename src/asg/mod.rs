//! Nodes and the factory that owns them.
//!
//! Saving, loading and subtree filtering are driven by the preorder walker and
//! live in [`crate::algorithms`].

mod factory;
mod filter;
mod node;
mod reverse;

pub(crate) use factory::FIRST_ID;
pub use factory::{Factory, NodeStore};
pub use filter::{Filter, FilterState};
pub use node::{Field, Node, NodeId};
pub use reverse::{Incoming, ReverseEdges};
