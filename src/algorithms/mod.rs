//! Graph walks and the factory operations built on them.
//!
//! - [`Preorder`] - depth-first driver for any [`Visitor`](crate::visit::Visitor)
//! - persistence - `Factory::save` / `Factory::load` through [`VisitorSave`](crate::visit::VisitorSave)
//! - filtering - `Factory::set_filtered` / `Factory::set_not_filtered` through
//!   [`VisitorFilter`](crate::visit::VisitorFilter)
//! - reverse edges - `Factory::reverse_edges` through
//!   [`VisitorReverseEdges`](crate::visit::VisitorReverseEdges)

mod filtering;
mod persist;
mod preorder;
mod reverse_edges;

pub use persist::SaveOptions;
pub use preorder::{Preorder, PreorderOptions};
