//! # Schema
//!
//! The fixed, versioned node-kind taxonomy and the queries built on it.
//!
//! - [`NodeKind`] - one tag per grammar production, with a single parent each
//! - [`classify`] - `is_ancestor`, `is_kind`, composite/leaf partition, id validity
//! - [`version`] - API and binary version strings

pub mod classify;
mod kind;
pub mod version;

pub use classify::{
    Ancestors, HasKind, ancestors, is_ancestor, is_composite, is_kind, is_leaf, is_positioned,
    is_valid_id,
};
pub use kind::{Category, NodeKind, Shape};
