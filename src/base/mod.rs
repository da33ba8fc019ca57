//! Foundation types for the ASG.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Position`], [`Span`], [`SourceRange`] - Line/column ranges for positioned nodes
//! - [`StrKey`], [`StrTable`] - Shared string interning
//! - [`AsgError`], [`AsgResult`] - Error type shared by every layer
//!
//! This module has NO dependencies on other crate modules.

mod error;
mod intern;
mod position;

pub use error::{AsgError, AsgResult};
pub use intern::{StrKey, StrTable};
pub use position::{Position, SourceRange, Span};
