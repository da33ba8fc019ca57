//! # csharp-asg
//!
//! Abstract Semantic Graph for C# syntax trees, as used by static-analysis tools.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! algorithms → Preorder driver, save/load, subtree filtering, reverse edges
//!   ↓
//! visit      → Visitor trait, ancestry dispatch, built-in visitors
//!   ↓
//! asg        → Node, Factory (node arena, filter table, string table), ReverseEdges
//!   ↓
//! schema     → NodeKind taxonomy, classifier queries, schema versions
//!   ↓
//! io         → Little-endian binary reader/writer, file header
//!   ↓
//! base       → Primitives (Position, Span, StrTable, AsgError)
//! ```

// ============================================================================
// MODULES (dependency order: base → io → schema → asg → visit → algorithms)
// ============================================================================

/// Foundation types: positions, string interning, errors
pub mod base;

/// Binary stream reader/writer and the file header
pub mod io;

/// Node-kind taxonomy and classifier queries
pub mod schema;

/// Nodes and the factory that owns them
pub mod asg;

/// Visitor dispatch framework and the built-in visitors
pub mod visit;

/// Graph walks that drive visitors, and the factory operations built on them
pub mod algorithms;

// Re-export commonly needed items
pub use algorithms::{Preorder, PreorderOptions, SaveOptions};
pub use asg::{Factory, Field, FilterState, Incoming, Node, NodeId, ReverseEdges};
pub use base::{AsgError, AsgResult, Position, SourceRange, Span, StrKey, StrTable};
pub use schema::{Category, NodeKind, Shape};
pub use visit::{
    HandlerVisitor, Step, VisitContext, Visitor, VisitorFilter, VisitorReverseEdges, VisitorSave,
    VisitorSubtreeCollector,
};
