//! Schema versions gating binary compatibility.
//!
//! Any change to the kind table, the parent relation or a payload layout must
//! bump both strings.

/// Version of the node-kind API.
pub const API_VERSION: &str = "1.0.16";

/// Version of the binary layout.
pub const BINARY_VERSION: &str = "1.0.16";

/// Language type recorded in the file header.
pub const LANGUAGE_TYPE: &str = "CSharpLanguage";
