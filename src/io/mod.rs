//! Binary stream I/O.
//!
//! - [`BinaryWriter`] / [`BinaryReader`] - ordered little-endian primitives
//! - [`Header`] - magic marker plus the property block carrying schema versions

mod binary;
mod header;

pub use binary::{BinaryReader, BinaryWriter};
pub use header::{Header, MAGIC, keys};
