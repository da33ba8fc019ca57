//! File header: magic marker plus an ordered property block.

use std::io::{Read, Write};

use indexmap::IndexMap;

use super::binary::{BinaryReader, BinaryWriter};
use crate::base::{AsgError, AsgResult};

/// Marker written at the start of every saved graph.
pub const MAGIC: &str = "csi";

/// Property keys understood by the loader.
pub mod keys {
    pub const TYPE: &str = "Type";
    pub const API_VERSION: &str = "APIVersion";
    pub const BINARY_VERSION: &str = "BinaryVersion";
}

/// Ordered key/value properties stored in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    properties: IndexMap<String, String>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a property.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Check that `key` is present and equals `expected`.
    pub fn expect(&self, key: &str, expected: &str) -> AsgResult<()> {
        match self.get(key) {
            None => Err(AsgError::io(
                "Header::expect",
                format!("missing {key} information"),
            )),
            Some(found) if found != expected => Err(AsgError::io(
                "Header::expect",
                format!("wrong {key} ({expected} required, {found} found)"),
            )),
            Some(_) => Ok(()),
        }
    }

    pub fn save<W: Write>(&self, writer: &mut BinaryWriter<W>) -> AsgResult<()> {
        writer.write_string(MAGIC)?;
        writer.write_u32(self.properties.len() as u32)?;
        for (key, value) in &self.properties {
            writer.write_string(key)?;
            writer.write_string(value)?;
        }
        Ok(())
    }

    pub fn load<R: Read>(reader: &mut BinaryReader<R>) -> AsgResult<Self> {
        let magic = reader.read_string()?;
        if magic != MAGIC {
            return Err(AsgError::io(
                "Header::load",
                format!("not an ASG file (magic {magic:?})"),
            ));
        }
        let count = reader.read_u32()?;
        let mut header = Header::new();
        for _ in 0..count {
            let key = reader.read_string()?;
            let value = reader.read_string()?;
            header.set(key, value);
        }
        Ok(header)
    }
}
