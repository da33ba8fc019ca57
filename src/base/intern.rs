//! Shared string table for paths and identifiers.
//!
//! Strings are stored once and referred to by a small [`StrKey`]. Keys are
//! stable insertion-order indices, so they can be written to the binary stream
//! as plain `u32` values and remain valid after a reload.

use indexmap::IndexSet;
use smol_str::SmolStr;

/// Key of an interned string. Key 0 always denotes the empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrKey(pub u32);

impl StrKey {
    pub const EMPTY: StrKey = StrKey(0);

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

/// String interner that deduplicates strings.
///
/// Interning the same string twice returns the same key.
#[derive(Debug, Clone)]
pub struct StrTable {
    strings: IndexSet<SmolStr>,
}

impl Default for StrTable {
    fn default() -> Self {
        let mut strings = IndexSet::new();
        strings.insert(SmolStr::default());
        Self { strings }
    }
}

impl StrTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its key.
    ///
    /// If the string was already interned, returns the existing key.
    pub fn intern(&mut self, s: &str) -> StrKey {
        if let Some(index) = self.strings.get_index_of(s) {
            return StrKey(index as u32);
        }
        let (index, _) = self.strings.insert_full(SmolStr::new(s));
        StrKey(index as u32)
    }

    /// Get the key of a string if it exists, without creating it.
    pub fn key_of(&self, s: &str) -> Option<StrKey> {
        self.strings.get_index_of(s).map(|index| StrKey(index as u32))
    }

    /// Look up the string behind a key.
    pub fn get(&self, key: StrKey) -> Option<&str> {
        self.strings.get_index(key.0 as usize).map(SmolStr::as_str)
    }

    /// Number of entries, including the empty string at key 0.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Returns true if nothing but the empty string is stored.
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }

    /// Iterate over all strings in key order, starting with the empty string.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(SmolStr::as_str)
    }

    /// Drop every string except the empty string at key 0.
    pub fn clear(&mut self) {
        self.strings.truncate(1);
    }
}
