//! Per-node visibility flags.

use std::io::{Read, Write};

use crate::base::{AsgError, AsgResult};
use crate::io::{BinaryReader, BinaryWriter};
use crate::schema::is_valid_id;

use super::node::NodeId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FilterState {
    #[default]
    NotFiltered,
    Filtered,
}

impl FilterState {
    fn to_byte(self) -> u8 {
        match self {
            FilterState::NotFiltered => 0,
            FilterState::Filtered => 1,
        }
    }

    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(FilterState::NotFiltered),
            1 => Some(FilterState::Filtered),
            _ => None,
        }
    }
}

/// Filter table indexed by node id, plus the global on/off switch.
///
/// While the filter is off every node reads as not filtered, but the stored
/// states are kept untouched.
#[derive(Debug, Clone)]
pub struct Filter {
    states: Vec<FilterState>,
    on: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            on: true,
        }
    }
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn turn_on(&mut self) {
        self.on = true;
    }

    pub fn turn_off(&mut self) {
        self.on = false;
    }

    /// Number of id slots tracked, including the reserved ones.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Stored state of `id`, regardless of the switch.
    pub fn state(&self, id: NodeId) -> FilterState {
        self.states.get(id as usize).copied().unwrap_or_default()
    }

    /// Whether `id` is hidden right now.
    pub fn is_filtered(&self, id: NodeId) -> bool {
        self.on && self.state(id) == FilterState::Filtered
    }

    pub fn set_filtered_this_node_only(&mut self, id: NodeId) -> AsgResult<()> {
        self.set(id, FilterState::Filtered)
    }

    pub fn set_not_filtered_this_node_only(&mut self, id: NodeId) -> AsgResult<()> {
        self.set(id, FilterState::NotFiltered)
    }

    /// Grow the table so that `id` has a slot.
    pub(crate) fn reserve_id(&mut self, id: NodeId) {
        let needed = id as usize + 1;
        if self.states.len() < needed {
            self.states.resize(needed, FilterState::NotFiltered);
        }
    }

    fn set(&mut self, id: NodeId, state: FilterState) -> AsgResult<()> {
        if !is_valid_id(id) {
            return Err(AsgError::illegal_state(
                "Filter::set",
                format!("invalid node id {id}"),
            ));
        }
        let len = self.states.len();
        let slot = self.states.get_mut(id as usize).ok_or_else(|| {
            AsgError::no_such_element(
                "Filter::set",
                format!("node id {id} is past the filter table ({len} slots)"),
            )
        })?;
        if *slot != state {
            tracing::trace!(id, ?state, "filter state changed");
            *slot = state;
        }
        Ok(())
    }

    /// Length-prefixed state bytes. The switch is not persisted.
    pub fn save<W: Write>(&self, writer: &mut BinaryWriter<W>) -> AsgResult<()> {
        let len = u32::try_from(self.states.len()).map_err(|_| {
            AsgError::illegal_state("Filter::save", "filter table too large")
        })?;
        writer.write_u32(len)?;
        for state in &self.states {
            writer.write_u8(state.to_byte())?;
        }
        Ok(())
    }

    /// Replace the stored states with those read from `reader`.
    ///
    /// The stream must cover at least `expected_len` slots, so that every
    /// node of the current graph has a state.
    pub fn load<R: Read>(
        &mut self,
        reader: &mut BinaryReader<R>,
        expected_len: usize,
    ) -> AsgResult<()> {
        let len = reader.read_u32()? as usize;
        if len < expected_len {
            return Err(AsgError::io(
                "Filter::load",
                format!("filter covers {len} ids but the graph needs {expected_len}"),
            ));
        }
        // Grows with states actually read; `len` comes from the stream.
        let mut states = Vec::new();
        for id in 0..len {
            let byte = reader.read_u8()?;
            let state = FilterState::from_byte(byte).ok_or_else(|| {
                AsgError::io(
                    "Filter::load",
                    format!("invalid filter state {byte} for node {id}"),
                )
            })?;
            states.push(state);
        }
        self.states = states;
        Ok(())
    }
}
