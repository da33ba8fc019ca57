//! Saving and loading whole graphs and filter tables.
//!
//! Stream layout: header, root id, node records (`id`, kind tag, payload) in
//! preorder, an end mark (`0`, `0`), the string table, then an optional filter
//! table.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::asg::{FIRST_ID, Factory, Node};
use crate::base::{AsgError, AsgResult, StrKey, StrTable};
use crate::io::{BinaryReader, BinaryWriter, Header, keys};
use crate::schema::NodeKind;
use crate::schema::version::{API_VERSION, BINARY_VERSION, LANGUAGE_TYPE};
use crate::visit::VisitorSave;

use super::preorder::{Preorder, PreorderOptions};

/// Options for [`Factory::save`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaveOptions {
    /// Append the filter table so that a load restores filtered states.
    pub with_filter: bool,
}

fn file_header() -> Header {
    let mut header = Header::new();
    header.set(keys::TYPE, LANGUAGE_TYPE);
    header.set(keys::API_VERSION, API_VERSION);
    header.set(keys::BINARY_VERSION, BINARY_VERSION);
    header
}

impl Factory {
    /// Save the graph to a file.
    pub fn save(&mut self, path: impl AsRef<Path>, options: SaveOptions) -> AsgResult<()> {
        let file = File::create(path.as_ref()).map_err(|e| AsgError::from_io("Factory::save", e))?;
        self.save_to(BufWriter::new(file), options)?;
        Ok(())
    }

    /// Save the graph to `sink` and hand the sink back.
    ///
    /// Every node is written, filtered or not. Ids must be dense, so a graph
    /// built with gaps through [`Factory::create_node_with_id`] is refused.
    pub fn save_to<W: Write>(&mut self, sink: W, options: SaveOptions) -> AsgResult<W> {
        let expected = self.nodes().id_bound() as usize - FIRST_ID as usize;
        if self.len() != expected {
            return Err(AsgError::illegal_state(
                "Factory::save",
                format!(
                    "ids below {} hold only {} nodes; saved graphs must not have id gaps",
                    self.nodes().id_bound(),
                    self.len()
                ),
            ));
        }
        self.with_filter_off(|factory| {
            let mut writer = BinaryWriter::new(sink);
            file_header().save(&mut writer)?;
            writer.write_u32(factory.root().unwrap_or(0))?;

            let mut visitor = VisitorSave::new(&mut writer);
            let walker = Preorder::new(PreorderOptions {
                safe_mode: true,
                visit_special_nodes: true,
                visit_filtered: true,
                ..PreorderOptions::default()
            });
            walker.run(factory, &mut visitor)?;
            let saved = visitor.saved();

            writer.write_u32(0)?;
            writer.write_u16(NodeKind::ROOT.tag())?;
            save_strings(factory.strings(), &mut writer)?;
            writer.write_bool(options.with_filter)?;
            if options.with_filter {
                factory.filter().save(&mut writer)?;
            }
            tracing::debug!(saved, bytes = writer.written(), "graph saved");
            writer.into_inner()
        })
    }

    /// Replace this graph with the one stored in a file.
    pub fn load(&mut self, path: impl AsRef<Path>) -> AsgResult<()> {
        let file = File::open(path.as_ref()).map_err(|e| AsgError::from_io("Factory::load", e))?;
        self.load_from(BufReader::new(file))
    }

    /// Replace this graph with the one read from `source`.
    ///
    /// The header must carry the current language type and schema versions.
    /// Node ids must be dense: every id is below `2 + record count`. On
    /// failure the graph is left unchanged. The filter switch is kept.
    pub fn load_from<R: Read>(&mut self, source: R) -> AsgResult<()> {
        const LOCATION: &str = "Factory::load";

        let mut reader = BinaryReader::new(source);
        let header = Header::load(&mut reader)?;
        header.expect(keys::TYPE, LANGUAGE_TYPE)?;
        header.expect(keys::API_VERSION, API_VERSION)?;
        header.expect(keys::BINARY_VERSION, BINARY_VERSION)?;

        let root = reader.read_u32()?;
        // Buffered so the arena is only sized once the ids are known to be dense.
        let mut records = Vec::new();
        loop {
            let id = reader.read_u32()?;
            let tag = reader.read_u16()?;
            if id == 0 {
                break;
            }
            let kind = NodeKind::from_u16(tag).ok_or_else(|| {
                AsgError::io(LOCATION, format!("unknown kind tag {tag} for node {id}"))
            })?;
            let mut node = Node::new(id, kind);
            node.load(&mut reader)?;
            records.push(node);
        }

        let bound = FIRST_ID as usize + records.len();
        if let Some(node) = records.iter().find(|node| node.id() as usize >= bound) {
            return Err(AsgError::io(
                LOCATION,
                format!(
                    "node id {} is out of range for a stream of {} nodes",
                    node.id(),
                    records.len()
                ),
            ));
        }
        let mut loaded = Factory::new();
        for node in records {
            let id = node.id();
            loaded.adopt_node(node, LOCATION).map_err(|e| {
                AsgError::io(LOCATION, format!("cannot restore node {id}")).with_cause(e)
            })?;
        }

        load_strings(loaded.strings_mut(), &mut reader)?;
        if reader.read_bool()? {
            let len = loaded.filter().len();
            loaded.filter_mut().load(&mut reader, len)?;
        }
        if root != 0 {
            loaded
                .set_root(root)
                .map_err(|e| AsgError::io(LOCATION, format!("bad root {root}")).with_cause(e))?;
        }
        if !self.is_filter_on() {
            loaded.turn_filter_off();
        }

        tracing::debug!(nodes = loaded.len(), strings = loaded.strings().len(), "graph loaded");
        *self = loaded;
        Ok(())
    }

    /// Save the filter table on its own.
    pub fn save_filter(&self, path: impl AsRef<Path>) -> AsgResult<()> {
        let file =
            File::create(path.as_ref()).map_err(|e| AsgError::from_io("Factory::save_filter", e))?;
        self.save_filter_to(BufWriter::new(file))?;
        Ok(())
    }

    pub fn save_filter_to<W: Write>(&self, sink: W) -> AsgResult<W> {
        let mut writer = BinaryWriter::new(sink);
        self.filter().save(&mut writer)?;
        tracing::debug!(slots = self.filter().len(), "filter saved");
        writer.into_inner()
    }

    /// Load a filter table saved by [`Factory::save_filter`].
    ///
    /// Fails if the table does not cover every node of this graph.
    pub fn load_filter(&mut self, path: impl AsRef<Path>) -> AsgResult<()> {
        let file =
            File::open(path.as_ref()).map_err(|e| AsgError::from_io("Factory::load_filter", e))?;
        self.load_filter_from(BufReader::new(file))
    }

    pub fn load_filter_from<R: Read>(&mut self, source: R) -> AsgResult<()> {
        let mut reader = BinaryReader::new(source);
        let len = self.nodes().id_bound() as usize;
        self.filter_mut().load(&mut reader, len)?;
        tracing::debug!(slots = self.filter().len(), "filter loaded");
        Ok(())
    }
}

fn save_strings<W: Write>(strings: &StrTable, writer: &mut BinaryWriter<W>) -> AsgResult<()> {
    writer.write_u32(strings.len() as u32)?;
    for s in strings.iter() {
        writer.write_string(s)?;
    }
    Ok(())
}

fn load_strings<R: Read>(strings: &mut StrTable, reader: &mut BinaryReader<R>) -> AsgResult<()> {
    let count = reader.read_u32()?;
    for index in 0..count {
        let s = reader.read_string()?;
        let key = strings.intern(&s);
        if key != StrKey(index) {
            return Err(AsgError::io(
                "Factory::load",
                format!("string table entry {index} ({s:?}) is out of place"),
            ));
        }
    }
    Ok(())
}
