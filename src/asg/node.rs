//! Graph nodes and their schema-ordered payload.

use std::io::{Read, Write};

use crate::base::{AsgError, AsgResult, Position, SourceRange, Span, StrKey};
use crate::io::{BinaryReader, BinaryWriter};
use crate::schema::{HasKind, NodeKind, is_valid_id};

/// Unique numeric node identity. 0 and 1 are reserved for "absent".
pub type NodeId = u32;

/// One declared attribute or edge of a node.
///
/// `Child`/`Children` are tree edges and are followed by the traversal driver;
/// `Ref`/`Refs` are cross edges into the rest of the graph. A single edge may
/// hold 0 to mean "not set".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Str(StrKey),
    UInt(u32),
    Bool(bool),
    Child(NodeId),
    Children(Vec<NodeId>),
    Ref(NodeId),
    Refs(Vec<NodeId>),
}

const TAG_STR: u8 = 1;
const TAG_UINT: u8 = 2;
const TAG_BOOL: u8 = 3;
const TAG_CHILD: u8 = 4;
const TAG_CHILDREN: u8 = 5;
const TAG_REF: u8 = 6;
const TAG_REFS: u8 = 7;

impl Field {
    fn tag(&self) -> u8 {
        match self {
            Field::Str(_) => TAG_STR,
            Field::UInt(_) => TAG_UINT,
            Field::Bool(_) => TAG_BOOL,
            Field::Child(_) => TAG_CHILD,
            Field::Children(_) => TAG_CHILDREN,
            Field::Ref(_) => TAG_REF,
            Field::Refs(_) => TAG_REFS,
        }
    }

    pub fn is_tree_edge(&self) -> bool {
        matches!(self, Field::Child(_) | Field::Children(_))
    }

    pub fn is_cross_edge(&self) -> bool {
        matches!(self, Field::Ref(_) | Field::Refs(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Field::Children(_) | Field::Refs(_))
    }

    /// Edge targets held by this field, including unset (0) single edges.
    pub fn targets(&self) -> &[NodeId] {
        match self {
            Field::Child(id) | Field::Ref(id) => std::slice::from_ref(id),
            Field::Children(ids) | Field::Refs(ids) => ids,
            Field::Str(_) | Field::UInt(_) | Field::Bool(_) => &[],
        }
    }

    fn save<W: Write>(&self, writer: &mut BinaryWriter<W>) -> AsgResult<()> {
        writer.write_u8(self.tag())?;
        match self {
            Field::Str(key) => writer.write_u32(key.0),
            Field::UInt(value) => writer.write_u32(*value),
            Field::Bool(value) => writer.write_bool(*value),
            Field::Child(id) | Field::Ref(id) => writer.write_u32(*id),
            Field::Children(ids) | Field::Refs(ids) => {
                for id in ids {
                    if !is_valid_id(*id) {
                        return Err(AsgError::illegal_state(
                            "Field::save",
                            format!("edge list contains invalid id {id}"),
                        ));
                    }
                    writer.write_u32(*id)?;
                }
                // end sign
                writer.write_u32(0)
            }
        }
    }

    fn load<R: Read>(reader: &mut BinaryReader<R>) -> AsgResult<Self> {
        let tag = reader.read_u8()?;
        let field = match tag {
            TAG_STR => Field::Str(StrKey(reader.read_u32()?)),
            TAG_UINT => Field::UInt(reader.read_u32()?),
            TAG_BOOL => Field::Bool(reader.read_bool()?),
            TAG_CHILD => Field::Child(reader.read_u32()?),
            TAG_CHILDREN => Field::Children(read_id_list(reader)?),
            TAG_REF => Field::Ref(reader.read_u32()?),
            TAG_REFS => Field::Refs(read_id_list(reader)?),
            other => {
                return Err(AsgError::io(
                    "Field::load",
                    format!("unknown field tag {other}"),
                ));
            }
        };
        Ok(field)
    }
}

fn read_id_list<R: Read>(reader: &mut BinaryReader<R>) -> AsgResult<Vec<NodeId>> {
    let mut ids = Vec::new();
    loop {
        let id = reader.read_u32()?;
        if id == 0 {
            return Ok(ids);
        }
        ids.push(id);
    }
}

/// A node of the graph.
///
/// The kind is fixed at construction. Nodes of kinds that descend from
/// `Positioned` always carry a source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    position: Option<SourceRange>,
    fields: Vec<Field>,
}

impl HasKind for Node {
    fn kind(&self) -> NodeKind {
        self.kind
    }
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        let position = kind.is_a(NodeKind::Positioned).then(SourceRange::default);
        Self {
            id,
            kind,
            position,
            fields: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Dynamic type test against `kind` or any of its ancestors.
    pub fn is_kind(&self, kind: NodeKind) -> bool {
        self.kind.is_a(kind)
    }

    pub fn position(&self) -> Option<&SourceRange> {
        self.position.as_ref()
    }

    pub fn set_position(&mut self, range: SourceRange) -> AsgResult<()> {
        match &mut self.position {
            Some(position) => {
                *position = range;
                Ok(())
            }
            None => Err(AsgError::illegal_state(
                "Node::set_position",
                format!("{} nodes carry no position", self.kind),
            )),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, slot: usize) -> Option<&Field> {
        self.fields.get(slot)
    }

    /// Append a field and return its slot.
    pub fn push_field(&mut self, field: Field) -> usize {
        self.fields.push(field);
        self.fields.len() - 1
    }

    pub fn set_field(&mut self, slot: usize, field: Field) -> AsgResult<()> {
        let len = self.fields.len();
        let target = self.fields.get_mut(slot).ok_or_else(|| {
            AsgError::no_such_element(
                "Node::set_field",
                format!("slot {slot} out of range (node {} has {len} fields)", self.id),
            )
        })?;
        *target = field;
        Ok(())
    }

    /// Ids held by the list field at `slot`.
    pub fn edge_list(&self, slot: usize) -> AsgResult<&[NodeId]> {
        match self.fields.get(slot) {
            Some(Field::Children(ids)) | Some(Field::Refs(ids)) => Ok(ids),
            Some(_) => Err(AsgError::invalid_iterator(
                "Node::edge_list",
                format!("slot {slot} of node {} is not an edge list", self.id),
            )),
            None => Err(AsgError::invalid_iterator(
                "Node::edge_list",
                format!("slot {slot} out of range for node {}", self.id),
            )),
        }
    }

    /// Tree-edge targets in field order, skipping unset edges.
    pub fn tree_children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.fields
            .iter()
            .filter(|field| field.is_tree_edge())
            .flat_map(Field::targets)
            .copied()
            .filter(|id| is_valid_id(*id))
    }

    /// Cross-edge targets in field order, skipping unset edges.
    pub fn cross_references(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.fields
            .iter()
            .filter(|field| field.is_cross_edge())
            .flat_map(Field::targets)
            .copied()
            .filter(|id| is_valid_id(*id))
    }

    /// Write the position (if any) and every field in slot order.
    pub fn save<W: Write>(&self, writer: &mut BinaryWriter<W>) -> AsgResult<()> {
        if let Some(range) = &self.position {
            writer.write_u32(range.path.0)?;
            writer.write_u32(range.span.start.line)?;
            writer.write_u32(range.span.start.column)?;
            writer.write_u32(range.span.end.line)?;
            writer.write_u32(range.span.end.column)?;
        }
        let count = u16::try_from(self.fields.len()).map_err(|_| {
            AsgError::illegal_state(
                "Node::save",
                format!("node {} has too many fields", self.id),
            )
        })?;
        writer.write_u16(count)?;
        for field in &self.fields {
            field.save(writer)?;
        }
        Ok(())
    }

    /// Read back what [`Node::save`] wrote, replacing the current payload.
    pub fn load<R: Read>(&mut self, reader: &mut BinaryReader<R>) -> AsgResult<()> {
        if self.position.is_some() {
            let path = StrKey(reader.read_u32()?);
            let start = Position::new(reader.read_u32()?, reader.read_u32()?);
            let end = Position::new(reader.read_u32()?, reader.read_u32()?);
            self.position = Some(SourceRange::new(path, Span::new(start, end)));
        }
        let count = reader.read_u16()?;
        self.fields = (0..count)
            .map(|_| Field::load(reader))
            .collect::<AsgResult<Vec<_>>>()?;
        Ok(())
    }
}
