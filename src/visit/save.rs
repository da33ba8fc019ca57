use std::io::Write;

use crate::asg::Node;
use crate::base::AsgResult;
use crate::io::BinaryWriter;
use crate::schema::NodeKind;

use super::{Step, VisitContext, Visitor};

/// Writes each node to the stream when it is left: id, kind tag, payload.
pub struct VisitorSave<'a, W: Write> {
    writer: &'a mut BinaryWriter<W>,
    saved: usize,
}

impl<'a, W: Write> VisitorSave<'a, W> {
    pub fn new(writer: &'a mut BinaryWriter<W>) -> Self {
        Self { writer, saved: 0 }
    }

    /// Nodes written so far.
    pub fn saved(&self) -> usize {
        self.saved
    }
}

impl<W: Write> Visitor for VisitorSave<'_, W> {
    fn visit_end(
        &mut self,
        _cx: &mut VisitContext<'_>,
        level: NodeKind,
        node: &Node,
    ) -> AsgResult<Step> {
        if level != node.kind() {
            return Ok(Step::Pass);
        }
        self.writer.write_u32(node.id())?;
        self.writer.write_u16(node.kind().tag())?;
        node.save(self.writer)?;
        self.saved += 1;
        Ok(Step::Stop)
    }
}
