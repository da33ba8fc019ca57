//! Ancestry-chain dispatch.
//!
//! One generic routine replaces a hand-written override per kind: it asks the
//! visitor about each level of the node's ancestor chain in turn, starting
//! from the most derived one.

use crate::asg::Node;
use crate::base::{AsgError, AsgResult};
use crate::schema::NodeKind;

use super::{Step, VisitContext, Visitor};

#[derive(Debug, Clone, Copy)]
enum Phase {
    Enter,
    Exit,
}

/// Dispatch the pre-order call for `node`. Returns how many levels fired.
pub fn enter<V: Visitor + ?Sized>(
    visitor: &mut V,
    cx: &mut VisitContext<'_>,
    node: &Node,
    cascade: bool,
) -> AsgResult<usize> {
    run(Phase::Enter, visitor, cx, node, node.kind(), cascade)
}

/// Dispatch the post-order call for `node`. Returns how many levels fired.
pub fn exit<V: Visitor + ?Sized>(
    visitor: &mut V,
    cx: &mut VisitContext<'_>,
    node: &Node,
    cascade: bool,
) -> AsgResult<usize> {
    run(Phase::Exit, visitor, cx, node, node.kind(), cascade)
}

/// Like [`enter`], but start at `level` instead of the node's own kind.
///
/// A handler that wants its ancestors' behaviour first calls this with the
/// parent of its own level, then returns [`Step::Stop`] so the outer dispatch
/// does not run those ancestors a second time.
pub fn enter_at<V: Visitor + ?Sized>(
    visitor: &mut V,
    cx: &mut VisitContext<'_>,
    node: &Node,
    level: NodeKind,
    cascade: bool,
) -> AsgResult<usize> {
    check_level(node, level, "dispatch::enter_at")?;
    run(Phase::Enter, visitor, cx, node, level, cascade)
}

/// Like [`exit`], but start at `level` instead of the node's own kind.
pub fn exit_at<V: Visitor + ?Sized>(
    visitor: &mut V,
    cx: &mut VisitContext<'_>,
    node: &Node,
    level: NodeKind,
    cascade: bool,
) -> AsgResult<usize> {
    check_level(node, level, "dispatch::exit_at")?;
    run(Phase::Exit, visitor, cx, node, level, cascade)
}

fn check_level(node: &Node, level: NodeKind, location: &'static str) -> AsgResult<()> {
    if node.kind().is_a(level) {
        Ok(())
    } else {
        Err(AsgError::illegal_state(
            location,
            format!("{level} is not an ancestor of {} (node {})", node.kind(), node.id()),
        ))
    }
}

fn run<V: Visitor + ?Sized>(
    phase: Phase,
    visitor: &mut V,
    cx: &mut VisitContext<'_>,
    node: &Node,
    start: NodeKind,
    cascade: bool,
) -> AsgResult<usize> {
    let mut fired = 0;
    for level in start.ancestors() {
        let step = match phase {
            Phase::Enter => visitor.visit(cx, level, node)?,
            Phase::Exit => visitor.visit_end(cx, level, node)?,
        };
        match step {
            Step::Pass => continue,
            Step::Continue => {
                fired += 1;
                if !cascade {
                    break;
                }
            }
            Step::Stop => {
                fired += 1;
                break;
            }
        }
    }
    tracing::trace!(id = node.id(), ?phase, %start, fired, "dispatched");
    Ok(fired)
}
