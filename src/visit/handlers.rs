use rustc_hash::FxHashMap;

use crate::asg::Node;
use crate::base::AsgResult;
use crate::schema::NodeKind;

use super::{Step, VisitContext, Visitor};

type Handler<'h> = Box<dyn FnMut(&mut VisitContext<'_>, &Node) -> AsgResult<Step> + 'h>;

struct HandlerPair<'h> {
    on_enter: Option<Handler<'h>>,
    on_exit: Option<Handler<'h>>,
}

/// A visitor assembled from closures registered per kind.
///
/// Each kind may hold several `(on_enter, on_exit)` pairs; they run in
/// registration order. A level reports [`Step::Stop`] if any of its handlers
/// did, otherwise [`Step::Continue`].
#[derive(Default)]
pub struct HandlerVisitor<'h> {
    handlers: FxHashMap<NodeKind, Vec<HandlerPair<'h>>>,
}

impl<'h> HandlerVisitor<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pre-order handler for `kind` and all kinds below it.
    pub fn on_enter<F>(&mut self, kind: NodeKind, handler: F) -> &mut Self
    where
        F: FnMut(&mut VisitContext<'_>, &Node) -> AsgResult<Step> + 'h,
    {
        self.push(
            kind,
            HandlerPair {
                on_enter: Some(Box::new(handler)),
                on_exit: None,
            },
        )
    }

    /// Register a post-order handler for `kind` and all kinds below it.
    pub fn on_exit<F>(&mut self, kind: NodeKind, handler: F) -> &mut Self
    where
        F: FnMut(&mut VisitContext<'_>, &Node) -> AsgResult<Step> + 'h,
    {
        self.push(
            kind,
            HandlerPair {
                on_enter: None,
                on_exit: Some(Box::new(handler)),
            },
        )
    }

    /// Register both halves of a handler pair at once.
    pub fn on<E, X>(&mut self, kind: NodeKind, on_enter: E, on_exit: X) -> &mut Self
    where
        E: FnMut(&mut VisitContext<'_>, &Node) -> AsgResult<Step> + 'h,
        X: FnMut(&mut VisitContext<'_>, &Node) -> AsgResult<Step> + 'h,
    {
        self.push(
            kind,
            HandlerPair {
                on_enter: Some(Box::new(on_enter)),
                on_exit: Some(Box::new(on_exit)),
            },
        )
    }

    pub fn handles(&self, kind: NodeKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    fn push(&mut self, kind: NodeKind, pair: HandlerPair<'h>) -> &mut Self {
        self.handlers.entry(kind).or_default().push(pair);
        self
    }

    fn fire(
        &mut self,
        cx: &mut VisitContext<'_>,
        level: NodeKind,
        node: &Node,
        exit: bool,
    ) -> AsgResult<Step> {
        let Some(pairs) = self.handlers.get_mut(&level) else {
            return Ok(Step::Pass);
        };
        let mut outcome = Step::Pass;
        for pair in pairs {
            let slot = if exit { &mut pair.on_exit } else { &mut pair.on_enter };
            let Some(handler) = slot else { continue };
            match handler(cx, node)? {
                Step::Pass => {}
                Step::Continue if outcome == Step::Pass => outcome = Step::Continue,
                Step::Continue => {}
                Step::Stop => outcome = Step::Stop,
            }
        }
        Ok(outcome)
    }
}

impl Visitor for HandlerVisitor<'_> {
    fn visit(&mut self, cx: &mut VisitContext<'_>, level: NodeKind, node: &Node) -> AsgResult<Step> {
        self.fire(cx, level, node, false)
    }

    fn visit_end(
        &mut self,
        cx: &mut VisitContext<'_>,
        level: NodeKind,
        node: &Node,
    ) -> AsgResult<Step> {
        self.fire(cx, level, node, true)
    }
}
