//! Block sequence rendering
//!
//! [`BlockRenderer`] walks a block sequence in order, dispatches every block
//! to its renderer and stacks the results with uniform spacing. The result is
//! a [`BlockView`]: the node tree plus every interactive target and
//! inspection entry, in visual order.
//!
//! ```
//! use std::cell::RefCell;
//! use threadline_cli::blocks::BlockRenderer;
//! use threadline_core::{Block, BlockSequence, ButtonElement};
//! use threadline_oil::ViewContext;
//!
//! let blocks: BlockSequence = vec![
//!     Block::header("Trending: X"),
//!     Block::section_with_button(
//!         "1. Article A",
//!         ButtonElement::new("View").with_action("view_article", "a1"),
//!     ),
//! ]
//! .into();
//!
//! let clicks = RefCell::new(Vec::new());
//! let handler = |id: &str, value: &str| clicks.borrow_mut().push(format!("{id}:{value}"));
//! let view = BlockRenderer::new(&blocks)
//!     .on_action(&handler)
//!     .render(&ViewContext::default());
//!
//! assert!(view.click_label("View"));
//! assert_eq!(*clicks.borrow(), ["view_article:a1"]);
//! ```

mod action;
pub mod mrkdwn;
mod renderers;

pub use action::{ActionHandler, ActionRegistry, ActionTarget, Inspection};
pub use renderers::{render_block, DEFAULT_TIMELINE_TITLE_WIDTH};

use threadline_core::Block;
use threadline_oil::{col, Component, Gap, Node, ViewContext};
use tracing::{debug, trace};

/// Blank lines between consecutive blocks
const BLOCK_SPACING: u16 = 1;

/// Renders a block sequence with an optional action handler.
pub struct BlockRenderer<'a> {
    blocks: &'a [Block],
    handler: Option<&'a dyn ActionHandler>,
    timeline_title_width: usize,
}

impl<'a> BlockRenderer<'a> {
    pub fn new(blocks: &'a [Block]) -> Self {
        Self {
            blocks,
            handler: None,
            timeline_title_width: DEFAULT_TIMELINE_TITLE_WIDTH,
        }
    }

    /// Attach the handler every interactive element reports to.
    pub fn on_action(mut self, handler: &'a dyn ActionHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn timeline_title_width(mut self, width: usize) -> Self {
        self.timeline_title_width = width;
        self
    }

    pub fn render(&self, ctx: &ViewContext<'_>) -> BlockView<'a> {
        let mut registry = ActionRegistry::new();
        let children: Vec<Node> = self
            .blocks
            .iter()
            .map(|block| {
                trace!(kind = block.kind(), "rendering block");
                render_block(block, &mut registry, ctx, self.timeline_title_width)
            })
            .collect();

        let (targets, inspections) = registry.into_parts();
        debug!(
            blocks = self.blocks.len(),
            targets = targets.len(),
            inspections = inspections.len(),
            "rendered block sequence"
        );

        BlockView {
            node: col(children).gap(Gap::row(BLOCK_SPACING)),
            targets,
            inspections,
            handler: self.handler,
        }
    }
}

impl Component for BlockRenderer<'_> {
    fn view(&self, ctx: &ViewContext<'_>) -> Node {
        self.render(ctx).node
    }
}

/// A rendered block sequence and its interactive surface
pub struct BlockView<'a> {
    pub node: Node,
    targets: Vec<ActionTarget>,
    inspections: Vec<Inspection>,
    handler: Option<&'a dyn ActionHandler>,
}

impl BlockView<'_> {
    /// Interactive targets in visual order
    pub fn targets(&self) -> &[ActionTarget] {
        &self.targets
    }

    /// Full detail for truncated elements, in visual order
    pub fn inspections(&self) -> &[Inspection] {
        &self.inspections
    }

    /// Click the target with the given hotkey (1-based). Returns whether a
    /// handler was invoked; without a handler clicking is a no-op.
    pub fn click(&self, hotkey: usize) -> bool {
        let Some(target) = self.targets.iter().find(|t| t.hotkey == hotkey) else {
            debug!(hotkey, "no action target for hotkey");
            return false;
        };
        self.invoke(target)
    }

    /// Click the first target whose label matches exactly.
    pub fn click_label(&self, label: &str) -> bool {
        match self.targets.iter().find(|t| t.label == label) {
            Some(target) => self.invoke(target),
            None => false,
        }
    }

    fn invoke(&self, target: &ActionTarget) -> bool {
        match self.handler {
            Some(handler) => {
                debug!(action_id = %target.action_id, value = %target.value, "action");
                target.invoke(handler);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for BlockView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockView")
            .field("node", &self.node)
            .field("targets", &self.targets)
            .field("inspections", &self.inspections)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}
