//! In-memory stand-ins for the host editor: a selection that records what it
//! was asked to do, and a layout that stacks visible outline nodes as lines.

use crate::dom::{DomTree, NodeId, NodeKind, closest};
use crate::selection::{Direction, Focus, Granularity, SelectionApi, SelectionPoint};
use crate::viewport::{Rect, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Collapse(SelectionPoint),
    Extend(Direction, Granularity),
    Focus(NodeId),
}

/// Selection and focus state held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySelection {
    anchor: Option<SelectionPoint>,
    /// Signed distance of the focus end from the anchor, in characters.
    extent: isize,
    focused: Option<NodeId>,
    events: Vec<SelectionEvent>,
}

impl MemorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caret already sitting at `point`, with no recorded history.
    pub fn at(point: SelectionPoint) -> Self {
        Self {
            anchor: Some(point),
            ..Self::default()
        }
    }

    pub fn extent(&self) -> isize {
        self.extent
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn events(&self) -> &[SelectionEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl SelectionApi for MemorySelection {
    fn collapse(&mut self, node: NodeId, offset: usize) {
        let point = SelectionPoint { node, offset };
        self.anchor = Some(point);
        self.extent = 0;
        self.events.push(SelectionEvent::Collapse(point));
    }

    fn extend(&mut self, direction: Direction, granularity: Granularity) {
        self.extent += match direction {
            Direction::Forward => 1,
            Direction::Backward => -1,
        };
        self.events.push(SelectionEvent::Extend(direction, granularity));
    }

    fn anchor(&self) -> Option<SelectionPoint> {
        self.anchor
    }
}

impl Focus for MemorySelection {
    fn focus(&mut self, container: NodeId) {
        self.focused = Some(container);
        self.events.push(SelectionEvent::Focus(container));
    }
}

/// Viewport over a [`DomTree`] where every visible outline node is one line
/// of `line_height`, stacked below `padding_top`.
#[derive(Debug, Clone)]
pub struct LineLayout<'t> {
    tree: &'t DomTree,
    line_height: f64,
    viewport_height: f64,
    padding_top: f64,
    scroll_top: f64,
    scrolls: usize,
}

impl<'t> LineLayout<'t> {
    pub fn new(tree: &'t DomTree, line_height: f64, viewport_height: f64) -> Self {
        Self {
            tree,
            line_height,
            viewport_height,
            padding_top: 0.0,
            scroll_top: 0.0,
            scrolls: 0,
        }
    }

    pub fn with_padding_top(mut self, padding_top: f64) -> Self {
        self.padding_top = padding_top;
        self
    }

    pub fn with_scroll_top(mut self, scroll_top: f64) -> Self {
        self.scroll_top = scroll_top.clamp(0.0, self.max_scroll());
        self
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// How many times [`Viewport::scroll_by`] was called.
    pub fn scroll_count(&self) -> usize {
        self.scrolls
    }

    pub fn content_height(&self) -> f64 {
        self.padding_top + self.tree.visible_projects().len() as f64 * self.line_height
    }

    fn max_scroll(&self) -> f64 {
        (self.content_height() - self.viewport_height).max(0.0)
    }
}

impl Viewport for LineLayout<'_> {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn bounding_box(&self, node: NodeId) -> Option<Rect> {
        let project = closest(self.tree, node, |_, kind| matches!(kind, NodeKind::Project(_)))?;
        let line = self
            .tree
            .visible_projects()
            .iter()
            .position(|&(visible, _)| visible == project)?;
        let top = self.padding_top + line as f64 * self.line_height - self.scroll_top;
        Some(Rect::new(top, self.line_height))
    }

    fn scroll_by(&mut self, dy: f64) {
        self.scrolls += 1;
        self.scroll_top = (self.scroll_top + dy).clamp(0.0, self.max_scroll());
    }
}
