//! Capabilities the host editor provides for placing the caret.

use crate::dom::NodeId;

/// A point in the host tree: a text node (or an empty container) and a
/// character offset inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPoint {
    pub node: NodeId,
    pub offset: usize,
}

/// Where the navigator asked the selection to collapse. Returned to the
/// caller of each command; never kept.
pub type SelectionRequest = SelectionPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Character,
}

pub trait SelectionApi {
    /// Replaces the selection with a caret at `offset` inside `node`.
    fn collapse(&mut self, node: NodeId, offset: usize);

    /// Moves the focus end of the selection, keeping the anchor.
    fn extend(&mut self, direction: Direction, granularity: Granularity);

    fn anchor(&self) -> Option<SelectionPoint>;
}

pub trait Focus {
    fn focus(&mut self, container: NodeId);
}

/// Collapse at `point`, widen to a one-character anchor and focus
/// `container`: the editor's character-level caret.
pub(crate) fn apply<S>(host: &mut S, point: SelectionPoint, container: NodeId)
where
    S: SelectionApi + Focus + ?Sized,
{
    host.collapse(point.node, point.offset);
    host.extend(Direction::Forward, Granularity::Character);
    host.focus(container);
}
