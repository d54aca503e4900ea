//! Directional cursor movement across an outline.
//!
//! A command runs in one synchronous pass: find the destination outline node
//! (vertical moves only), compute the destination offset, place the
//! selection, then make sure the destination line is visible. Structural
//! problems are detected before the selection is touched.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dom::{NodeId, NodeKind, RenderTree, closest};
use crate::error::{NavigationError, Result};
use crate::locator::{content_container, next_navigable, owner_node, previous_navigable};
use crate::selection::{self, Focus, SelectionApi, SelectionPoint, SelectionRequest};
use crate::text::ContentAbstraction;
use crate::viewport::{ScrollAction, Viewport, ViewportPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Move {
    Left,
    Right,
    Up,
    Down,
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Idle,
    /// A selection request is being applied.
    Applying,
}

/// Chooses the offset in the destination line of a vertical move.
///
/// `fallback` yields the column the caret had before the move.
pub trait OffsetStrategy {
    fn resolve(&self, target: &ContentAbstraction, fallback: &dyn Fn() -> usize) -> usize;
}

impl<F> OffsetStrategy for F
where
    F: Fn(&ContentAbstraction, &dyn Fn() -> usize) -> usize,
{
    fn resolve(&self, target: &ContentAbstraction, fallback: &dyn Fn() -> usize) -> usize {
        self(target, fallback)
    }
}

/// Keep the horizontal position of the caret.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreserveColumn;

impl OffsetStrategy for PreserveColumn {
    fn resolve(&self, _target: &ContentAbstraction, fallback: &dyn Fn() -> usize) -> usize {
        fallback()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedOffset(pub usize);

impl OffsetStrategy for FixedOffset {
    fn resolve(&self, _target: &ContentAbstraction, _fallback: &dyn Fn() -> usize) -> usize {
        self.0
    }
}

/// Last character of the destination line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineEnd;

impl OffsetStrategy for LineEnd {
    fn resolve(&self, target: &ContentAbstraction, _fallback: &dyn Fn() -> usize) -> usize {
        target.last_offset()
    }
}

/// Where a command left the caret. The caller owns this state.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorMove {
    pub project: NodeId,
    pub container: NodeId,
    /// Logical offset within `container`.
    pub offset: usize,
    pub request: SelectionRequest,
    pub scroll: Option<ScrollAction>,
    /// The caret ended up in a different outline node.
    pub moved: bool,
}

pub struct CursorNavigator<'h, T: ?Sized, S: ?Sized, V: ?Sized> {
    tree: &'h T,
    host: &'h mut S,
    viewport: &'h mut V,
    policy: ViewportPolicy,
    state: NavState,
}

impl<'h, T, S, V> CursorNavigator<'h, T, S, V>
where
    T: RenderTree + ?Sized,
    S: SelectionApi + Focus + ?Sized,
    V: Viewport + ?Sized,
{
    pub fn new(tree: &'h T, host: &'h mut S, viewport: &'h mut V) -> Self {
        Self {
            tree,
            host,
            viewport,
            policy: ViewportPolicy::default(),
            state: NavState::Idle,
        }
    }

    pub fn with_policy(mut self, policy: ViewportPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    /// Runs `movement` from `start`, a node inside some content container.
    /// Vertical moves keep the caret's column.
    pub fn navigate(&mut self, movement: Move, start: NodeId) -> Result<CursorMove> {
        self.navigate_with(movement, start, &PreserveColumn)
    }

    pub fn navigate_with<O>(&mut self, movement: Move, start: NodeId, strategy: &O) -> Result<CursorMove>
    where
        O: OffsetStrategy + ?Sized,
    {
        match movement {
            Move::Left => self.move_left(start),
            Move::Right => self.move_right(start),
            Move::Start => self.move_to_start(start),
            Move::End => self.move_to_end(start),
            Move::Up => self.move_up(start, strategy),
            Move::Down => self.move_down(start, strategy),
        }
    }

    pub fn move_left(&mut self, start: NodeId) -> Result<CursorMove> {
        self.horizontal(start, |current, _| current.saturating_sub(1))
    }

    pub fn move_right(&mut self, start: NodeId) -> Result<CursorMove> {
        self.horizontal(start, |current, _| current + 1)
    }

    pub fn move_to_start(&mut self, start: NodeId) -> Result<CursorMove> {
        self.horizontal(start, |_, _| 0)
    }

    pub fn move_to_end(&mut self, start: NodeId) -> Result<CursorMove> {
        self.horizontal(start, |_, text| text.last_offset())
    }

    pub fn move_down<O>(&mut self, start: NodeId, strategy: &O) -> Result<CursorMove>
    where
        O: OffsetStrategy + ?Sized,
    {
        self.vertical(start, strategy, next_navigable::<T>)
    }

    pub fn move_up<O>(&mut self, start: NodeId, strategy: &O) -> Result<CursorMove>
    where
        O: OffsetStrategy + ?Sized,
    {
        self.vertical(start, strategy, previous_navigable::<T>)
    }

    /// Moves the caret inside the text node it is anchored in. `offset`
    /// receives the current anchor offset; the result is clamped to the
    /// node's last character and returned.
    pub fn set_cursor_at<F>(&mut self, offset: F) -> Result<usize>
    where
        F: FnOnce(usize) -> usize,
    {
        let anchor = self.host.anchor().ok_or(NavigationError::NoAnchor)?;
        let Some(NodeKind::Text(text)) = self.tree.kind(anchor.node) else {
            return Err(NavigationError::NoAnchor);
        };
        let len = text.chars().count();
        let container = closest(self.tree, anchor.node, |_, kind| *kind == NodeKind::Content)
            .ok_or(NavigationError::NotInContent { node: anchor.node })?;

        let resolved = offset(anchor.offset).min(len.saturating_sub(1));
        self.apply(|host| {
            selection::apply(
                host,
                SelectionPoint {
                    node: anchor.node,
                    offset: resolved,
                },
                container,
            )
        });
        Ok(resolved)
    }

    fn horizontal<F>(&mut self, start: NodeId, target: F) -> Result<CursorMove>
    where
        F: FnOnce(usize, &ContentAbstraction) -> usize,
    {
        let text = ContentAbstraction::for_node(self.tree, start)?;
        let project = owner_node(self.tree, text.container())?;
        let current = self.current_offset(&text);
        let offset = text.clamp(target(current, &text));

        let request = self.apply(|host| text.place_cursor_at(host, offset));
        debug!("caret {current} -> {offset} in {project:?}");

        Ok(CursorMove {
            project,
            container: text.container(),
            offset,
            request,
            scroll: None,
            moved: false,
        })
    }

    fn vertical<O>(
        &mut self,
        start: NodeId,
        strategy: &O,
        walk: fn(&T, NodeId) -> Result<NodeId>,
    ) -> Result<CursorMove>
    where
        O: OffsetStrategy + ?Sized,
    {
        let origin = owner_node(self.tree, start)?;
        let column = ContentAbstraction::for_node(self.tree, start)
            .map(|text| self.current_offset(&text))
            .unwrap_or(0);

        let project = walk(self.tree, origin)?;
        let container = content_container(self.tree, project)?;
        let text = ContentAbstraction::for_container(self.tree, container);
        let offset = text.clamp(strategy.resolve(&text, &|| column));

        let request = self.apply(|host| text.place_cursor_at(host, offset));
        let scroll = self.policy.ensure_visible(&mut *self.viewport, container);
        debug!("caret moved from {origin:?} to {project:?} at {offset}");

        Ok(CursorMove {
            project,
            container,
            offset,
            request,
            scroll,
            moved: project != origin,
        })
    }

    /// Logical offset of the selection anchor in `text`, 0 when the anchor is
    /// somewhere else.
    fn current_offset(&self, text: &ContentAbstraction) -> usize {
        self.host
            .anchor()
            .and_then(|anchor| text.logical_offset(anchor))
            .unwrap_or(0)
    }

    fn apply<R>(&mut self, placement: impl FnOnce(&mut S) -> R) -> R {
        debug_assert_eq!(self.state, NavState::Idle);
        self.state = NavState::Applying;
        let result = placement(&mut *self.host);
        self.state = NavState::Idle;
        result
    }
}
