//! One logical line of text over a fragmented content container.
//!
//! Inline formatting splits a line into several text nodes nested at
//! different depths. [`ContentAbstraction`] flattens them, in document order,
//! into a list of segments so callers can talk about plain character offsets.

use log::{trace, warn};

use crate::dom::{NodeId, NodeKind, RenderTree, closest};
use crate::error::{NavigationError, Result};
use crate::selection::{self, Focus, SelectionApi, SelectionPoint, SelectionRequest};

/// A text-bearing leaf and its length in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSegment {
    pub node: NodeId,
    pub len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentAbstraction {
    container: NodeId,
    segments: Vec<TextSegment>,
    skipped: Vec<NodeId>,
}

impl ContentAbstraction {
    /// Abstraction over the content container enclosing `node` (or `node`
    /// itself when it is one).
    pub fn for_node<T>(tree: &T, node: NodeId) -> Result<Self>
    where
        T: RenderTree + ?Sized,
    {
        let container = closest(tree, node, |_, kind| *kind == NodeKind::Content)
            .ok_or(NavigationError::NotInContent { node })?;
        Ok(Self::for_container(tree, container))
    }

    pub fn for_container<T>(tree: &T, container: NodeId) -> Self
    where
        T: RenderTree + ?Sized,
    {
        let mut segments = Vec::new();
        let mut skipped = Vec::new();
        let mut stack: Vec<NodeId> = tree.children(container).iter().rev().copied().collect();

        while let Some(node) = stack.pop() {
            match tree.kind(node) {
                Some(NodeKind::Text(text)) => segments.push(TextSegment {
                    node,
                    len: text.chars().count(),
                }),
                Some(kind) if kind.is_container() => {
                    stack.extend(tree.children(node).iter().rev());
                }
                other => {
                    warn!("unexpected node {node:?} ({other:?}) in content {container:?}, skipping");
                    skipped.push(node);
                }
            }
        }

        Self {
            container,
            segments,
            skipped,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn segments(&self) -> &[TextSegment] {
        &self.segments
    }

    /// Nodes left out of the mapping because they were neither text nor
    /// containers.
    pub fn skipped(&self) -> &[NodeId] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.segments.iter().map(|segment| segment.len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest offset the caret may sit on: the last character.
    pub fn last_offset(&self) -> usize {
        self.len().saturating_sub(1)
    }

    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.last_offset())
    }

    /// Maps a logical offset to a point inside one segment. Offsets past the
    /// end land on the end of the last segment; an empty container resolves
    /// to the container itself.
    pub fn resolve(&self, offset: usize) -> SelectionPoint {
        let mut remaining = offset;
        for segment in &self.segments {
            if remaining < segment.len {
                return SelectionPoint {
                    node: segment.node,
                    offset: remaining,
                };
            }
            remaining -= segment.len;
        }

        match self.segments.last() {
            Some(last) => SelectionPoint {
                node: last.node,
                offset: last.len,
            },
            None => SelectionPoint {
                node: self.container,
                offset: 0,
            },
        }
    }

    /// Inverse of [`resolve`](Self::resolve). `None` when `point` is outside
    /// this container.
    pub fn logical_offset(&self, point: SelectionPoint) -> Option<usize> {
        if point.node == self.container {
            return Some(0);
        }
        let mut before = 0;
        for segment in &self.segments {
            if segment.node == point.node {
                return Some(before + point.offset.min(segment.len));
            }
            before += segment.len;
        }
        None
    }

    pub fn text<T>(&self, tree: &T) -> String
    where
        T: RenderTree + ?Sized,
    {
        self.segments
            .iter()
            .filter_map(|segment| match tree.kind(segment.node) {
                Some(NodeKind::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Puts a one-character selection at `offset` and focuses the container.
    pub fn place_cursor_at<S>(&self, host: &mut S, offset: usize) -> SelectionRequest
    where
        S: SelectionApi + Focus + ?Sized,
    {
        let point = self.resolve(offset);
        trace!(
            "offset {offset} in {:?} resolved to {:?}+{}",
            self.container, point.node, point.offset
        );
        selection::apply(host, point, self.container);
        point
    }
}
