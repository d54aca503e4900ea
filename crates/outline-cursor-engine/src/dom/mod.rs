//! Typed model of the host render tree.
//!
//! The navigation core never sees markup. It sees a tree of [`NodeKind`]s
//! reachable through the [`RenderTree`] capability: parent links, ordered
//! children and the kind of each node. Outline nodes carry their `open` and
//! `root` state as typed flags, so no class-name matching happens anywhere.
//!
//! [`DomTree`] is the in-memory arena implementation used by the loader, the
//! terminal host and the tests. Its shape mirrors what an outline editor
//! renders for every outline node:
//!
//! ```text
//! Project
//! ├── Name
//! │   └── Content
//! │       ├── Text("plain ")
//! │       └── Span(Strong)
//! │           └── Text("bold")
//! └── Children
//!     ├── Project ...
//!     └── Project ...
//! ```

mod tree;

pub use tree::DomTree;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Handle to a node of a [`RenderTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Stable key of an outline node (the `projectid` attribute of the host).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Fresh random identifier for nodes that arrive without one.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outline node attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    /// Children are expanded. Independent of whether any children exist.
    pub is_open: bool,
    /// Tree-root sentinel: never navigable, ends every upward walk.
    pub is_root: bool,
}

/// Inline formatting that splits a line of text into several segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InlineStyle {
    Emphasis,
    Strong,
    Strikethrough,
    Code,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Project(Project),
    /// Wrapper around the content container of one outline node.
    Name,
    /// Content container: the editable line of text.
    Content,
    /// Wrapper holding the child outline nodes, in order.
    Children,
    Span(InlineStyle),
    /// Text-bearing leaf.
    Text(String),
    /// Neither text-bearing nor a container.
    Comment(String),
}

impl NodeKind {
    pub fn is_text(&self) -> bool {
        matches!(self, NodeKind::Text(_))
    }

    /// Element that may hold further nodes.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Project(_)
                | NodeKind::Name
                | NodeKind::Content
                | NodeKind::Children
                | NodeKind::Span(_)
        )
    }

    pub fn as_project(&self) -> Option<&Project> {
        match self {
            NodeKind::Project(project) => Some(project),
            _ => None,
        }
    }
}

/// Read access to the host tree.
pub trait RenderTree {
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Child nodes in document order. Unknown nodes have none.
    fn children(&self, node: NodeId) -> &[NodeId];

    fn kind(&self, node: NodeId) -> Option<&NodeKind>;

    fn project(&self, node: NodeId) -> Option<&Project> {
        self.kind(node).and_then(NodeKind::as_project)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|&n| n == node)?;
        siblings.get(index + 1).copied()
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|&n| n == node)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    /// Length of a text-bearing leaf in characters, zero for anything else.
    fn text_len(&self, node: NodeId) -> usize {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => text.chars().count(),
            _ => 0,
        }
    }
}

/// Nearest node, starting at `start` itself, for which `predicate` holds.
pub fn closest<T, P>(tree: &T, start: NodeId, mut predicate: P) -> Option<NodeId>
where
    T: RenderTree + ?Sized,
    P: FnMut(NodeId, &NodeKind) -> bool,
{
    let mut current = Some(start);
    while let Some(node) = current {
        if let Some(kind) = tree.kind(node)
            && predicate(node, kind)
        {
            return Some(node);
        }
        current = tree.parent(node);
    }
    None
}
