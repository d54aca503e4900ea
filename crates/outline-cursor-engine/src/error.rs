use thiserror::Error;

use crate::dom::NodeId;

/// Structural failures: the tree does not have the shape navigation needs.
///
/// Returned before any selection change is made, so a failed command leaves
/// the cursor where it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no enclosing outline node above {start:?}")]
    OwnerNotFound { start: NodeId },

    #[error("outline node {project:?} has no content container")]
    MissingContent { project: NodeId },

    #[error("{node:?} is not inside a content container")]
    NotInContent { node: NodeId },

    #[error("the selection is not anchored in a text node")]
    NoAnchor,
}

pub type Result<T, E = NavigationError> = std::result::Result<T, E>;
