//! Structural walks over outline nodes.
//!
//! All walks stop at the tree-root sentinel. When a walk would land on it the
//! starting node is returned instead, which makes moving past either end of
//! the outline a no-op.

use crate::dom::{NodeId, NodeKind, RenderTree, closest};
use crate::error::{NavigationError, Result};

/// Nearest outline node enclosing `start`, excluding `start` itself when it
/// is an outline node.
pub fn owner_node<T>(tree: &T, start: NodeId) -> Result<NodeId>
where
    T: RenderTree + ?Sized,
{
    let own_id = tree.project(start).map(|project| project.id.clone());
    closest(tree, start, |_, kind| match kind {
        NodeKind::Project(project) => Some(&project.id) != own_id.as_ref(),
        _ => false,
    })
    .ok_or(NavigationError::OwnerNotFound { start })
}

/// Outline node reached by moving down from `node`.
pub fn next_navigable<T>(tree: &T, node: NodeId) -> Result<NodeId>
where
    T: RenderTree + ?Sized,
{
    if is_open(tree, node)
        && let Some(first) = child_projects(tree, node).next()
    {
        return Ok(first);
    }

    let mut current = node;
    loop {
        if let Some(next) = following_project(tree, current) {
            return Ok(next);
        }
        let ancestor = owner_node(tree, current)?;
        if is_root(tree, ancestor) {
            return Ok(node);
        }
        current = ancestor;
    }
}

/// Outline node reached by moving up from `node`.
pub fn previous_navigable<T>(tree: &T, node: NodeId) -> Result<NodeId>
where
    T: RenderTree + ?Sized,
{
    let candidate = match preceding_project(tree, node) {
        Some(sibling) => last_visible_descendant(tree, sibling),
        None => owner_node(tree, node)?,
    };

    if is_root(tree, candidate) {
        Ok(node)
    } else {
        Ok(candidate)
    }
}

/// The editable line of an outline node (`Name > Content`).
pub fn content_container<T>(tree: &T, project: NodeId) -> Result<NodeId>
where
    T: RenderTree + ?Sized,
{
    tree.children(project)
        .iter()
        .copied()
        .filter(|&child| tree.kind(child) == Some(&NodeKind::Name))
        .flat_map(|name| tree.children(name).iter().copied())
        .find(|&child| tree.kind(child) == Some(&NodeKind::Content))
        .ok_or(NavigationError::MissingContent { project })
}

pub fn is_open<T>(tree: &T, node: NodeId) -> bool
where
    T: RenderTree + ?Sized,
{
    tree.project(node).is_some_and(|project| project.is_open)
}

pub fn is_root<T>(tree: &T, node: NodeId) -> bool
where
    T: RenderTree + ?Sized,
{
    tree.project(node).is_some_and(|project| project.is_root)
}

/// Child outline nodes of `project`, in order.
pub fn child_projects<T>(tree: &T, project: NodeId) -> impl DoubleEndedIterator<Item = NodeId>
where
    T: RenderTree + ?Sized,
{
    tree.children(project)
        .iter()
        .copied()
        .filter(move |&child| tree.kind(child) == Some(&NodeKind::Children))
        .flat_map(move |list| tree.children(list).iter().copied())
        .filter(move |&child| tree.project(child).is_some())
}

fn following_project<T>(tree: &T, node: NodeId) -> Option<NodeId>
where
    T: RenderTree + ?Sized,
{
    tree.next_sibling(node)
        .filter(|&sibling| tree.project(sibling).is_some())
}

fn preceding_project<T>(tree: &T, node: NodeId) -> Option<NodeId>
where
    T: RenderTree + ?Sized,
{
    tree.previous_sibling(node)
        .filter(|&sibling| tree.project(sibling).is_some())
}

/// Last child of last child... for as long as the nodes are open.
fn last_visible_descendant<T>(tree: &T, mut node: NodeId) -> NodeId
where
    T: RenderTree + ?Sized,
{
    while is_open(tree, node)
        && let Some(last) = child_projects(tree, node).next_back()
    {
        node = last;
    }
    node
}
