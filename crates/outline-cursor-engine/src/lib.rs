/*!
 * # Outline cursor navigation
 *
 * Moves the caret through an outline editor: a tree of nested outline nodes
 * ("projects"), each holding one editable line of text.
 *
 * ## Module Structure
 *
 * - **`dom`**: typed render tree (`RenderTree`) and the `DomTree` arena
 * - **`text`**: `ContentAbstraction`, one logical line over fragmented text
 * - **`locator`**: owner / next / previous outline node walks
 * - **`viewport`**: `ViewportPolicy`, the minimal scroll to reveal a line
 * - **`selection`**: selection and focus capabilities of the host
 * - **`navigator`**: `CursorNavigator`, the directional commands
 * - **`parsing`**: outline loading from markdown bullet lists
 * - **`host`**: in-memory selection and line layout
 *
 * ## Usage Pattern
 *
 * ```rust
 * use outline_cursor_engine::*;
 *
 * let tree = parse_outline("- first\n  - nested\n- second", OutlineOptions::default());
 * let first = tree.child_projects(tree.root())[0];
 * let text = tree.segments(first)[0];
 *
 * let mut selection = MemorySelection::at(SelectionPoint { node: text, offset: 3 });
 * let mut layout = LineLayout::new(&tree, 20.0, 600.0).with_padding_top(30.0);
 * let mut navigator = CursorNavigator::new(&tree, &mut selection, &mut layout);
 *
 * let moved = navigator.navigate(Move::Down, text).unwrap();
 * assert_eq!(moved.offset, 3);
 * assert_eq!(tree.text(moved.container), "nested");
 * ```
 */

pub mod dom;
pub mod error;
pub mod host;
pub mod locator;
pub mod navigator;
pub mod parsing;
pub mod selection;
pub mod text;
pub mod viewport;

// Re-export key types for easier usage
pub use dom::{DomTree, InlineStyle, NodeId, NodeKind, Project, ProjectId, RenderTree};
pub use error::NavigationError;
pub use host::{LineLayout, MemorySelection, SelectionEvent};
pub use navigator::{
    CursorMove, CursorNavigator, FixedOffset, LineEnd, Move, NavState, OffsetStrategy, PreserveColumn,
};
pub use parsing::{OutlineOptions, parse_outline};
pub use selection::{Direction, Focus, Granularity, SelectionApi, SelectionPoint, SelectionRequest};
pub use text::{ContentAbstraction, TextSegment};
pub use viewport::{Rect, ScrollAction, Viewport, ViewportPolicy};
