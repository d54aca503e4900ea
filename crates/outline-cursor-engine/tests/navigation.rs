use outline_cursor_engine::*;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

/// Root > [A(open)[A1, A2], B]
struct Outline {
    tree: DomTree,
    a: NodeId,
    a1: NodeId,
    a2: NodeId,
    b: NodeId,
}

impl Outline {
    fn text(&self, project: NodeId) -> NodeId {
        self.tree.segments(project)[0]
    }

    fn by_name(&self, name: &str) -> NodeId {
        match name {
            "A" => self.a,
            "A1" => self.a1,
            "A2" => self.a2,
            "B" => self.b,
            other => panic!("no node named {other}"),
        }
    }
}

#[fixture]
fn outline() -> Outline {
    let mut tree = DomTree::new();
    let a = tree.add_project(tree.root(), "alpha");
    let a1 = tree.add_project(a, "alpha one");
    let a2 = tree.add_project(a, "alpha two");
    let b = tree.add_project(tree.root(), "bravo");
    tree.set_open(a, true);
    Outline { tree, a, a1, a2, b }
}

fn run(outline: &Outline, movement: Move, from: &str, offset: usize) -> (CursorMove, MemorySelection, f64) {
    let start = outline.text(outline.by_name(from));
    let mut selection = MemorySelection::at(SelectionPoint { node: start, offset });
    let mut layout = LineLayout::new(&outline.tree, 20.0, 600.0).with_padding_top(30.0);
    let moved = CursorNavigator::new(&outline.tree, &mut selection, &mut layout)
        .navigate(movement, start)
        .unwrap();
    let scroll_top = layout.scroll_top();
    (moved, selection, scroll_top)
}

#[rstest]
#[case::down_into_open_node(Move::Down, "A", "A1")]
#[case::down_between_siblings(Move::Down, "A1", "A2")]
#[case::down_out_of_last_child(Move::Down, "A2", "B")]
#[case::down_at_end_of_tree(Move::Down, "B", "B")]
#[case::up_into_open_sibling(Move::Up, "B", "A2")]
#[case::up_to_parent(Move::Up, "A1", "A")]
#[case::up_at_start_of_tree(Move::Up, "A", "A")]
fn vertical_moves_follow_the_outline(
    outline: Outline,
    #[case] movement: Move,
    #[case] from: &str,
    #[case] to: &str,
) {
    let (moved, _, _) = run(&outline, movement, from, 0);

    assert_eq!(moved.project, outline.by_name(to));
    assert_eq!(moved.moved, from != to);
}

#[rstest]
fn vertical_move_keeps_column(outline: Outline) {
    let (moved, selection, _) = run(&outline, Move::Down, "A", 3);

    assert_eq!(moved.offset, 3);
    assert_eq!(moved.request.node, outline.text(outline.a1));
    assert_eq!(selection.focused(), outline.tree.content(outline.a1));
    assert_eq!(selection.extent(), 1);
}

#[rstest]
fn vertical_move_clamps_column_to_shorter_line(outline: Outline) {
    let (moved, _, _) = run(&outline, Move::Up, "A1", 8);
    // "alpha" has five characters
    assert_eq!(moved.offset, 4);
}

#[rstest]
fn left_at_start_of_first_node_is_noop(outline: Outline) {
    let (moved, _, _) = run(&outline, Move::Left, "A", 0);

    assert_eq!((moved.project, moved.offset), (outline.a, 0));
    assert!(!moved.moved);
}

#[rstest]
fn right_at_end_of_last_node_is_noop(outline: Outline) {
    let (moved, _, _) = run(&outline, Move::Right, "B", 4);

    assert_eq!((moved.project, moved.offset), (outline.b, 4));
}

#[rstest]
fn right_then_left_returns_to_origin(outline: Outline) {
    let start = outline.text(outline.a2);
    let mut selection = MemorySelection::at(SelectionPoint { node: start, offset: 5 });
    let mut layout = LineLayout::new(&outline.tree, 20.0, 600.0);
    let mut navigator = CursorNavigator::new(&outline.tree, &mut selection, &mut layout);

    navigator.move_right(start).unwrap();
    let back = navigator.move_left(start).unwrap();

    assert_eq!((back.project, back.offset), (outline.a2, 5));
}

#[rstest]
fn horizontal_moves_never_scroll(outline: Outline) {
    let (moved, _, scroll_top) = run(&outline, Move::End, "B", 0);

    assert_eq!(moved.scroll, None);
    assert_eq!(scroll_top, 0.0);
}

#[rstest]
fn line_end_strategy_targets_last_character(outline: Outline) {
    let start = outline.text(outline.a);
    let mut selection = MemorySelection::at(SelectionPoint { node: start, offset: 0 });
    let mut layout = LineLayout::new(&outline.tree, 20.0, 600.0);
    let mut navigator = CursorNavigator::new(&outline.tree, &mut selection, &mut layout);

    let moved = navigator.move_down(start, &LineEnd).unwrap();
    assert_eq!(moved.offset, "alpha one".len() - 1);

    let moved = navigator.navigate_with(Move::Down, start, &FixedOffset(2)).unwrap();
    assert_eq!(moved.offset, 2);
}

#[test]
fn moving_down_scrolls_line_above_fold_into_view() {
    let markdown: String = (0..10).map(|i| format!("- line {i}\n")).collect();
    let tree = parse_outline(&markdown, OutlineOptions::default());
    let lines = tree.child_projects(tree.root());
    // 30 padding + 5 lines of 20 fill a 130 high viewport exactly
    let start = tree.segments(lines[4])[0];
    let mut selection = MemorySelection::at(SelectionPoint { node: start, offset: 0 });
    let mut layout = LineLayout::new(&tree, 20.0, 130.0).with_padding_top(30.0);

    let moved = CursorNavigator::new(&tree, &mut selection, &mut layout)
        .move_down(start, &PreserveColumn)
        .unwrap();

    assert_eq!(moved.project, lines[5]);
    assert_eq!(moved.scroll, Some(ScrollAction::BelowFold { dy: 20.0 }));
    assert_eq!(layout.scroll_top(), 20.0);
    assert_eq!(layout.scroll_count(), 1);
}

#[test]
fn moving_up_aligns_line_under_overlay() {
    let markdown: String = (0..10).map(|i| format!("- line {i}\n")).collect();
    let tree = parse_outline(&markdown, OutlineOptions::default());
    let lines = tree.child_projects(tree.root());
    let start = tree.segments(lines[3])[0];
    let mut selection = MemorySelection::at(SelectionPoint { node: start, offset: 0 });
    // line 3 sits right under the overlay, line 2 is hidden behind it
    let mut layout = LineLayout::new(&tree, 20.0, 130.0)
        .with_padding_top(30.0)
        .with_scroll_top(60.0);

    let moved = CursorNavigator::new(&tree, &mut selection, &mut layout)
        .move_up(start, &PreserveColumn)
        .unwrap();

    assert_eq!(moved.project, lines[2]);
    assert_eq!(moved.scroll, Some(ScrollAction::AboveOverlay { dy: -20.0 }));
    assert_eq!(layout.bounding_box(moved.container).unwrap().top, 30.0);
}

#[test]
fn fully_visible_destination_does_not_scroll() {
    let tree = parse_outline("- one\n- two", OutlineOptions::default());
    let lines = tree.child_projects(tree.root());
    let start = tree.segments(lines[0])[0];
    let mut selection = MemorySelection::at(SelectionPoint { node: start, offset: 0 });
    let mut layout = LineLayout::new(&tree, 20.0, 600.0).with_padding_top(30.0);

    let moved = CursorNavigator::new(&tree, &mut selection, &mut layout)
        .move_down(start, &PreserveColumn)
        .unwrap();

    assert_eq!(moved.scroll, None);
    assert_eq!(layout.scroll_count(), 0);
}

#[test]
fn fragmented_destination_places_caret_in_right_segment() {
    let tree = parse_outline("- plain line\n- ab **cd** ef", OutlineOptions::default());
    let lines = tree.child_projects(tree.root());
    let start = tree.segments(lines[0])[0];
    let mut selection = MemorySelection::at(SelectionPoint { node: start, offset: 4 });
    let mut layout = LineLayout::new(&tree, 20.0, 600.0);

    let moved = CursorNavigator::new(&tree, &mut selection, &mut layout)
        .move_down(start, &PreserveColumn)
        .unwrap();

    let bold = tree.segments(lines[1])[1];
    assert_eq!(tree.text(bold), "cd");
    assert_eq!(moved.request, SelectionPoint { node: bold, offset: 1 });
}

#[test]
fn empty_destination_targets_its_container() {
    let tree = parse_outline("- full\n-\n", OutlineOptions::default());
    let lines = tree.child_projects(tree.root());
    let start = tree.segments(lines[0])[0];
    let mut selection = MemorySelection::at(SelectionPoint { node: start, offset: 2 });
    let mut layout = LineLayout::new(&tree, 20.0, 600.0);

    let moved = CursorNavigator::new(&tree, &mut selection, &mut layout)
        .move_down(start, &PreserveColumn)
        .unwrap();

    let container = tree.content(lines[1]).unwrap();
    assert_eq!(moved.offset, 0);
    assert_eq!(moved.request, SelectionPoint { node: container, offset: 0 });
}

#[test]
fn missing_destination_content_leaves_selection_untouched() {
    let mut tree = DomTree::new();
    let a = tree.add_project(tree.root(), "alpha");
    let b = tree.add_project(tree.root(), "bravo");
    let name = tree.children(b)[0];
    tree.detach(name);

    let start = tree.segments(a)[0];
    let mut selection = MemorySelection::at(SelectionPoint { node: start, offset: 1 });
    let mut layout = LineLayout::new(&tree, 20.0, 600.0);

    let result = CursorNavigator::new(&tree, &mut selection, &mut layout).move_down(start, &PreserveColumn);

    assert_eq!(result, Err(NavigationError::MissingContent { project: b }));
    assert!(selection.events().is_empty());
    assert_eq!(selection.anchor(), Some(SelectionPoint { node: start, offset: 1 }));
}

#[test]
fn start_outside_any_outline_node_is_structural_error() {
    let tree = DomTree::new();
    let root = tree.root();
    let mut selection = MemorySelection::new();
    let mut layout = LineLayout::new(&tree, 20.0, 600.0);

    let result = CursorNavigator::new(&tree, &mut selection, &mut layout).navigate(Move::Down, root);

    assert_eq!(result, Err(NavigationError::OwnerNotFound { start: root }));
}

#[test]
fn custom_overlay_height_is_respected() {
    let markdown: String = (0..6).map(|i| format!("- line {i}\n")).collect();
    let tree = parse_outline(&markdown, OutlineOptions::default());
    let lines = tree.child_projects(tree.root());
    let start = tree.segments(lines[1])[0];
    let mut selection = MemorySelection::at(SelectionPoint { node: start, offset: 0 });
    let mut layout = LineLayout::new(&tree, 20.0, 600.0);

    let moved = CursorNavigator::new(&tree, &mut selection, &mut layout)
        .with_policy(ViewportPolicy::new(0.0))
        .move_up(start, &PreserveColumn)
        .unwrap();

    assert_eq!(moved.project, lines[0]);
    assert_eq!(moved.scroll, None);
}
