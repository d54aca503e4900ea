use outline_cursor_engine::{DomTree, OutlineOptions, RenderTree, parse_outline};
use serde::Serialize;

#[derive(Serialize)]
struct Line {
    depth: usize,
    text: String,
    open: bool,
    segments: usize,
}

fn lines(tree: &DomTree) -> Vec<Line> {
    tree.visible_projects()
        .into_iter()
        .map(|(node, depth)| {
            let content = tree.content(node).unwrap();
            Line {
                depth,
                text: tree.text(content),
                open: tree.project(node).unwrap().is_open,
                segments: tree.segments(content).len(),
            }
        })
        .collect()
}

#[test]
fn nested_outline_snapshot() {
    let markdown = "\
- Groceries
  - Milk and *fresh* bread
  - Eggs
- Work
  - Call the **bank** today
    - Ask about `fees`
- Ideas
";
    let tree = parse_outline(markdown, OutlineOptions::default());

    insta::assert_yaml_snapshot!("nested_outline", lines(&tree));
}

/// Every character of every line is reachable through exactly one segment.
#[test]
fn segment_lengths_add_up_to_line_length() {
    let markdown = "- a *b* **c `d`** e\n  - [link](https://example.com) tail\n";
    let tree = parse_outline(markdown, OutlineOptions::default());

    for (node, _) in tree.visible_projects() {
        let content = tree.content(node).unwrap();
        let total: usize = tree
            .segments(content)
            .into_iter()
            .map(|segment| tree.text_len(segment))
            .sum();
        assert_eq!(total, tree.text(content).chars().count());
    }
}
