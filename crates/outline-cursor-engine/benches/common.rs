// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_outline(breadth: usize, depth: usize) -> String {
    let mut markdown = String::new();
    push_level(&mut markdown, breadth, depth, 0);
    markdown
}

#[allow(dead_code)]
fn push_level(markdown: &mut String, breadth: usize, remaining_depth: usize, level: usize) {
    if remaining_depth == 0 {
        return;
    }

    for i in 0..breadth {
        let indent = "  ".repeat(level);
        markdown.push_str(&format!(
            "{indent}- item {level}.{i} with **bold** and *emphasis* text\n"
        ));
        push_level(markdown, breadth, remaining_depth - 1, level + 1);
    }
}
