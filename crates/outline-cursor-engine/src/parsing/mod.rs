//! Builds a render tree from a markdown bullet list.
//!
//! Every list item becomes an outline node and nested lists become its
//! children. Inline markup keeps its structure: emphasis, strong text, code
//! and links turn into span elements wrapping their own text nodes, so a
//! line like `plain **bold** tail` is three segments at two depths, which is
//! exactly what the navigator has to cope with in a rendered editor.
//!
//! # Pulldown-cmark event flow
//!
//! ```markdown
//! - Parent *note*
//!   - Child
//! ```
//!
//! 1. `Start(List)`, `Start(Item)`
//! 2. `Text("Parent ")`, `Start(Emphasis)`, `Text("note")`, `End(Emphasis)`
//! 3. `Start(List)`, `Start(Item)`, `Text("Child")`, `End(Item)`, `End(List)`
//! 4. `End(Item)`, `End(List)`
//!
//! Nested lists arrive inside their parent item, after the parent's text and
//! before the parent's `End(Item)`.
//!
//! Content outside list items (headings, loose paragraphs) is not part of the
//! outline and is dropped.

use log::debug;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::dom::{DomTree, InlineStyle, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Open every node that has children.
    pub open_by_default: bool,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            open_by_default: true,
        }
    }
}

pub fn parse_outline(markdown: &str, options: OutlineOptions) -> DomTree {
    let mut builder = OutlineBuilder::new(options);
    for event in Parser::new(markdown) {
        builder.process_event(event);
    }
    builder.finish()
}

/// Tracks where the next outline node and the next piece of inline text go.
struct OutlineBuilder {
    tree: DomTree,
    options: OutlineOptions,
    /// Outline nodes whose `End(Item)` has not been seen yet.
    projects: Vec<NodeId>,
    /// Insertion points for inline content: the current item's content
    /// container followed by any open spans. Empty outside item text.
    inline: Vec<NodeId>,
}

impl OutlineBuilder {
    fn new(options: OutlineOptions) -> Self {
        Self {
            tree: DomTree::new(),
            options,
            projects: Vec::new(),
            inline: Vec::new(),
        }
    }

    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(Tag::Item) => self.start_item(),
            Event::End(TagEnd::Item) => self.end_item(),
            Event::Start(Tag::List(_)) => {
                // Anything after a nested list is not part of the parent line.
                self.inline.clear();
            }
            Event::Start(Tag::Emphasis) => self.start_span(InlineStyle::Emphasis),
            Event::Start(Tag::Strong) => self.start_span(InlineStyle::Strong),
            Event::Start(Tag::Strikethrough) => self.start_span(InlineStyle::Strikethrough),
            Event::Start(Tag::Link { .. }) => self.start_span(InlineStyle::Link),
            Event::End(TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link) => {
                if self.inline.len() > 1 {
                    self.inline.pop();
                }
            }
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                if let Some(&parent) = self.inline.last() {
                    let span = self.tree.append_span(parent, InlineStyle::Code);
                    self.tree.append_text(span, &code);
                }
            }
            Event::SoftBreak | Event::HardBreak => self.push_text(" "),
            Event::InlineHtml(html) | Event::Html(html) => {
                if let Some(&parent) = self.inline.last() {
                    self.tree.append_comment(parent, &html);
                }
            }
            other => debug!("ignoring {other:?} outside outline text"),
        }
    }

    fn start_item(&mut self) {
        let parent = self.projects.last().copied().unwrap_or(self.tree.root());
        let project = self.tree.add_project(parent, "");
        self.projects.push(project);
        self.inline.clear();
        if let Some(content) = self.tree.content(project) {
            self.inline.push(content);
        }
    }

    fn end_item(&mut self) {
        self.inline.clear();
        if let Some(project) = self.projects.pop()
            && self.options.open_by_default
            && !self.tree.child_projects(project).is_empty()
        {
            self.tree.set_open(project, true);
        }
    }

    fn start_span(&mut self, style: InlineStyle) {
        if let Some(&parent) = self.inline.last() {
            let span = self.tree.append_span(parent, style);
            self.inline.push(span);
        }
    }

    fn push_text(&mut self, text: &str) {
        match self.inline.last() {
            Some(&parent) => {
                self.tree.append_text(parent, text);
            }
            None => debug!("dropping text outside outline items: {text:?}"),
        }
    }

    fn finish(self) -> DomTree {
        debug_assert!(self.projects.is_empty(), "unbalanced list items");
        self.tree
    }
}
