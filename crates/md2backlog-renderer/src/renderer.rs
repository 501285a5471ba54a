//! Tree walker emitting Backlog notation.
//!
//! The walk is a single pre-order traversal. Structural renderers write the
//! text of their own subtree and return [`WalkStatus::SkipChildren`]; the
//! generic text rule then covers whatever is left unclaimed.

use crate::ancestry::{is_claimed, is_descendant_of};
use crate::nesting::{is_ordered, nest_level};
use crate::notation;
use crate::tree::{EmphasisWeight, NodeId, NodeKind, NodeTag, Span, SyntaxTree};
use crate::util::is_line_terminator;

/// Whether the walker should descend into a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    Continue,
    SkipChildren,
}

#[derive(Debug, Clone, Copy)]
enum Visit {
    Enter(NodeId),
    Leave(NodeId),
}

/// Renders one syntax tree into Backlog notation.
pub struct BacklogRenderer<'t, 'src> {
    tree: &'t SyntaxTree<'src>,
    output: String,
}

impl<'t, 'src> BacklogRenderer<'t, 'src> {
    #[must_use]
    pub fn new(tree: &'t SyntaxTree<'src>) -> Self {
        Self {
            tree,
            output: String::with_capacity(tree.source().len() + 64),
        }
    }

    /// Walk the whole tree and return the assembled output.
    #[must_use]
    pub fn render(mut self) -> String {
        let tree = self.tree;
        let mut pending = vec![Visit::Enter(tree.root())];
        while let Some(visit) = pending.pop() {
            match visit {
                Visit::Enter(id) => {
                    pending.push(Visit::Leave(id));
                    if self.enter(id) == WalkStatus::Continue {
                        let first_child = pending.len();
                        pending.extend(tree.children(id).map(Visit::Enter));
                        pending[first_child..].reverse();
                    }
                }
                Visit::Leave(id) => self.leave(id),
            }
        }
        tracing::debug!(
            nodes = tree.len(),
            bytes = self.output.len(),
            "Rendered Backlog notation"
        );
        self.finish()
    }

    fn enter(&mut self, id: NodeId) -> WalkStatus {
        let tree = self.tree;
        match tree.kind(id) {
            NodeKind::Heading(level) => {
                self.heading(id, *level);
                WalkStatus::SkipChildren
            }
            NodeKind::Emphasis(weight) => {
                let marker = match weight {
                    EmphasisWeight::Bold => notation::BOLD,
                    EmphasisWeight::Italic => notation::ITALIC,
                };
                self.wrapped(id, marker, marker);
                WalkStatus::SkipChildren
            }
            NodeKind::Strikethrough => {
                self.wrapped(id, notation::STRIKETHROUGH, notation::STRIKETHROUGH);
                WalkStatus::SkipChildren
            }
            NodeKind::Link { destination } => {
                self.link(id, destination);
                WalkStatus::SkipChildren
            }
            NodeKind::CodeSpan => {
                self.wrapped(id, notation::CODE_OPEN, notation::CODE_CLOSE);
                WalkStatus::SkipChildren
            }
            NodeKind::FencedCodeBlock { language, lines } => {
                self.code_block(id, language.as_deref(), lines);
                WalkStatus::SkipChildren
            }
            NodeKind::IndentedCodeBlock { lines } => {
                self.code_block(id, None, lines);
                WalkStatus::SkipChildren
            }
            NodeKind::Blockquote => {
                self.blockquote(id, 1);
                if tree.next_sibling(id).is_some() {
                    self.output.push_str("\n\n");
                }
                WalkStatus::SkipChildren
            }
            NodeKind::ListItem => {
                self.list_item(id);
                WalkStatus::Continue
            }
            NodeKind::Table => {
                self.table(id);
                WalkStatus::SkipChildren
            }
            NodeKind::Text(span) => {
                if !is_claimed(tree, id) {
                    self.text(*span);
                }
                WalkStatus::Continue
            }
            NodeKind::Document
            | NodeKind::Paragraph
            | NodeKind::List { .. }
            | NodeKind::TextBlock
            | NodeKind::TableHeaderRow
            | NodeKind::TableRow
            | NodeKind::TableCell
            | NodeKind::Image { .. }
            | NodeKind::TaskCheckBox { .. }
            | NodeKind::HtmlBlock
            | NodeKind::Html(_)
            | NodeKind::ThematicBreak
            | NodeKind::Other => WalkStatus::Continue,
        }
    }

    fn leave(&mut self, id: NodeId) {
        if !matches!(self.tree.kind(id), NodeKind::Paragraph) {
            return;
        }
        let Some(next) = self.tree.next_sibling(id) else {
            return;
        };
        if matches!(self.tree.kind(next), NodeKind::List { .. })
            || is_descendant_of(self.tree, id, NodeTag::Blockquote)
            || is_descendant_of(self.tree, id, NodeTag::ListItem)
        {
            return;
        }
        self.output.push('\n');
    }

    fn heading(&mut self, id: NodeId, level: u8) {
        for _ in 0..level {
            self.output.push(notation::HEADING);
        }
        self.output.push(' ');
        self.push_direct_text(id);
        self.output.push('\n');
    }

    fn wrapped(&mut self, id: NodeId, open: &str, close: &str) {
        self.output.push_str(open);
        self.push_direct_text(id);
        self.output.push_str(close);
    }

    fn link(&mut self, id: NodeId, destination: &str) {
        self.output.push_str(notation::LINK_OPEN);
        self.push_direct_text(id);
        self.output.push(notation::LINK_SEPARATOR);
        self.output.push_str(destination);
        self.output.push_str(notation::LINK_CLOSE);
    }

    fn code_block(&mut self, id: NodeId, language: Option<&str>, lines: &[String]) {
        self.output.push_str(notation::CODE_BLOCK_OPEN);
        if let Some(language) = language.filter(|lang| !lang.is_empty()) {
            self.output.push(notation::LINK_SEPARATOR);
            self.output.push_str(language);
        }
        self.output.push_str("}\n");
        for line in lines {
            self.output.push_str(line);
        }
        self.output.push_str(notation::CODE_BLOCK_CLOSE);
        if self.tree.next_sibling(id).is_some() {
            self.output.push('\n');
        }
    }

    /// Quote lines of `id` and its nested blockquotes, `depth` levels deep.
    fn blockquote(&mut self, id: NodeId, depth: usize) {
        let tree = self.tree;
        let prefix = notation::QUOTE.repeat(depth);
        let mut wrote_child = false;
        for child in tree.children(id) {
            match tree.kind(child) {
                NodeKind::Paragraph => {
                    if wrote_child {
                        self.output.push('\n');
                    }
                    self.quote_lines(child, &prefix);
                    wrote_child = true;
                }
                NodeKind::Blockquote => {
                    self.output.push('\n');
                    self.blockquote(child, depth + 1);
                    wrote_child = true;
                }
                _ => {}
            }
        }
    }

    /// One prefixed output line per source line of the paragraph's text.
    fn quote_lines(&mut self, paragraph: NodeId, prefix: &str) {
        let tree = self.tree;
        let mut line_open = false;
        let mut first_line = true;
        for span in tree.text_children(paragraph) {
            if !line_open {
                if !first_line {
                    self.output.push('\n');
                }
                self.output.push_str(prefix);
                line_open = true;
                first_line = false;
            }
            self.output.push_str(tree.segment(span));
            if self.ends_line(span) {
                line_open = false;
            }
        }
    }

    fn list_item(&mut self, id: NodeId) {
        let tree = self.tree;
        if is_ordered(tree, id) {
            self.output.push_str(notation::ORDERED_ITEM);
        } else {
            for _ in 0..nest_level(tree, id) {
                self.output.push(notation::UNORDERED_ITEM);
            }
            self.output.push(' ');
        }

        let first_block = tree.children(id).find(|child| {
            matches!(tree.kind(*child), NodeKind::Paragraph | NodeKind::TextBlock)
        });
        if let Some(block) = first_block {
            self.push_direct_text(block);
        }
        self.output.push('\n');
    }

    fn table(&mut self, id: NodeId) {
        let tree = self.tree;
        for row in tree.children(id) {
            let header = match tree.kind(row) {
                NodeKind::TableHeaderRow => true,
                NodeKind::TableRow => false,
                _ => continue,
            };
            self.output.push(notation::CELL_SEPARATOR);
            for cell in tree.children(row) {
                if !matches!(tree.kind(cell), NodeKind::TableCell) {
                    continue;
                }
                if header {
                    self.output.push(notation::HEADER_CELL);
                }
                for span in tree.text_children(cell) {
                    self.output.push_str(tree.segment(span).trim());
                }
                self.output.push(notation::CELL_SEPARATOR);
            }
            self.output.push('\n');
        }
        if tree.next_sibling(id).is_some() {
            self.output.push('\n');
        }
    }

    fn text(&mut self, span: Span) {
        self.output.push_str(self.tree.segment(span));
        if self.ends_line(span) {
            self.output.push('\n');
        }
    }

    fn push_direct_text(&mut self, id: NodeId) {
        let tree = self.tree;
        for span in tree.text_children(id) {
            self.output.push_str(tree.segment(span));
        }
    }

    /// Whether the byte right after `span` terminates a source line.
    fn ends_line(&self, span: Span) -> bool {
        self.tree
            .source()
            .as_bytes()
            .get(span.end)
            .is_some_and(|byte| is_line_terminator(*byte))
    }

    fn finish(mut self) -> String {
        if self.output.ends_with('\n') {
            self.output.pop();
        }
        self.output
    }
}

/// Render `tree` into Backlog notation.
#[must_use]
pub fn render(tree: &SyntaxTree<'_>) -> String {
    BacklogRenderer::new(tree).render()
}
