//! Syntax tree construction from pulldown-cmark events.
//!
//! pulldown-cmark produces a flat event stream with byte offsets. This module
//! folds that stream into the arena [`SyntaxTree`] the renderer walks, and
//! normalizes two places where the event shape differs from a block tree:
//!
//! - inline content sitting directly in a tight list item is wrapped in an
//!   implicit [`NodeKind::TextBlock`];
//! - every source line of a paragraph or text block ends with a `Text` leaf,
//!   adding an empty one when the line ends with another inline construct.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::tree::{EmphasisWeight, Node, NodeId, NodeKind, NodeTag, Span, SyntaxTree};
use crate::util::{fence_language, heading_level_to_num, is_line_terminator};

/// Error raised when the event stream cannot be folded into a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// An end event arrived with no open container left to close.
    #[error("unexpected end of {tag:?} at byte {offset}")]
    UnexpectedEnd { tag: NodeTag, offset: usize },
    /// An end event closed a different container than the one open.
    #[error("mismatched end at byte {offset}: open {open:?}, closed {closed:?}")]
    MismatchedEnd {
        open: NodeTag,
        closed: NodeTag,
        offset: usize,
    },
    /// Containers were still open when the stream ended.
    #[error("{count} container(s) left open at end of input")]
    Unclosed { count: usize },
}

/// Parse `source` with the given parser options and build its syntax tree.
///
/// # Errors
///
/// Returns [`ParseError`] if the event stream is unbalanced.
pub fn parse(source: &str, options: Options) -> Result<SyntaxTree<'_>, ParseError> {
    let mut builder = TreeBuilder::new(source);
    for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
        builder.push_event(event, range)?;
    }
    let tree = builder.finish()?;
    tracing::debug!(nodes = tree.len(), bytes = source.len(), "Built syntax tree");
    Ok(tree)
}

/// Incremental tree builder fed one event at a time.
struct TreeBuilder<'src> {
    tree: SyntaxTree<'src>,
    /// Open containers; the root is never popped.
    stack: Vec<NodeId>,
    /// End offset of the most recent inline construct.
    inline_end: usize,
}

impl<'src> TreeBuilder<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            tree: SyntaxTree::new(source),
            stack: vec![NodeId::ROOT],
            inline_end: 0,
        }
    }

    fn push_event(&mut self, event: Event<'_>, range: Range<usize>) -> Result<(), ParseError> {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag, range)?,
            Event::Text(text) => self.text(&text, range),
            Event::Code(_) => self.code_span(range),
            Event::Html(_) => {
                self.append(NodeKind::Html(span_of(&range)));
            }
            Event::InlineHtml(_) => {
                self.open_inline_container();
                self.append(NodeKind::Html(span_of(&range)));
                self.inline_end = range.end;
            }
            Event::SoftBreak | Event::HardBreak => self.line_break(&range),
            Event::Rule => {
                self.close_text_block();
                self.append(NodeKind::ThematicBreak);
            }
            Event::TaskListMarker(checked) => {
                self.open_inline_container();
                self.append(NodeKind::TaskCheckBox { checked });
                self.inline_end = range.end;
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                self.open_inline_container();
                self.append(NodeKind::Other);
                self.inline_end = range.end;
            }
        }
        Ok(())
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let inline = matches!(
            tag,
            Tag::Emphasis
                | Tag::Strong
                | Tag::Strikethrough
                | Tag::Superscript
                | Tag::Subscript
                | Tag::Link { .. }
                | Tag::Image { .. }
        );

        let kind = match tag {
            Tag::Paragraph => NodeKind::Paragraph,
            Tag::Heading { level, .. } => NodeKind::Heading(heading_level_to_num(level)),
            Tag::BlockQuote(_) => NodeKind::Blockquote,
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => NodeKind::FencedCodeBlock {
                language: fence_language(&info),
                lines: Vec::new(),
            },
            Tag::CodeBlock(CodeBlockKind::Indented) => {
                NodeKind::IndentedCodeBlock { lines: Vec::new() }
            }
            Tag::HtmlBlock => NodeKind::HtmlBlock,
            Tag::List(start) => NodeKind::List {
                ordered: start.is_some(),
            },
            Tag::Item => NodeKind::ListItem,
            Tag::Table(_) => NodeKind::Table,
            Tag::TableHead => NodeKind::TableHeaderRow,
            Tag::TableRow => NodeKind::TableRow,
            Tag::TableCell => NodeKind::TableCell,
            Tag::Emphasis => NodeKind::Emphasis(EmphasisWeight::Italic),
            Tag::Strong => NodeKind::Emphasis(EmphasisWeight::Bold),
            Tag::Strikethrough => NodeKind::Strikethrough,
            Tag::Link { dest_url, .. } => NodeKind::Link {
                destination: dest_url.into_string(),
            },
            Tag::Image { dest_url, .. } => NodeKind::Image {
                destination: dest_url.into_string(),
            },
            Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_)
            | Tag::Superscript
            | Tag::Subscript => NodeKind::Other,
        };

        if inline {
            self.open_inline_container();
        } else {
            self.close_text_block();
        }
        let id = self.append(kind);
        self.stack.push(id);
    }

    fn end_tag(&mut self, tag: TagEnd, range: Range<usize>) -> Result<(), ParseError> {
        let inline = matches!(
            tag,
            TagEnd::Emphasis
                | TagEnd::Strong
                | TagEnd::Strikethrough
                | TagEnd::Superscript
                | TagEnd::Subscript
                | TagEnd::Link
                | TagEnd::Image
        );
        let closed = end_tag_kind(tag);

        if !inline {
            self.close_text_block();
        }
        if closed == NodeTag::Paragraph {
            self.terminate_line();
        }
        self.pop(closed, range.start)?;
        if inline {
            self.inline_end = range.end;
        }
        Ok(())
    }

    fn text(&mut self, text: &str, range: Range<usize>) {
        let top = self.top();
        if let NodeKind::FencedCodeBlock { lines, .. } | NodeKind::IndentedCodeBlock { lines } =
            self.tree.kind_mut(top)
        {
            lines.push(text.to_owned());
            return;
        }
        self.open_inline_container();
        let span = self.with_escape(span_of(&range));
        self.append(NodeKind::Text(span));
        self.inline_end = range.end;
    }

    /// Widen `span` over the backslash of an escape, which pulldown-cmark
    /// leaves out of the reported range.
    fn with_escape(&self, span: Span) -> Span {
        let Some(backslash) = span.start.checked_sub(1) else {
            return span;
        };
        if self.tree.source().as_bytes()[backslash] != b'\\' {
            return span;
        }
        let covered = self.tree.last_child(self.top()).is_some_and(|last| {
            matches!(self.tree.kind(last), NodeKind::Text(previous) if previous.end > backslash)
        });
        if covered {
            span
        } else {
            Span::new(backslash, span.end)
        }
    }

    fn code_span(&mut self, range: Range<usize>) {
        self.open_inline_container();
        let content = code_content_span(self.tree.source(), &range);
        let code = self.append(NodeKind::CodeSpan);
        let text = self.tree.alloc_node(Node::new(NodeKind::Text(content)));
        self.tree.append_child(code, text);
        self.inline_end = range.end;
    }

    /// End the current line at a soft or hard break.
    ///
    /// The break range covers trailing spaces or a backslash, so the empty
    /// `Text` lands on the line terminator itself.
    fn line_break(&mut self, range: &Range<usize>) {
        if !matches!(
            self.tree.kind(self.top()),
            NodeKind::Paragraph | NodeKind::TextBlock
        ) || self.last_text_ends_line()
        {
            return;
        }
        let source = self.tree.source().as_bytes();
        let terminator = (range.start..range.end)
            .find(|&offset| is_line_terminator(source[offset]))
            .or_else(|| self.line_end_after(range.start));
        match terminator {
            Some(offset) => {
                self.append(NodeKind::Text(Span::empty_at(offset)));
            }
            None => self.terminate_line(),
        }
    }

    /// Make sure the current line of the open block ends with a `Text` leaf
    /// directly followed by the line terminator, if the line has one.
    fn terminate_line(&mut self) {
        let block = self.top();
        let Some(last) = self.tree.last_child(block) else {
            return;
        };
        let offset = match self.tree.kind(last) {
            NodeKind::Text(span) => {
                if self.ends_line(span.end) {
                    return;
                }
                match self.line_end_after(span.end) {
                    Some(offset) => offset,
                    None => return,
                }
            }
            _ => self
                .line_end_after(self.inline_end)
                .unwrap_or(self.inline_end),
        };
        self.append(NodeKind::Text(Span::empty_at(offset)));
    }

    fn last_text_ends_line(&self) -> bool {
        let Some(last) = self.tree.last_child(self.top()) else {
            return false;
        };
        matches!(self.tree.kind(last), NodeKind::Text(span) if self.ends_line(span.end))
    }

    fn ends_line(&self, offset: usize) -> bool {
        self.tree
            .source()
            .as_bytes()
            .get(offset)
            .is_some_and(|byte| is_line_terminator(*byte))
    }

    /// Offset of the line terminator reached from `offset` over spaces and
    /// tabs.
    fn line_end_after(&self, offset: usize) -> Option<usize> {
        let trailing = self
            .tree
            .source()
            .as_bytes()
            .get(offset..)?
            .iter()
            .take_while(|byte| matches!(byte, b' ' | b'\t'))
            .count();
        let end = offset + trailing;
        self.ends_line(end).then_some(end)
    }

    /// Open an implicit text block when inline content lands in a list item.
    fn open_inline_container(&mut self) {
        if matches!(self.tree.kind(self.top()), NodeKind::ListItem) {
            let id = self.append(NodeKind::TextBlock);
            self.stack.push(id);
        }
    }

    fn close_text_block(&mut self) {
        if matches!(self.tree.kind(self.top()), NodeKind::TextBlock) {
            self.terminate_line();
            self.stack.pop();
        }
    }

    fn append(&mut self, kind: NodeKind) -> NodeId {
        let parent = self.top();
        let id = self.tree.alloc_node(Node::new(kind));
        self.tree.append_child(parent, id);
        id
    }

    fn pop(&mut self, closed: NodeTag, offset: usize) -> Result<(), ParseError> {
        if self.stack.len() <= 1 {
            return Err(ParseError::UnexpectedEnd {
                tag: closed,
                offset,
            });
        }
        let open = self.tree.kind(self.top()).tag();
        if !closes(open, closed) {
            return Err(ParseError::MismatchedEnd {
                open,
                closed,
                offset,
            });
        }
        self.stack.pop();
        Ok(())
    }

    fn top(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn finish(mut self) -> Result<SyntaxTree<'src>, ParseError> {
        self.close_text_block();
        if self.stack.len() > 1 {
            return Err(ParseError::Unclosed {
                count: self.stack.len() - 1,
            });
        }
        Ok(self.tree)
    }
}

/// Whether an end event for `closed` closes the open container `open`.
fn closes(open: NodeTag, closed: NodeTag) -> bool {
    open == closed || (open == NodeTag::IndentedCodeBlock && closed == NodeTag::FencedCodeBlock)
}

fn span_of(range: &Range<usize>) -> Span {
    Span::new(range.start, range.end)
}

/// Node tag an end event is expected to close.
fn end_tag_kind(tag: TagEnd) -> NodeTag {
    match tag {
        TagEnd::Paragraph => NodeTag::Paragraph,
        TagEnd::Heading(_) => NodeTag::Heading,
        TagEnd::BlockQuote(_) => NodeTag::Blockquote,
        TagEnd::CodeBlock => NodeTag::FencedCodeBlock,
        TagEnd::HtmlBlock => NodeTag::HtmlBlock,
        TagEnd::List(_) => NodeTag::List,
        TagEnd::Item => NodeTag::ListItem,
        TagEnd::Table => NodeTag::Table,
        TagEnd::TableHead => NodeTag::TableHeaderRow,
        TagEnd::TableRow => NodeTag::TableRow,
        TagEnd::TableCell => NodeTag::TableCell,
        TagEnd::Emphasis | TagEnd::Strong => NodeTag::Emphasis,
        TagEnd::Strikethrough => NodeTag::Strikethrough,
        TagEnd::Link => NodeTag::Link,
        TagEnd::Image => NodeTag::Image,
        TagEnd::FootnoteDefinition
        | TagEnd::DefinitionList
        | TagEnd::DefinitionListTitle
        | TagEnd::DefinitionListDefinition
        | TagEnd::MetadataBlock(_)
        | TagEnd::Superscript
        | TagEnd::Subscript => NodeTag::Other,
    }
}

/// Span of an inline code's content, without the backtick runs.
///
/// One leading and one trailing space are stripped when both are present and
/// the content is not made of spaces only.
fn code_content_span(source: &str, range: &Range<usize>) -> Span {
    let raw = &source[range.clone()];
    let leading = raw.len() - raw.trim_start_matches('`').len();
    let trailing = raw.len() - raw.trim_end_matches('`').len();
    let mut start = range.start + leading;
    let mut end = range.end.saturating_sub(trailing);
    if end <= start {
        return Span::empty_at(start);
    }

    let inner = &source[start..end];
    if inner.len() >= 2
        && inner.starts_with(' ')
        && inner.ends_with(' ')
        && !inner.trim_matches(' ').is_empty()
    {
        start += 1;
        end -= 1;
    }
    Span::new(start, end)
}
