//! Arena-held syntax tree consumed by the renderer.
//!
//! Nodes live in a single `Vec` and refer to each other through [`NodeId`]
//! indices. Ownership flows downward only: the arena owns every node, while
//! `parent`, `first_child`, `last_child` and `next_sibling` are plain
//! non-owning links used for navigation.

/// Index of a node inside a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The document root, always the first node allocated.
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Half-open byte range into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty span positioned at `offset`.
    #[must_use]
    pub fn empty_at(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Resolve the span to the exact substring of `source` it denotes.
    ///
    /// # Examples
    ///
    /// ```
    /// use md2backlog_renderer::Span;
    ///
    /// assert_eq!(Span::new(2, 7).resolve("# Title"), "Title");
    /// ```
    #[must_use]
    pub fn resolve<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }
}

/// Weight of an emphasis node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisWeight {
    Italic,
    Bold,
}

/// Kind of a syntax tree node, carrying per-kind payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    /// Heading with level 1-6.
    Heading(u8),
    Emphasis(EmphasisWeight),
    Strikethrough,
    Paragraph,
    List {
        ordered: bool,
    },
    ListItem,
    Link {
        destination: String,
    },
    CodeSpan,
    FencedCodeBlock {
        language: Option<String>,
        /// Verbatim content lines, each keeping its own line terminator.
        lines: Vec<String>,
    },
    IndentedCodeBlock {
        lines: Vec<String>,
    },
    Blockquote,
    Table,
    TableHeaderRow,
    TableRow,
    TableCell,
    /// Inline content placed directly inside a tight list item.
    TextBlock,
    Text(Span),
    Image {
        destination: String,
    },
    TaskCheckBox {
        checked: bool,
    },
    HtmlBlock,
    /// Raw HTML, either a block line or inline markup.
    Html(Span),
    ThematicBreak,
    /// Construct without a dedicated kind (footnotes, math, metadata).
    Other,
}

/// Payload-free discriminant of [`NodeKind`], used for ancestry queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Document,
    Heading,
    Emphasis,
    Strikethrough,
    Paragraph,
    List,
    ListItem,
    Link,
    CodeSpan,
    FencedCodeBlock,
    IndentedCodeBlock,
    Blockquote,
    Table,
    TableHeaderRow,
    TableRow,
    TableCell,
    TextBlock,
    Text,
    Image,
    TaskCheckBox,
    HtmlBlock,
    Html,
    ThematicBreak,
    Other,
}

impl NodeKind {
    #[must_use]
    pub fn tag(&self) -> NodeTag {
        match self {
            NodeKind::Document => NodeTag::Document,
            NodeKind::Heading(_) => NodeTag::Heading,
            NodeKind::Emphasis(_) => NodeTag::Emphasis,
            NodeKind::Strikethrough => NodeTag::Strikethrough,
            NodeKind::Paragraph => NodeTag::Paragraph,
            NodeKind::List { .. } => NodeTag::List,
            NodeKind::ListItem => NodeTag::ListItem,
            NodeKind::Link { .. } => NodeTag::Link,
            NodeKind::CodeSpan => NodeTag::CodeSpan,
            NodeKind::FencedCodeBlock { .. } => NodeTag::FencedCodeBlock,
            NodeKind::IndentedCodeBlock { .. } => NodeTag::IndentedCodeBlock,
            NodeKind::Blockquote => NodeTag::Blockquote,
            NodeKind::Table => NodeTag::Table,
            NodeKind::TableHeaderRow => NodeTag::TableHeaderRow,
            NodeKind::TableRow => NodeTag::TableRow,
            NodeKind::TableCell => NodeTag::TableCell,
            NodeKind::TextBlock => NodeTag::TextBlock,
            NodeKind::Text(_) => NodeTag::Text,
            NodeKind::Image { .. } => NodeTag::Image,
            NodeKind::TaskCheckBox { .. } => NodeTag::TaskCheckBox,
            NodeKind::HtmlBlock => NodeTag::HtmlBlock,
            NodeKind::Html(_) => NodeTag::Html,
            NodeKind::ThematicBreak => NodeTag::ThematicBreak,
            NodeKind::Other => NodeTag::Other,
        }
    }
}

/// A node together with its navigation links.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }
}

/// Immutable syntax tree over a borrowed source buffer.
///
/// Built once by [`parse`](crate::parse) and then only read. Node ids handed
/// out by a tree are valid for that tree alone; indexing with a foreign id is
/// a caller defect and panics.
#[derive(Debug, Clone)]
pub struct SyntaxTree<'src> {
    source: &'src str,
    nodes: Vec<Node>,
}

impl<'src> SyntaxTree<'src> {
    /// Create a tree holding only the document root.
    pub(crate) fn new(source: &'src str) -> Self {
        let mut nodes = Vec::with_capacity(64);
        nodes.push(Node::new(NodeKind::Document));
        Self { source, nodes }
    }

    /// Allocate a detached node and return its id.
    pub(crate) fn alloc_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`.
    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let previous_last = self.nodes[parent.0].last_child;
        if let Some(last) = previous_last {
            self.nodes[last.0].next_sibling = Some(child);
        } else {
            self.nodes[parent.0].first_child = Some(child);
        }
        self.nodes[parent.0].last_child = Some(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Mutable access to a node's kind, used while filling code block lines.
    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    /// The shared source buffer every span points into.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the tree, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next_sibling
    }

    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].first_child
    }

    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].last_child
    }

    /// Iterate over the direct children of `id` in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_, 'src> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Iterate over the proper ancestors of `id`, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, 'src> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Iterate over `id` and all of its descendants in pre-order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_, 'src> {
        Descendants {
            tree: self,
            pending: vec![id],
        }
    }

    /// Source text denoted by `span`.
    #[must_use]
    pub fn segment(&self, span: Span) -> &'src str {
        span.resolve(self.source)
    }

    /// Spans of the direct `Text` children of `id`, in order.
    pub fn text_children(&self, id: NodeId) -> impl Iterator<Item = Span> + '_ {
        self.children(id).filter_map(|child| match self.kind(child) {
            NodeKind::Text(span) => Some(*span),
            _ => None,
        })
    }

    /// Concatenation of the direct `Text` children of `id`.
    #[must_use]
    pub fn direct_text(&self, id: NodeId) -> String {
        self.text_children(id)
            .map(|span| self.segment(span))
            .collect()
    }
}

/// Iterator over a node's children.
pub struct Children<'t, 'src> {
    tree: &'t SyntaxTree<'src>,
    next: Option<NodeId>,
}

impl Iterator for Children<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Iterator walking parent links up to the root.
pub struct Ancestors<'t, 'src> {
    tree: &'t SyntaxTree<'src>,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'t, 'src> {
    tree: &'t SyntaxTree<'src>,
    pending: Vec<NodeId>,
}

impl Iterator for Descendants<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.pending.pop()?;
        let first_pending = self.pending.len();
        self.pending.extend(self.tree.children(current));
        self.pending[first_pending..].reverse();
        Some(current)
    }
}
