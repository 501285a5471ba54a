//! Ancestry queries over parent links.
//!
//! Structural renderers (headings, emphasis, links, tables, ...) emit the
//! text of their own subtree. A plain `Text` leaf below one of them has
//! already been written and must be skipped by the generic text rule.

use crate::tree::{NodeId, NodeTag, SyntaxTree};

/// Node kinds whose renderer consumes descendant text.
const CLAIMING_TAGS: [NodeTag; 13] = [
    NodeTag::Heading,
    NodeTag::Emphasis,
    NodeTag::Strikethrough,
    NodeTag::ListItem,
    NodeTag::Link,
    NodeTag::CodeSpan,
    NodeTag::FencedCodeBlock,
    NodeTag::IndentedCodeBlock,
    NodeTag::Blockquote,
    NodeTag::Table,
    NodeTag::TableHeaderRow,
    NodeTag::TableRow,
    NodeTag::TableCell,
];

/// Whether any proper ancestor of `id` is of kind `tag`.
#[must_use]
pub fn is_descendant_of(tree: &SyntaxTree<'_>, id: NodeId, tag: NodeTag) -> bool {
    tree.ancestors(id)
        .any(|ancestor| tree.kind(ancestor).tag() == tag)
}

/// Whether a text leaf was already emitted by an enclosing renderer.
#[must_use]
pub fn is_claimed(tree: &SyntaxTree<'_>, id: NodeId) -> bool {
    tree.ancestors(id)
        .any(|ancestor| CLAIMING_TAGS.contains(&tree.kind(ancestor).tag()))
}
