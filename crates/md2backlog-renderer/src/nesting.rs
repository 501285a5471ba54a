//! List nesting depth and ordered/unordered classification.

use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// Depth of a list item within alternating `List`/`ListItem` containers,
/// counted from 1.
///
/// The walk climbs from the item's list to the item that holds it, and stops
/// at the first ancestor outside that chain. A list nested inside a
/// blockquote that sits in a list item therefore starts over at 1.
#[must_use]
pub fn nest_level(tree: &SyntaxTree<'_>, item: NodeId) -> usize {
    let mut level = 1;
    let mut list = tree.parent(item);
    while let Some(current) = list {
        if !matches!(tree.kind(current), NodeKind::List { .. }) {
            break;
        }
        match tree.parent(current) {
            Some(holder) if matches!(tree.kind(holder), NodeKind::ListItem) => {
                level += 1;
                list = tree.parent(holder);
            }
            _ => break,
        }
    }
    level
}

/// Whether the nearest enclosing list is ordered.
#[must_use]
pub fn is_ordered(tree: &SyntaxTree<'_>, item: NodeId) -> bool {
    tree.ancestors(item)
        .find_map(|ancestor| match tree.kind(ancestor) {
            NodeKind::List { ordered } => Some(*ordered),
            _ => None,
        })
        .unwrap_or(false)
}
