//! Backlog notation markers.

pub(crate) const HEADING: char = '*';
pub(crate) const BOLD: &str = "''";
pub(crate) const ITALIC: &str = "'''";
pub(crate) const STRIKETHROUGH: &str = "%%";

pub(crate) const LINK_OPEN: &str = "[[";
pub(crate) const LINK_SEPARATOR: char = ':';
pub(crate) const LINK_CLOSE: &str = "]]";

pub(crate) const CODE_OPEN: &str = "{code}";
pub(crate) const CODE_CLOSE: &str = "{/code}";
/// Code block opener, completed by an optional `:lang` and `}`.
pub(crate) const CODE_BLOCK_OPEN: &str = ">{code";
pub(crate) const CODE_BLOCK_CLOSE: &str = "{/code}<";

/// Repeated once per blockquote depth.
pub(crate) const QUOTE: &str = "> ";

pub(crate) const ORDERED_ITEM: &str = "+ ";
/// Repeated once per nesting level.
pub(crate) const UNORDERED_ITEM: char = '-';

pub(crate) const CELL_SEPARATOR: char = '|';
pub(crate) const HEADER_CELL: char = '*';
