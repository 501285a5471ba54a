//! Markdown to Backlog notation converter.
//!
//! Markdown is parsed with `pulldown-cmark` into an arena [`SyntaxTree`] whose
//! leaves point back into the source buffer. The [`BacklogRenderer`] walks
//! that tree once and emits Backlog notation:
//!
//! | Markdown | Backlog |
//! |---|---|
//! | `# Title` | `* Title` |
//! | `**bold**` / `*italic*` | `''bold''` / `'''italic'''` |
//! | `~~struck~~` | `%%struck%%` |
//! | `[text](url)` | `[[text:url]]` |
//! | `` `code` `` | `{code}code{/code}` |
//! | fenced code | `>{code:lang}` ... `{/code}<` |
//! | `- item` / `1. item` | `- item` / `+ item` |
//!
//! # Example
//!
//! ```
//! use md2backlog_renderer::Converter;
//!
//! let converter = Converter::new().gfm(true);
//! let notation = converter.convert("- a\n  - b").unwrap();
//! assert_eq!(notation, "- a\n-- b");
//! ```

mod ancestry;
mod converter;
mod error;
mod nesting;
mod notation;
mod parse;
mod renderer;
mod tree;
mod util;

pub use ancestry::{is_claimed, is_descendant_of};
pub use converter::{Converter, convert};
pub use error::ConvertError;
pub use nesting::{is_ordered, nest_level};
pub use parse::{ParseError, parse};
pub use renderer::{BacklogRenderer, WalkStatus, render};
pub use tree::{
    Ancestors, Children, Descendants, EmphasisWeight, Node, NodeId, NodeKind, NodeTag, Span,
    SyntaxTree,
};
