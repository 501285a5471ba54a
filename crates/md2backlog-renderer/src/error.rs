//! Error types for Markdown conversion.

use crate::parse::ParseError;

/// Error returned by [`Converter::convert`](crate::Converter::convert).
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The parser produced an event stream that does not form a tree.
    #[error("failed to build syntax tree: {0}")]
    Parse(#[from] ParseError),
}
