//! Shared helpers for tree building and rendering.

use pulldown_cmark::HeadingLevel;

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Language tag of a fenced code block: the first word of its info string.
///
/// Returns `None` for an empty or whitespace-only info string.
#[must_use]
pub(crate) fn fence_language(info: &str) -> Option<String> {
    info.split_whitespace().next().map(str::to_owned)
}

/// Whether `byte` terminates a source line.
#[must_use]
pub(crate) fn is_line_terminator(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r')
}
