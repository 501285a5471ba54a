//! Markdown to Backlog notation converter.

use pulldown_cmark::Options;

use crate::error::ConvertError;
use crate::parse::parse;
use crate::renderer::render;

/// Markdown to Backlog notation converter configuration.
#[derive(Clone, Debug)]
pub struct Converter {
    gfm: bool,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// Create a new converter with GFM enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// When disabled, tables, strikethrough and task lists are parsed as
    /// plain text.
    #[must_use]
    pub fn gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }

    /// Convert Markdown to Backlog notation.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Parse`] if the parser's event stream cannot be
    /// assembled into a syntax tree.
    pub fn convert(&self, markdown: &str) -> Result<String, ConvertError> {
        if markdown.is_empty() {
            return Ok(String::new());
        }
        tracing::debug!(gfm = self.gfm, bytes = markdown.len(), "Converting markdown");
        let tree = parse(markdown, self.parser_options())?;
        Ok(render(&tree))
    }
}

/// Convert Markdown to Backlog notation with default settings.
///
/// # Errors
///
/// See [`Converter::convert`].
///
/// # Examples
///
/// ```
/// let notation = md2backlog_renderer::convert("# Title\n\n**Bold** text").unwrap();
/// assert_eq!(notation, "* Title\n''Bold'' text");
/// ```
pub fn convert(markdown: &str) -> Result<String, ConvertError> {
    Converter::new().convert(markdown)
}
