//! Markdown formatting for comment bodies.

use std::fmt;

use markdown::Options;

use crate::error::RenderError;

/// Stateless GitHub-flavoured markdown renderer. Raw HTML in comment bodies
/// is escaped rather than passed through.
pub struct MarkdownRenderer {
    options: Options,
}

impl fmt::Debug for MarkdownRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkdownRenderer").finish_non_exhaustive()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self { options: Options::gfm() }
    }

    pub fn render(&self, source: &str) -> Result<String, RenderError> {
        markdown::to_html_with_options(source, &self.options).map_err(|err| RenderError::Markdown(err.to_string()))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
