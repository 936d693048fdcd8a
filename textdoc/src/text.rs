//! Template text handling
//!
//! Character data in a template is mostly indentation and line breaks put
//! there by whoever wrote the template. Any run of whitespace that contains a
//! newline is dropped entirely and the result is trimmed, so
//!
//! ```text
//! <para>
//!     Hello
//! </para>
//! ```
//!
//! produces exactly `Hello`. Spaces inside a single line survive. Only ASCII
//! whitespace and control characters count here: full-width and
//! non-breaking spaces are content.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\s)*\n+(?-u:\s)*").unwrap());

/// Remove template formatting whitespace from a piece of character data
pub fn collapse_template_whitespace(text: &str) -> String {
    LINE_BREAK_RUN
        .replace_all(text, "")
        .trim_matches(|c: char| c <= ' ')
        .to_string()
}

/// Text accumulated since the last chunk flush
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingText {
    buffer: String,
}

impl PendingText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append character data from the template, collapsing its whitespace
    pub fn push_template_text(&mut self, text: &str) {
        self.buffer.push_str(&collapse_template_whitespace(text));
    }

    /// Append text verbatim (placeholder values, spacers, line breaks)
    pub fn push_literal(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Take the accumulated text, leaving the buffer empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
