//! Chunks: runs of text that share one attribute set
//!
//! A chunk is the smallest unit a renderer sees. Blocks and table cells are
//! both sequences of chunks, and every styling decision a renderer makes is
//! driven by the chunk's attribute map.

use serde::Serialize;
use std::collections::BTreeMap;

/// Attribute name to value map carried by each chunk.
///
/// Keys are unique and their order carries no meaning; a sorted map keeps
/// serialized output stable.
pub type AttributeMap = BTreeMap<String, String>;

/// Styled run of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub contents: String,
    pub attributes: AttributeMap,
    /// Set when the chunk was produced by a `value` placeholder element
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_placeholder: bool,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unstyled chunk holding `contents`
    pub fn text(contents: impl Into<String>) -> Self {
        Chunk {
            contents: contents.into(),
            ..Self::default()
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Merge element attributes over the current ones; later entries win.
    pub fn extend_attributes<'a, I>(&mut self, attributes: I)
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        for (key, value) in attributes {
            self.attributes.insert(key.clone(), value.clone());
        }
    }

    /// Parse the comma separated `font-style` attribute.
    ///
    /// Unknown style names are ignored.
    pub fn font_styles(&self) -> FontStyles {
        FontStyles::parse(self.attr("font-style").unwrap_or_default())
    }

    /// Integer `font-size`, if present and well-formed
    pub fn font_size(&self) -> Option<u32> {
        self.attr("font-size")?.trim().parse().ok()
    }
}

/// Font styles a chunk may request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontStyles {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl FontStyles {
    pub fn parse(list: &str) -> Self {
        let mut styles = FontStyles::default();
        for style in list.split(',') {
            match style.trim().to_ascii_lowercase().as_str() {
                "bold" => styles.bold = true,
                "italic" => styles.italic = true,
                "underline" => styles.underline = true,
                _ => {}
            }
        }
        styles
    }

    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline)
    }
}
