//! HTML backend
//!
//! Renders a compiled template as a single HTML page. Block kinds map to
//! heading and paragraph elements, each tagged with a class named after the
//! template element so stylesheets can target them:
//!
//! | Template element | HTML                               |
//! |------------------|------------------------------------|
//! | `title`          | `<h1 class="title">`               |
//! | `chapter`        | `<h2 class="chapter">`             |
//! | `section`        | `<h3 class="section">`             |
//! | `para`           | `<p class="para">`                 |
//! | `table`          | `<table border="2">` with `<td>`s  |
//! | `hrule`          | `<hr>`                             |
//! | `pagebreak`      | `<hr class="pagebreak">`           |
//! | `img`            | `<img src>`                        |
//!
//! The first chunk of a block styles the block itself (`align`, `indent`,
//! font attributes); later chunks become `<span>`s. HTML has no pages, so
//! page size and margins are accepted and ignored.
//!
//! # Placeholders
//!
//! Chunks produced by `value` elements render according to
//! [`PlaceholderMode`]: as plain text, as an editable `<input>`, or as a
//! read-only input followed by a required/optional `<select>` for building
//! data entry forms.
//!
//! # Options
//!
//! `declare`, `encoding`, `title`, `css` and `js` (comma separated), `extra`
//! (raw markup appended before `</body>`), `placeholders`
//! (`text`/`input`/`combo`) and the shared `root`.

mod renderer;

pub use renderer::HtmlRenderer;

use crate::backend::{check_option_keys, compile_options, Backend, Rendered};
use crate::compiler::compile_with_options;
use crate::data::DataStore;
use crate::error::{CompileError, RenderError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const OPTION_KEYS: &[&str] = &[
    "declare",
    "encoding",
    "title",
    "css",
    "js",
    "extra",
    "placeholders",
];

/// How placeholder chunks are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderMode {
    /// The resolved value, styled like any other chunk
    #[default]
    Text,
    /// An editable text field pre-filled with the value
    Input,
    /// A read-only field plus a required/optional selector
    Combo,
}

impl FromStr for PlaceholderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(PlaceholderMode::Text),
            "input" => Ok(PlaceholderMode::Input),
            "combo" => Ok(PlaceholderMode::Combo),
            other => Err(format!(
                "Unknown placeholder mode '{other}'. Expected one of: text, input, combo"
            )),
        }
    }
}

impl fmt::Display for PlaceholderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaceholderMode::Text => "text",
            PlaceholderMode::Input => "input",
            PlaceholderMode::Combo => "combo",
        })
    }
}

/// Options for HTML output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Document type declaration written before `<html>`
    pub declare: String,
    /// Value of the charset meta tag
    pub encoding: String,
    /// Page title; the data store title is used when unset
    pub title: Option<String>,
    pub css: Vec<String>,
    pub js: Vec<String>,
    /// Raw markup inserted before `</body>`
    pub extra: Option<String>,
    pub placeholders: PlaceholderMode,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        HtmlOptions {
            declare: "<!DOCTYPE html>".to_string(),
            encoding: "UTF-8".to_string(),
            title: None,
            css: Vec::new(),
            js: Vec::new(),
            extra: None,
            placeholders: PlaceholderMode::default(),
        }
    }
}

impl HtmlOptions {
    /// Apply backend option overrides on top of these options
    pub fn merged_with(&self, options: &HashMap<String, String>) -> Result<Self, CompileError> {
        let mut merged = self.clone();
        if let Some(declare) = options.get("declare") {
            merged.declare = declare.clone();
        }
        if let Some(encoding) = options.get("encoding") {
            merged.encoding = encoding.clone();
        }
        if let Some(title) = options.get("title") {
            merged.title = Some(title.clone());
        }
        if let Some(css) = options.get("css") {
            merged.css = split_list(css);
        }
        if let Some(js) = options.get("js") {
            merged.js = split_list(js);
        }
        if let Some(extra) = options.get("extra") {
            merged.extra = (!extra.is_empty()).then(|| extra.clone());
        }
        if let Some(mode) = options.get("placeholders") {
            merged.placeholders = mode.parse().map_err(CompileError::InvalidOption)?;
        }
        Ok(merged)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Backend producing a single HTML page
#[derive(Debug, Clone, Default)]
pub struct HtmlBackend {
    options: HtmlOptions,
}

impl HtmlBackend {
    pub fn new(options: HtmlOptions) -> Self {
        HtmlBackend { options }
    }
}

impl Backend for HtmlBackend {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML page, optionally with form fields for placeholders"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn render_with_options(
        &self,
        template: &str,
        data: &DataStore,
        options: &HashMap<String, String>,
    ) -> Result<Rendered, CompileError> {
        check_option_keys(self.name(), options, OPTION_KEYS)?;
        let mut html_options = self.options.merged_with(options)?;
        if html_options.title.is_none() {
            html_options.title = data.title().map(String::from);
        }

        let mut renderer = HtmlRenderer::new(Vec::new(), html_options);
        let diagnostics =
            compile_with_options(template, data, &mut renderer, compile_options(options))?;
        let output = String::from_utf8(renderer.into_inner()).map_err(|e| {
            RenderError::Backend(format!("HTML output is not valid UTF-8: {e}"))
        })?;

        Ok(Rendered {
            output,
            diagnostics,
        })
    }
}
