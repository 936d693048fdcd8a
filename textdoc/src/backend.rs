//! Backend trait definition
//!
//! A backend bundles a [`crate::renderer::DocumentRenderer`] with everything
//! needed to produce a finished output document from a template and a data
//! store. Backends are what the registry and the CLI deal in; renderers are
//! what the compiler drives.

use crate::compiler::CompileOptions;
use crate::data::DataStore;
use crate::diagnostics::Diagnostics;
use crate::error::CompileError;
use std::collections::HashMap;

/// Option key shared by every backend: name of the root element
pub const ROOT_OPTION: &str = "root";

/// Output of a successful render
#[derive(Debug)]
pub struct Rendered {
    pub output: String,
    pub diagnostics: Diagnostics,
}

/// Trait for output backends
///
/// # Examples
///
/// ```ignore
/// struct Plain;
///
/// impl Backend for Plain {
///     fn name(&self) -> &str {
///         "plain"
///     }
///
///     fn render_with_options(
///         &self,
///         template: &str,
///         data: &DataStore,
///         options: &HashMap<String, String>,
///     ) -> Result<Rendered, CompileError> {
///         todo!()
///     }
/// }
/// ```
pub trait Backend: Send + Sync {
    /// The name of this backend (e.g., "html", "blocks")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// File extensions produced by this backend, without the leading dot.
    ///
    /// Used to pick a backend from an output filename.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn render(&self, template: &str, data: &DataStore) -> Result<Rendered, CompileError> {
        self.render_with_options(template, data, &HashMap::new())
    }

    /// Render using extra parameters (see each backend for the keys it accepts)
    fn render_with_options(
        &self,
        template: &str,
        data: &DataStore,
        options: &HashMap<String, String>,
    ) -> Result<Rendered, CompileError>;
}

/// Reject option keys a backend does not understand
pub fn check_option_keys(
    backend: &str,
    options: &HashMap<String, String>,
    accepted: &[&str],
) -> Result<(), CompileError> {
    let mut unknown: Vec<&str> = options
        .keys()
        .map(String::as_str)
        .filter(|key| *key != ROOT_OPTION && !accepted.contains(key))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort();
    Err(CompileError::InvalidOption(format!(
        "Backend '{backend}' does not accept {}",
        unknown.join(", ")
    )))
}

/// Compile options derived from the shared `root` option
pub fn compile_options(options: &HashMap<String, String>) -> CompileOptions {
    match options.get(ROOT_OPTION) {
        Some(root) if !root.trim().is_empty() => CompileOptions::with_root(root.trim()),
        _ => CompileOptions::default(),
    }
}

/// Parse a boolean option; a bare flag (empty value) means `true`
pub fn bool_option(
    options: &HashMap<String, String>,
    key: &str,
) -> Result<Option<bool>, CompileError> {
    let Some(raw) = options.get(key) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "yes" | "1" => Ok(Some(true)),
        "false" | "no" | "0" => Ok(Some(false)),
        other => Err(CompileError::InvalidOption(format!(
            "Option '{key}' expects a boolean, got '{other}'"
        ))),
    }
}
