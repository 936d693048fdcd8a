//! Backend registry for backend discovery and selection
//!
//! This module provides a centralized registry for all available backends.
//! Backends can be registered and retrieved by name.

use crate::backend::{Backend, Rendered};
use crate::data::DataStore;
use crate::error::CompileError;
use std::collections::HashMap;

/// Registry of output backends
///
/// # Examples
///
/// ```ignore
/// let registry = BackendRegistry::default();
/// let rendered = registry.render(template, &data, "html", &HashMap::new())?;
/// ```
pub struct BackendRegistry {
    backends: HashMap<String, Box<dyn Backend>>,
}

impl BackendRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        BackendRegistry {
            backends: HashMap::new(),
        }
    }

    /// Register a backend
    ///
    /// If a backend with the same name already exists, it will be replaced.
    pub fn register<B: Backend + 'static>(&mut self, backend: B) {
        self.backends
            .insert(backend.name().to_string(), Box::new(backend));
    }

    /// Get a backend by name
    pub fn get(&self, name: &str) -> Result<&dyn Backend, CompileError> {
        self.backends
            .get(name)
            .map(|b| b.as_ref())
            .ok_or_else(|| CompileError::BackendNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// List all available backend names (sorted)
    pub fn list_backends(&self) -> Vec<String> {
        let mut names: Vec<_> = self.backends.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect a backend from an output filename's extension
    pub fn detect_backend_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        self.backends
            .values()
            .find(|backend| backend.file_extensions().contains(&extension))
            .map(|backend| backend.name().to_string())
    }

    /// Render a template with the named backend
    pub fn render(
        &self,
        template: &str,
        data: &DataStore,
        backend: &str,
        options: &HashMap<String, String>,
    ) -> Result<Rendered, CompileError> {
        tracing::debug!(backend, "Rendering template");
        self.get(backend)?
            .render_with_options(template, data, options)
    }

    /// Create a registry with the built-in backends
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::backends::html::HtmlBackend::default());
        registry.register(crate::backends::blocks::BlocksBackend::default());

        registry
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
