//! Shared configuration loader for the textdoc toolchain.
//!
//! `defaults/textdoc.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`TextdocConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;
use textdoc::backends::{HtmlOptions, PlaceholderMode};
use textdoc::CompileOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/textdoc.default.toml");

/// Top-level configuration consumed by textdoc applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TextdocConfig {
    pub compile: CompileConfig,
    pub html: HtmlConfig,
    pub blocks: BlocksConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompileConfig {
    pub root_element: String,
}

impl From<&CompileConfig> for CompileOptions {
    fn from(config: &CompileConfig) -> Self {
        CompileOptions::with_root(config.root_element.clone())
    }
}

/// Knobs of the HTML backend.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub declare: String,
    pub encoding: String,
    #[serde(default)]
    pub css: Vec<String>,
    #[serde(default)]
    pub js: Vec<String>,
    #[serde(default)]
    pub extra: String,
    pub placeholders: PlaceholderMode,
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        HtmlOptions {
            declare: config.declare.clone(),
            encoding: config.encoding.clone(),
            title: None,
            css: config.css.clone(),
            js: config.js.clone(),
            extra: (!config.extra.is_empty()).then(|| config.extra.clone()),
            placeholders: config.placeholders,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlocksConfig {
    pub pretty: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TextdocConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TextdocConfig, ConfigError> {
    Loader::new().build()
}
