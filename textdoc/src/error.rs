//! Error types for compilation, data loading and rendering
//!
//! Fatal conditions abort a compilation and surface as [`CompileError`].
//! Recoverable conditions never reach this module: they are collected as
//! [`crate::diagnostics::Diagnostic`]s and compilation continues.

use crate::block::BlockKind;
use thiserror::Error;

/// Errors raised by a [`crate::renderer::DocumentRenderer`]
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer's output sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A call arrived while the document was not open
    #[error("Document is not open")]
    NotOpen,
    /// The renderer has no representation for this block kind
    #[error("Block kind '{0}' is not supported by this renderer")]
    UnsupportedBlock(BlockKind),
    /// Any other backend specific failure
    #[error("{0}")]
    Backend(String),
}

impl RenderError {
    /// Whether the compiler must abort on this error.
    ///
    /// Unsupported blocks are reported as diagnostics instead.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RenderError::UnsupportedBlock(_))
    }
}

/// Errors raised while loading a data store
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Data source must be a JSON object")]
    NotAnObject,
    #[error("Failed to read data source: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal errors that abort a compilation
#[derive(Debug, Error)]
pub enum CompileError {
    /// The template is not well-formed markup
    #[error("Markup error at byte {position}: {message}")]
    Markup { message: String, position: u64 },
    /// An element appeared before the root element opened the document
    #[error("Document is not open yet: <{element}> appeared before <{root}>")]
    NotOpened { element: String, root: String },
    /// The root element appeared while a document was already open or closed
    #[error("Document is already open: <{root}> appeared twice")]
    DuplicateRoot { root: String },
    /// An element appeared after the root element was closed
    #[error("<{element}> appeared after the document was closed")]
    AfterClose { element: String },
    /// A non-cell element was opened inside a table
    #[error("<{element}> is not allowed inside a table, only <cell> is")]
    NotTableChild { element: String },
    /// A cell was opened outside a table
    #[error("<cell> must be a child of <table>")]
    CellOutsideTable,
    /// The template contained no root element at all
    #[error("Template has no <{root}> root element")]
    MissingRoot { root: String },
    /// The template ended while the document was still open
    #[error("Template ended before </{root}>")]
    UnexpectedEof { root: String },
    /// The renderer failed to open the document
    #[error("Failed to open document: {0}")]
    OpenFailed(#[source] RenderError),
    /// A renderer call failed fatally
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    /// The data store could not be loaded
    #[error(transparent)]
    Data(#[from] DataError),
    /// Requested backend is not registered
    #[error("Backend '{0}' not found")]
    BackendNotFound(String),
    /// A backend option was unknown or had a bad value
    #[error("Invalid backend option: {0}")]
    InvalidOption(String),
}
