//! Template compilation for data-driven documents
//!
//!     This crate turns an XML document template plus a JSON data store into an ordered stream of
//!     styled blocks, tables and layout directives, handed to a pluggable renderer. The template
//!     says what the document looks like; the data store fills in `value` placeholders; the
//!     renderer decides what the output is (an HTML page, a recorded call list, a PDF...).
//!
//!     This is a pure lib: it powers textdoc-cli but is shell agnostic. No code here prints,
//!     reads env vars or touches files the caller did not hand over.
//!
//! Architecture
//!
//!     Compilation is a single streaming pass. Markup events come from quick-xml (./markup.rs)
//!     and are fed one at a time into a compiler session (./compiler.rs), which keeps only:
//!
//!     - the inline stack of open elements, each carrying its inherited attributes (./inherit.rs)
//!     - the pending text buffer, with template whitespace collapsed (./text.rs)
//!     - the chunks of the block being assembled (./block.rs)
//!     - the cells of the table being filled, if any (./table.rs)
//!
//!     Whenever a block or table closes it is handed to the renderer and forgotten, so memory
//!     use follows nesting depth, not document length.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # CompileError, RenderError, DataError
//!     ├── diagnostics.rs          # Recoverable problems, collected per compilation
//!     ├── markup.rs               # quick-xml pull reader -> start / end / text events
//!     ├── text.rs                 # Whitespace collapsing and the pending text buffer
//!     ├── chunk.rs                # Chunk: text + attribute map
//!     ├── inherit.rs              # Attribute inheritance across nested elements
//!     ├── block.rs                # Block kinds and block assembly
//!     ├── table.rs                # Tables, column weights
//!     ├── data.rs                 # JSON data store, placeholder discovery
//!     ├── renderer.rs             # DocumentRenderer trait and layout values
//!     ├── compiler.rs             # The compiler session
//!     ├── backend.rs              # Backend trait: template + data -> output document
//!     ├── registry.rs             # BackendRegistry for discovery and selection
//!     └── backends
//!         ├── html                # HTML page renderer
//!         └── blocks.rs           # Recording renderer, JSON output
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common                  # Shared template fixtures and helpers
//!     ├── compiler                # Compiler semantics against the recording renderer
//!     ├── html                    # HTML backend output
//!     └── blocks                  # Block-stream backend output
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Renderers and Backends
//!
//!     The compiler talks to a [`DocumentRenderer`]: open, close, page setup, rules, images,
//!     blocks and tables, in document order. A renderer never sees the template or the data.
//!
//!     A [`Backend`] wraps a renderer into something that takes a template and a data store and
//!     returns a finished document plus diagnostics. The [`BackendRegistry`] is what front ends
//!     (the CLI) use to find backends by name or output file extension.
//!
//! Errors and Diagnostics
//!
//!     Malformed markup, misplaced elements and renderer failures are fatal and come back as a
//!     [`CompileError`]. Everything else (unresolved placeholders, unparsable attribute values,
//!     blocks a renderer cannot show) is a [`Diagnostic`]: compilation continues and the full
//!     list is returned when it is done. Each diagnostic is also logged with `tracing` under the
//!     `textdoc` target.
//!
pub mod backend;
pub mod backends;
pub mod block;
pub mod chunk;
pub mod compiler;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod inherit;
pub mod markup;
pub mod registry;
pub mod renderer;
pub mod table;
pub mod text;

pub use backend::{Backend, Rendered};
pub use block::{Block, BlockKind};
pub use chunk::{AttributeMap, Chunk, FontStyles};
pub use compiler::{compile, compile_with_options, CompileOptions, Compiler, DocumentState};
pub use data::{placeholder_ids, DataStore, Resolution};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{CompileError, DataError, RenderError};
pub use markup::{MarkupEvent, MarkupReader};
pub use registry::BackendRegistry;
pub use renderer::{DocumentRenderer, HorizontalRule, Image, PageMargins, PageSize};
pub use table::Table;
