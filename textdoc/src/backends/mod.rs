//! Built-in backends
//!
//! - [`html`]: a single HTML page
//! - [`blocks`]: the recorded renderer call stream as JSON

pub mod blocks;
pub mod html;

pub use blocks::{BlockStreamRenderer, BlocksBackend, RenderCall};
pub use html::{HtmlBackend, HtmlOptions, HtmlRenderer, PlaceholderMode};
