//! Attribute inheritance across nested inline elements
//!
//! Every open element (block or inline) owns one chunk on the stack. A new
//! element starts from a copy of the innermost open chunk's attributes and
//! layers its own on top, so `<para align="center"><b font-style="bold">`
//! yields a chunk that is both centered and bold.
//!
//! Text never belongs to an element directly. It accumulates in a
//! [`PendingText`] buffer and is assigned to whichever chunk is flushed next:
//! the innermost chunk when a child opens, or the closing chunk when its
//! element ends.

use crate::block::BlockAssembler;
use crate::chunk::Chunk;
use crate::text::PendingText;

#[derive(Debug, Default)]
pub struct InlineStack {
    chunks: Vec<Chunk>,
}

impl InlineStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn top(&self) -> Option<&Chunk> {
        self.chunks.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Chunk> {
        self.chunks.last_mut()
    }

    /// Open an element with its own `attributes`.
    ///
    /// Text pending for the enclosing element is flushed into `block` first.
    pub fn open(
        &mut self,
        attributes: &[(String, String)],
        pending: &mut PendingText,
        block: &mut BlockAssembler,
    ) -> &mut Chunk {
        let mut chunk = Chunk::new();
        if let Some(parent) = self.chunks.last_mut() {
            if !pending.is_empty() {
                parent.contents = pending.take();
                block.push(parent.clone());
            }
            chunk.attributes = parent.attributes.clone();
        }
        chunk.extend_attributes(attributes);
        self.chunks.push(chunk);

        let top = self.chunks.len() - 1;
        &mut self.chunks[top]
    }

    /// Close the innermost element and return its chunk.
    ///
    /// Pending text becomes the chunk's contents and the chunk is appended to
    /// `block`. With `force` the chunk is appended even when no text is
    /// pending; placeholders and spacers rely on that.
    pub fn close(
        &mut self,
        force: bool,
        pending: &mut PendingText,
        block: &mut BlockAssembler,
    ) -> Option<Chunk> {
        let mut chunk = self.chunks.pop()?;
        if force || !pending.is_empty() {
            chunk.contents = pending.take();
            block.push(chunk.clone());
        }
        Some(chunk)
    }

    /// Close the innermost element without flushing anything
    pub fn discard(&mut self) -> Option<Chunk> {
        self.chunks.pop()
    }
}
