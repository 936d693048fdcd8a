//! Block kinds and block assembly

use crate::chunk::Chunk;
use serde::Serialize;
use std::fmt;

/// Kinds of block level elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockKind {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "chapter")]
    Chapter,
    #[serde(rename = "section")]
    Section,
    #[serde(rename = "para")]
    Paragraph,
    #[serde(rename = "pagebreak")]
    PageBreak,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Title,
        BlockKind::Chapter,
        BlockKind::Section,
        BlockKind::Paragraph,
        BlockKind::PageBreak,
    ];

    /// Element name used in templates
    pub fn element_name(&self) -> &'static str {
        match self {
            BlockKind::Title => "title",
            BlockKind::Chapter => "chapter",
            BlockKind::Section => "section",
            BlockKind::Paragraph => "para",
            BlockKind::PageBreak => "pagebreak",
        }
    }

    /// Look up a block kind by element name, ignoring ASCII case
    pub fn from_element_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.element_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// A finished block: its kind and its chunks in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub chunks: Vec<Chunk>,
}

impl Block {
    pub fn new(kind: BlockKind, chunks: Vec<Chunk>) -> Self {
        Block { kind, chunks }
    }

    /// Concatenated contents of every chunk
    pub fn text(&self) -> String {
        self.chunks.iter().map(|c| c.contents.as_str()).collect()
    }
}

/// Collects the chunks of the block currently being built
#[derive(Debug, Default)]
pub struct BlockAssembler {
    chunks: Vec<Chunk>,
}

impl BlockAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new block, discarding anything collected so far
    pub fn begin(&mut self) {
        self.chunks.clear();
    }

    pub fn push(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Finish the current block.
    ///
    /// An empty paragraph still occupies vertical space: it gets a single
    /// space chunk styled like `carrier`, the chunk of the element that just
    /// closed. Any other empty block yields `None`.
    pub fn finish(&mut self, kind: BlockKind, carrier: Option<&Chunk>) -> Option<Block> {
        if self.chunks.is_empty() && kind == BlockKind::Paragraph {
            let mut filler = carrier.cloned().unwrap_or_default();
            filler.contents = " ".to_string();
            self.chunks.push(filler);
        }
        if self.chunks.is_empty() {
            return None;
        }
        Some(Block::new(kind, std::mem::take(&mut self.chunks)))
    }
}
