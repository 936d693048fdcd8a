//! The renderer contract
//!
//! A [`DocumentRenderer`] receives an ordered stream of document calls from
//! the compiler. It knows nothing about templates or data: everything it
//! needs is in the blocks, tables and layout values passed to it.
//!
//! Call order guarantees made by the compiler:
//!
//! - `open` is the first call and `close` the last, each exactly once for a
//!   successful compilation.
//! - page size and margins are set before the `new_page` that makes them
//!   effective.
//! - blocks and tables arrive in document order and never interleave.

use crate::block::Block;
use crate::error::RenderError;
use crate::table::Table;
use serde::Serialize;

pub trait DocumentRenderer {
    fn open(&mut self) -> Result<(), RenderError>;

    fn close(&mut self) -> Result<(), RenderError>;

    /// Whether the document is currently open
    fn is_open(&self) -> bool;

    fn set_page_size(&mut self, size: PageSize) -> Result<(), RenderError>;

    fn set_page_margins(&mut self, margins: PageMargins) -> Result<(), RenderError>;

    fn new_page(&mut self) -> Result<(), RenderError>;

    fn add_horizontal_rule(&mut self, rule: &HorizontalRule) -> Result<(), RenderError>;

    fn add_image(&mut self, image: &Image) -> Result<(), RenderError>;

    /// Emit a finished block.
    ///
    /// Renderers without a representation for a block kind return
    /// [`RenderError::UnsupportedBlock`], which the compiler reports as a
    /// diagnostic and otherwise ignores.
    fn write_block(&mut self, block: &Block) -> Result<(), RenderError>;

    fn write_table(&mut self, table: &Table) -> Result<(), RenderError>;
}

/// Named page size in points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSize {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

const fn size(name: &'static str, width: u32, height: u32) -> PageSize {
    PageSize {
        name,
        width,
        height,
    }
}

const NAMED_SIZES: [PageSize; 22] = [
    size("a0", 2384, 3370),
    size("a1", 1684, 2384),
    size("a2", 1191, 1684),
    size("a3", 842, 1191),
    size("a4", 595, 842),
    size("a5", 420, 595),
    size("a6", 297, 420),
    size("a7", 210, 297),
    size("a8", 148, 210),
    size("a9", 105, 148),
    size("a10", 74, 105),
    size("b0", 2834, 4008),
    size("b1", 2004, 2834),
    size("b2", 1417, 2004),
    size("b3", 1000, 1417),
    size("b4", 708, 1000),
    size("b5", 498, 708),
    size("b6", 354, 498),
    size("b7", 249, 354),
    size("b8", 175, 249),
    size("b9", 124, 175),
    size("b10", 87, 124),
];

impl PageSize {
    pub const A4: PageSize = size("a4", 595, 842);

    /// Look up `a0`..`a10` or `b0`..`b10`, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<PageSize> {
        let name = name.trim();
        NAMED_SIZES
            .iter()
            .find(|size| size.name.eq_ignore_ascii_case(name))
            .copied()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMargins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl PageMargins {
    /// Parse `"left,right,top,bottom"`; extra fields are ignored
    pub fn parse(margin: &str) -> Result<Self, String> {
        let parts: Vec<&str> = margin.split(',').map(str::trim).collect();
        if parts.len() < 4 {
            return Err(format!(
                "Margin '{margin}' needs four comma separated values (left,right,top,bottom)"
            ));
        }
        let value = |index: usize| {
            parts[index]
                .parse::<i32>()
                .map_err(|_| format!("Invalid margin value '{}' in '{margin}'", parts[index]))
        };
        Ok(PageMargins {
            left: value(0)?,
            right: value(1)?,
            top: value(2)?,
            bottom: value(3)?,
        })
    }
}

impl Default for PageMargins {
    fn default() -> Self {
        PageMargins {
            left: 45,
            right: 45,
            top: 50,
            bottom: 56,
        }
    }
}

/// Horizontal rule: line width in points and length as a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HorizontalRule {
    pub width: u32,
    pub percent: u32,
}

impl Default for HorizontalRule {
    fn default() -> Self {
        HorizontalRule {
            width: 1,
            percent: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub source: String,
}
