//! Shared helpers for the integration tests.

#![allow(dead_code)]

use textdoc::backends::BlockStreamRenderer;
use textdoc::{
    compile, Block, CompileError, DataStore, Diagnostics, DocumentRenderer, HorizontalRule,
    Image, PageMargins, PageSize, RenderError, Table,
};

pub const INVOICE_TEMPLATE: &str = include_str!("fixtures/invoice.xml");
pub const INVOICE_DATA: &str = include_str!("fixtures/invoice.json");

pub fn invoice_data() -> DataStore {
    DataStore::from_json_str(INVOICE_DATA).unwrap()
}

/// Compile against the recording renderer
pub fn compile_blocks(
    template: &str,
    data: &DataStore,
) -> Result<(BlockStreamRenderer, Diagnostics), CompileError> {
    let mut renderer = BlockStreamRenderer::new();
    let diagnostics = compile(template, data, &mut renderer)?;
    Ok((renderer, diagnostics))
}

/// Compile a template that needs no data, panicking on fatal errors
pub fn blocks_of(template: &str) -> Vec<Block> {
    let (renderer, _) = compile_blocks(template, &DataStore::empty()).unwrap();
    renderer.blocks().cloned().collect()
}

/// Renderer that records like [`BlockStreamRenderer`] but fails on request
pub struct PickyRenderer {
    pub inner: BlockStreamRenderer,
    pub reject_titles: bool,
    pub fail_tables: bool,
    pub fail_open: bool,
}

impl PickyRenderer {
    pub fn new() -> Self {
        PickyRenderer {
            inner: BlockStreamRenderer::new(),
            reject_titles: false,
            fail_tables: false,
            fail_open: false,
        }
    }
}

impl DocumentRenderer for PickyRenderer {
    fn open(&mut self) -> Result<(), RenderError> {
        if self.fail_open {
            return Err(RenderError::Backend("cannot create output".to_string()));
        }
        self.inner.open()
    }

    fn close(&mut self) -> Result<(), RenderError> {
        self.inner.close()
    }

    fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    fn set_page_size(&mut self, size: PageSize) -> Result<(), RenderError> {
        self.inner.set_page_size(size)
    }

    fn set_page_margins(&mut self, margins: PageMargins) -> Result<(), RenderError> {
        self.inner.set_page_margins(margins)
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        self.inner.new_page()
    }

    fn add_horizontal_rule(&mut self, rule: &HorizontalRule) -> Result<(), RenderError> {
        self.inner.add_horizontal_rule(rule)
    }

    fn add_image(&mut self, image: &Image) -> Result<(), RenderError> {
        self.inner.add_image(image)
    }

    fn write_block(&mut self, block: &Block) -> Result<(), RenderError> {
        if self.reject_titles && block.kind == textdoc::BlockKind::Title {
            return Err(RenderError::UnsupportedBlock(block.kind));
        }
        self.inner.write_block(block)
    }

    fn write_table(&mut self, table: &Table) -> Result<(), RenderError> {
        if self.fail_tables {
            return Err(RenderError::Backend("table too wide".to_string()));
        }
        self.inner.write_table(table)
    }
}
