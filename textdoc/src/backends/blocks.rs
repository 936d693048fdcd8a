//! Block-stream backend
//!
//! Records every renderer call in order. The recording serializes to JSON,
//! which makes it the inspection format of the CLI (`--to blocks`) and the
//! renderer tests assert against.

use crate::backend::{bool_option, check_option_keys, compile_options, Backend, Rendered};
use crate::block::Block;
use crate::compiler::compile_with_options;
use crate::data::DataStore;
use crate::error::{CompileError, RenderError};
use crate::renderer::{DocumentRenderer, HorizontalRule, Image, PageMargins, PageSize};
use crate::table::Table;
use serde::Serialize;
use std::collections::HashMap;

/// One recorded renderer call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum RenderCall {
    Open,
    Close,
    SetPageSize { size: PageSize },
    SetPageMargins { margins: PageMargins },
    NewPage,
    HorizontalRule { rule: HorizontalRule },
    Image { image: Image },
    Block { block: Block },
    Table { table: Table },
}

#[derive(Debug, Default)]
pub struct BlockStreamRenderer {
    calls: Vec<RenderCall>,
    open: bool,
}

impl BlockStreamRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<RenderCall> {
        self.calls
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.calls.iter().filter_map(|call| match call {
            RenderCall::Block { block } => Some(block),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.calls.iter().filter_map(|call| match call {
            RenderCall::Table { table } => Some(table),
            _ => None,
        })
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(&self.calls)
        } else {
            serde_json::to_string(&self.calls)
        }
    }

    fn record(&mut self, call: RenderCall) -> Result<(), RenderError> {
        if !self.open {
            return Err(RenderError::NotOpen);
        }
        self.calls.push(call);
        Ok(())
    }
}

impl DocumentRenderer for BlockStreamRenderer {
    fn open(&mut self) -> Result<(), RenderError> {
        if self.open {
            return Err(RenderError::Backend("Document is already open".to_string()));
        }
        self.open = true;
        self.calls.push(RenderCall::Open);
        Ok(())
    }

    fn close(&mut self) -> Result<(), RenderError> {
        self.record(RenderCall::Close)?;
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn set_page_size(&mut self, size: PageSize) -> Result<(), RenderError> {
        self.record(RenderCall::SetPageSize { size })
    }

    fn set_page_margins(&mut self, margins: PageMargins) -> Result<(), RenderError> {
        self.record(RenderCall::SetPageMargins { margins })
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        self.record(RenderCall::NewPage)
    }

    fn add_horizontal_rule(&mut self, rule: &HorizontalRule) -> Result<(), RenderError> {
        self.record(RenderCall::HorizontalRule { rule: *rule })
    }

    fn add_image(&mut self, image: &Image) -> Result<(), RenderError> {
        self.record(RenderCall::Image {
            image: image.clone(),
        })
    }

    fn write_block(&mut self, block: &Block) -> Result<(), RenderError> {
        self.record(RenderCall::Block {
            block: block.clone(),
        })
    }

    fn write_table(&mut self, table: &Table) -> Result<(), RenderError> {
        self.record(RenderCall::Table {
            table: table.clone(),
        })
    }
}

/// Backend that emits the recorded call stream as JSON
#[derive(Debug, Clone, Default)]
pub struct BlocksBackend {
    pretty: bool,
}

impl BlocksBackend {
    pub fn new(pretty: bool) -> Self {
        BlocksBackend { pretty }
    }
}

impl Backend for BlocksBackend {
    fn name(&self) -> &str {
        "blocks"
    }

    fn description(&self) -> &str {
        "JSON list of renderer calls, for inspecting compiled templates"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn render_with_options(
        &self,
        template: &str,
        data: &DataStore,
        options: &HashMap<String, String>,
    ) -> Result<Rendered, CompileError> {
        check_option_keys(self.name(), options, &["pretty"])?;
        let pretty = bool_option(options, "pretty")?.unwrap_or(self.pretty);

        let mut renderer = BlockStreamRenderer::new();
        let diagnostics =
            compile_with_options(template, data, &mut renderer, compile_options(options))?;
        let output = renderer
            .to_json(pretty)
            .map_err(|e| RenderError::Backend(format!("Failed to serialize blocks: {e}")))?;

        Ok(Rendered {
            output,
            diagnostics,
        })
    }
}
