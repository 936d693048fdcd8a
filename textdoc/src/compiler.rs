//! Template compiler
//!
//! A [`Compiler`] consumes markup events one at a time and drives a
//! [`DocumentRenderer`]. It keeps no tree: the only state is the inline
//! stack, the pending text buffer, the block being assembled and the table
//! being filled, so memory use is bounded by nesting depth rather than by
//! document size.
//!
//! # Element vocabulary
//!
//! | element                              | effect                                   |
//! |--------------------------------------|------------------------------------------|
//! | root (`textpdf` by default)          | opens / closes the document              |
//! | `title` `chapter` `section` `para`   | blocks                                   |
//! | `pagebreak`                          | starts a new page                        |
//! | `page size="a4" margin="l,r,t,b"`    | page setup, then a new page              |
//! | `hrule width="1" percent="100"`      | horizontal rule                          |
//! | `img src="..."`                      | image                                    |
//! | `table columns="1,2" width="80"`     | table, children must be `cell`           |
//! | `value id="..."`                     | placeholder resolved from the data store |
//! | `hspace size="N"`                    | N literal spaces                         |
//! | `break`                              | line break inside a block                |
//! | anything else                        | inline element carrying attributes       |
//!
//! Element names are matched ignoring ASCII case.

use crate::block::{BlockAssembler, BlockKind};
use crate::data::{DataStore, Resolution};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{CompileError, RenderError};
use crate::inherit::InlineStack;
use crate::markup::{find_attribute, MarkupEvent, MarkupReader};
use crate::renderer::{DocumentRenderer, HorizontalRule, Image, PageMargins, PageSize};
use crate::table::{parse_columns, TableBuilder};
use crate::text::PendingText;

const PAGE: &str = "page";
const PAGEBREAK: &str = "pagebreak";
const HRULE: &str = "hrule";
const IMG: &str = "img";
const TABLE: &str = "table";
const CELL: &str = "cell";
const VALUE: &str = "value";
const HSPACE: &str = "hspace";
const BREAK: &str = "break";

/// Font style given to resolved placeholders that do not set their own
const PLACEHOLDER_EMPHASIS: &str = "bold,underline";

/// Largest `hspace size` accepted
const MAX_SPACER_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Name of the element that opens and closes the document
    pub root_element: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            root_element: "textpdf".to_string(),
        }
    }
}

impl CompileOptions {
    pub fn with_root(root_element: impl Into<String>) -> Self {
        CompileOptions {
            root_element: root_element.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Unopened,
    Open,
    Closed,
}

/// Compile `template` against `data`, driving `renderer`
pub fn compile<R>(
    template: &str,
    data: &DataStore,
    renderer: &mut R,
) -> Result<Diagnostics, CompileError>
where
    R: DocumentRenderer + ?Sized,
{
    compile_with_options(template, data, renderer, CompileOptions::default())
}

pub fn compile_with_options<R>(
    template: &str,
    data: &DataStore,
    renderer: &mut R,
    options: CompileOptions,
) -> Result<Diagnostics, CompileError>
where
    R: DocumentRenderer + ?Sized,
{
    let mut compiler = Compiler::new(renderer, data, options);
    for event in MarkupReader::new(template) {
        compiler.feed(event?)?;
    }
    compiler.finish()
}

/// One compilation session
pub struct Compiler<'a, R: DocumentRenderer + ?Sized> {
    renderer: &'a mut R,
    data: &'a DataStore,
    root: String,
    state: DocumentState,
    inline: InlineStack,
    pending: PendingText,
    block: BlockAssembler,
    table: Option<TableBuilder>,
    diagnostics: Diagnostics,
}

impl<'a, R: DocumentRenderer + ?Sized> Compiler<'a, R> {
    pub fn new(renderer: &'a mut R, data: &'a DataStore, options: CompileOptions) -> Self {
        let mut diagnostics = Diagnostics::new();
        for warning in data.warnings() {
            diagnostics.push(DiagnosticKind::DataBinding, warning.clone());
        }
        Compiler {
            renderer,
            data,
            root: options.root_element.to_ascii_lowercase(),
            state: DocumentState::Unopened,
            inline: InlineStack::new(),
            pending: PendingText::new(),
            block: BlockAssembler::new(),
            table: None,
            diagnostics,
        }
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Number of elements currently open on the inline stack
    pub fn inline_depth(&self) -> usize {
        self.inline.depth()
    }

    pub fn pending_text(&self) -> &str {
        self.pending.as_str()
    }

    pub fn feed(&mut self, event: MarkupEvent) -> Result<(), CompileError> {
        match event {
            MarkupEvent::Start { name, attributes } => self.start_element(&name, &attributes),
            MarkupEvent::End { name } => self.end_element(&name),
            MarkupEvent::Text(text) => {
                if self.state == DocumentState::Open {
                    self.pending.push_template_text(&text);
                }
                Ok(())
            }
        }
    }

    /// End the session, returning the collected diagnostics
    pub fn finish(self) -> Result<Diagnostics, CompileError> {
        match self.state {
            DocumentState::Closed => Ok(self.diagnostics),
            DocumentState::Unopened => Err(CompileError::MissingRoot { root: self.root }),
            DocumentState::Open => Err(CompileError::UnexpectedEof { root: self.root }),
        }
    }

    fn start_element(
        &mut self,
        name: &str,
        attributes: &[(String, String)],
    ) -> Result<(), CompileError> {
        let element = name.to_ascii_lowercase();

        if element == self.root {
            return self.open_document();
        }
        match self.state {
            DocumentState::Unopened => {
                return Err(CompileError::NotOpened {
                    element: name.to_string(),
                    root: self.root.clone(),
                })
            }
            DocumentState::Closed => {
                return Err(CompileError::AfterClose {
                    element: name.to_string(),
                })
            }
            DocumentState::Open => {}
        }
        if !self.renderer.is_open() {
            return Err(CompileError::Render(RenderError::NotOpen));
        }

        if element == TABLE || BlockKind::from_element_name(&element).is_some() {
            self.block.begin();
        }

        if let Some(table) = &mut self.table {
            if element != CELL {
                return Err(CompileError::NotTableChild {
                    element: name.to_string(),
                });
            }
            table.open_cell(attributes);
            self.pending.clear();
            return Ok(());
        }

        match element.as_str() {
            TABLE => {
                self.open_table(attributes);
                Ok(())
            }
            CELL => Err(CompileError::CellOutsideTable),
            PAGE => {
                self.setup_page(attributes)?;
                let result = self.renderer.new_page();
                self.absorb(result)
            }
            HRULE => {
                let rule = self.horizontal_rule(attributes);
                let result = self.renderer.add_horizontal_rule(&rule);
                self.absorb(result)
            }
            IMG => match find_attribute(attributes, "src") {
                Some(source) => {
                    let image = Image {
                        source: source.to_string(),
                    };
                    let result = self.renderer.add_image(&image);
                    self.absorb(result)
                }
                None => {
                    self.diagnostics
                        .push(DiagnosticKind::Renderer, "Image has no 'src' attribute");
                    Ok(())
                }
            },
            PAGEBREAK => Ok(()),
            _ => {
                self.inline
                    .open(attributes, &mut self.pending, &mut self.block);
                match element.as_str() {
                    VALUE => self.open_placeholder(attributes),
                    HSPACE => self.open_spacer(attributes),
                    _ => {}
                }
                Ok(())
            }
        }
    }

    fn end_element(&mut self, name: &str) -> Result<(), CompileError> {
        let element = name.to_ascii_lowercase();

        if element == self.root {
            if self.state == DocumentState::Open {
                self.renderer.close()?;
                self.state = DocumentState::Closed;
                tracing::debug!("Document closed");
            }
            return Ok(());
        }
        if self.state != DocumentState::Open {
            return Ok(());
        }

        match element.as_str() {
            PAGEBREAK => {
                let result = self.renderer.new_page();
                self.absorb(result)
            }
            PAGE | HRULE | IMG => Ok(()),
            BREAK => {
                self.pending.push_literal("\n");
                self.inline.discard();
                Ok(())
            }
            CELL => {
                if let Some(table) = &mut self.table {
                    table.close_cell(self.pending.take());
                }
                Ok(())
            }
            TABLE => self.close_table(),
            _ => self.close_inline(&element),
        }
    }

    fn open_document(&mut self) -> Result<(), CompileError> {
        if self.state != DocumentState::Unopened || self.renderer.is_open() {
            return Err(CompileError::DuplicateRoot {
                root: self.root.clone(),
            });
        }
        self.renderer.open().map_err(CompileError::OpenFailed)?;
        self.state = DocumentState::Open;
        tracing::debug!(root = %self.root, "Document opened");
        Ok(())
    }

    fn close_inline(&mut self, element: &str) -> Result<(), CompileError> {
        let force = element == VALUE || element == HSPACE;
        let Some(carrier) = self.inline.close(force, &mut self.pending, &mut self.block) else {
            return Ok(());
        };

        let Some(kind) = BlockKind::from_element_name(element) else {
            return Ok(());
        };
        match self.block.finish(kind, Some(&carrier)) {
            Some(block) => {
                tracing::debug!(kind = %block.kind, chunks = block.chunks.len(), "Writing block");
                let result = self.renderer.write_block(&block);
                self.absorb(result)
            }
            None => Ok(()),
        }
    }

    fn open_table(&mut self, attributes: &[(String, String)]) {
        if let Some(columns) = find_attribute(attributes, "columns") {
            if let Err(message) = parse_columns(columns) {
                self.diagnostics
                    .push(DiagnosticKind::AttributeFormat, message);
            }
        }
        if let Some(width) = find_attribute(attributes, "width") {
            if width.trim().trim_end_matches('%').parse::<f32>().is_err() {
                self.diagnostics.push(
                    DiagnosticKind::AttributeFormat,
                    format!("Invalid table width '{width}'"),
                );
            }
        }
        let own = attributes.iter().cloned().collect();
        self.table = Some(TableBuilder::new(own));
    }

    fn close_table(&mut self) -> Result<(), CompileError> {
        self.pending.clear();
        let Some(builder) = self.table.take() else {
            return Ok(());
        };
        match builder.finish() {
            Some(table) => {
                tracing::debug!(cells = table.cells.len(), "Writing table");
                let result = self.renderer.write_table(&table);
                self.absorb(result)
            }
            None => {
                tracing::debug!("Dropping table without cells");
                Ok(())
            }
        }
    }

    fn open_placeholder(&mut self, attributes: &[(String, String)]) {
        if let Some(chunk) = self.inline.top_mut() {
            chunk.is_placeholder = true;
        }
        let Some(id) = find_attribute(attributes, "id") else {
            self.diagnostics.push(
                DiagnosticKind::DataBinding,
                "Placeholder has no 'id' attribute",
            );
            return;
        };

        match self.data.resolve(id) {
            Resolution::Value(value) => {
                self.pending.push_literal(&value);
                if find_attribute(attributes, "font-style").is_none() {
                    if let Some(chunk) = self.inline.top_mut() {
                        chunk.set_attr("font-style", PLACEHOLDER_EMPHASIS);
                    }
                }
            }
            Resolution::Missing => self.diagnostics.push(
                DiagnosticKind::DataBinding,
                format!("Data key '{id}' not found"),
            ),
            Resolution::NotAString => self.diagnostics.push(
                DiagnosticKind::DataBinding,
                format!("Data key '{id}' is not a string"),
            ),
            Resolution::NoDataSection => self.diagnostics.push(
                DiagnosticKind::DataBinding,
                format!("No data section to resolve '{id}'"),
            ),
        }
    }

    fn open_spacer(&mut self, attributes: &[(String, String)]) {
        match find_attribute(attributes, "size") {
            None => self.diagnostics.push(
                DiagnosticKind::AttributeFormat,
                "Spacer has no 'size' attribute",
            ),
            Some(size) => match size.trim().parse::<usize>() {
                Ok(count) if count <= MAX_SPACER_SIZE => {
                    self.pending.push_literal(&" ".repeat(count))
                }
                Ok(_) => self.diagnostics.push(
                    DiagnosticKind::AttributeFormat,
                    format!("Spacer size '{size}' exceeds {MAX_SPACER_SIZE}"),
                ),
                Err(_) => self.diagnostics.push(
                    DiagnosticKind::AttributeFormat,
                    format!("Invalid spacer size '{size}'"),
                ),
            },
        }
    }

    fn setup_page(&mut self, attributes: &[(String, String)]) -> Result<(), CompileError> {
        if let Some(name) = find_attribute(attributes, "size") {
            match PageSize::from_name(name) {
                Some(size) => {
                    tracing::debug!(size = size.name, "Setting page size");
                    let result = self.renderer.set_page_size(size);
                    self.absorb(result)?;
                }
                None => self.diagnostics.push(
                    DiagnosticKind::AttributeFormat,
                    format!("Unknown page size '{name}'"),
                ),
            }
        }
        if let Some(margin) = find_attribute(attributes, "margin") {
            match PageMargins::parse(margin) {
                Ok(margins) => {
                    let result = self.renderer.set_page_margins(margins);
                    self.absorb(result)?;
                }
                Err(message) => self
                    .diagnostics
                    .push(DiagnosticKind::AttributeFormat, message),
            }
        }
        Ok(())
    }

    fn horizontal_rule(&mut self, attributes: &[(String, String)]) -> HorizontalRule {
        let mut rule = HorizontalRule::default();
        for (key, target) in [("width", &mut rule.width), ("percent", &mut rule.percent)] {
            let Some(raw) = find_attribute(attributes, key) else {
                continue;
            };
            match raw.trim().parse::<u32>() {
                Ok(value) => *target = value,
                Err(_) => self.diagnostics.push(
                    DiagnosticKind::AttributeFormat,
                    format!("Invalid horizontal rule {key} '{raw}'"),
                ),
            }
        }
        rule
    }

    /// Turn non-fatal renderer errors into diagnostics
    fn absorb(&mut self, result: Result<(), RenderError>) -> Result<(), CompileError> {
        match result {
            Ok(()) => Ok(()),
            Err(err) if !err.is_fatal() => {
                self.diagnostics
                    .push(DiagnosticKind::Renderer, err.to_string());
                Ok(())
            }
            Err(err) => Err(CompileError::Render(err)),
        }
    }
}
