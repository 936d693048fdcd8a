//! Streaming HTML renderer
//!
//! Each renderer call turns into a small RcDom fragment that is serialized
//! straight to the output writer, so nothing but the current block is held in
//! memory. The document head and tail are plain text around those fragments.

use super::{HtmlOptions, PlaceholderMode};
use crate::block::{Block, BlockKind};
use crate::chunk::Chunk;
use crate::error::RenderError;
use crate::renderer::{DocumentRenderer, HorizontalRule, Image, PageMargins, PageSize};
use crate::table::Table;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::Rc;

pub struct HtmlRenderer<W: Write> {
    writer: W,
    options: HtmlOptions,
    open: bool,
}

impl<W: Write> HtmlRenderer<W> {
    pub fn new(writer: W, options: HtmlOptions) -> Self {
        HtmlRenderer {
            writer,
            options,
            open: false,
        }
    }

    pub fn options(&self) -> &HtmlOptions {
        &self.options
    }

    /// Give back the writer, e.g. to collect a `Vec<u8>` buffer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ensure_open(&self) -> Result<(), RenderError> {
        if self.open {
            Ok(())
        } else {
            Err(RenderError::NotOpen)
        }
    }

    fn emit(&mut self, node: &Handle) -> Result<(), RenderError> {
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::IncludeNode,
            ..Default::default()
        };
        self.writer.write_all(b"  ")?;
        serialize(
            &mut self.writer,
            &SerializableHandle::from(node.clone()),
            opts,
        )?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn block_node(&self, block: &Block) -> Result<Handle, RenderError> {
        let tag = match block.kind {
            BlockKind::Title => "h1",
            BlockKind::Chapter => "h2",
            BlockKind::Section => "h3",
            BlockKind::Paragraph => "p",
            BlockKind::PageBreak => return Err(RenderError::UnsupportedBlock(block.kind)),
        };

        let style = block
            .chunks
            .first()
            .map(|first| format!("{}{}", block_style(first), font_style(first)))
            .unwrap_or_default();
        let mut attrs = vec![("class", block.kind.element_name())];
        if !style.is_empty() {
            attrs.push(("style", style.as_str()));
        }
        let element = create_element(tag, attrs);

        for (index, chunk) in block.chunks.iter().enumerate() {
            if chunk.is_placeholder && self.options.placeholders != PlaceholderMode::Text {
                self.append_placeholder(&element, chunk);
            } else if index == 0 {
                append_text(&element, &chunk.contents);
            } else {
                let style = font_style(chunk);
                let mut attrs = Vec::new();
                if !style.is_empty() {
                    attrs.push(("style", style.as_str()));
                }
                let span = create_element("span", attrs);
                append_text(&span, &chunk.contents);
                element.children.borrow_mut().push(span);
            }
        }
        Ok(element)
    }

    fn append_placeholder(&self, parent: &Handle, chunk: &Chunk) {
        let id = chunk.attr("id").unwrap_or_default();
        let size = chunk.attr("minlen").unwrap_or("10");
        let mut attrs = vec![
            ("type", "text"),
            ("id", id),
            ("name", id),
            ("size", size),
            ("value", chunk.contents.as_str()),
        ];
        if self.options.placeholders == PlaceholderMode::Combo {
            attrs.push(("readonly", "readonly"));
        }
        parent
            .children
            .borrow_mut()
            .push(create_element("input", attrs));

        if self.options.placeholders == PlaceholderMode::Combo {
            let select_id = format!("{id}_need");
            let select = create_element(
                "select",
                vec![("id", select_id.as_str()), ("name", select_id.as_str())],
            );
            for choice in ["required", "optional"] {
                let option = create_element("option", vec![("value", choice)]);
                option.children.borrow_mut().push(create_text(choice));
                select.children.borrow_mut().push(option);
            }
            parent.children.borrow_mut().push(select);
        }
    }

    fn table_node(&self, table: &Table) -> Handle {
        let width = format!("{}%", table.width_percent());
        let element = create_element(
            "table",
            vec![("border", "2"), ("width", width.as_str())],
        );
        let percentages = table.column_percentages().unwrap_or_else(|| vec![100]);

        for row in table.rows() {
            let tr = create_element("tr", Vec::new());
            for (cell, percent) in row.iter().zip(&percentages) {
                if *percent == 0 {
                    continue;
                }
                let cell_width = format!("{percent}%");
                let mut attrs = vec![("width", cell_width.as_str())];
                if let Some(colspan) = cell.attr("colspan") {
                    attrs.push(("colspan", colspan));
                }
                let align = cell.attr("align").map(|a| format!("text-align: {a};"));
                if let Some(align) = &align {
                    attrs.push(("style", align.as_str()));
                }
                let td = create_element("td", attrs);
                append_text(&td, &cell.contents);
                tr.children.borrow_mut().push(td);
            }
            element.children.borrow_mut().push(tr);
        }
        element
    }

    fn write_head(&mut self) -> Result<(), RenderError> {
        let title = html_escape(self.options.title.as_deref().unwrap_or_default());
        let encoding = html_escape(&self.options.encoding);
        let mut head = format!(
            "{}\n<html>\n<head>\n  <meta charset=\"{encoding}\">\n  <title>{title}</title>\n",
            self.options.declare
        );
        for css in &self.options.css {
            head.push_str(&format!(
                "  <link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">\n",
                html_escape(css)
            ));
        }
        for js in &self.options.js {
            head.push_str(&format!(
                "  <script type=\"text/javascript\" src=\"{}\"></script>\n",
                html_escape(js)
            ));
        }
        head.push_str("</head>\n<body>\n");
        self.writer.write_all(head.as_bytes())?;
        Ok(())
    }
}

impl<W: Write> DocumentRenderer for HtmlRenderer<W> {
    fn open(&mut self) -> Result<(), RenderError> {
        if self.open {
            return Err(RenderError::Backend("Document is already open".to_string()));
        }
        self.write_head()?;
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), RenderError> {
        self.ensure_open()?;
        if let Some(extra) = &self.options.extra {
            self.writer.write_all(extra.as_bytes())?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.write_all(b"</body>\n</html>\n")?;
        self.writer.flush()?;
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    // HTML has no page geometry.
    fn set_page_size(&mut self, _size: PageSize) -> Result<(), RenderError> {
        self.ensure_open()
    }

    fn set_page_margins(&mut self, _margins: PageMargins) -> Result<(), RenderError> {
        self.ensure_open()
    }

    fn new_page(&mut self) -> Result<(), RenderError> {
        self.ensure_open()?;
        self.emit(&create_element("hr", vec![("class", "pagebreak")]))
    }

    fn add_horizontal_rule(&mut self, rule: &HorizontalRule) -> Result<(), RenderError> {
        self.ensure_open()?;
        let style = format!(
            "width: {}%; border-top-width: {}px;",
            rule.percent, rule.width
        );
        self.emit(&create_element("hr", vec![("style", style.as_str())]))
    }

    fn add_image(&mut self, image: &Image) -> Result<(), RenderError> {
        self.ensure_open()?;
        if image.source.is_empty() {
            return Err(RenderError::Backend("Image source is empty".to_string()));
        }
        self.emit(&create_element("img", vec![("src", image.source.as_str())]))
    }

    fn write_block(&mut self, block: &Block) -> Result<(), RenderError> {
        self.ensure_open()?;
        let node = self.block_node(block)?;
        self.emit(&node)
    }

    fn write_table(&mut self, table: &Table) -> Result<(), RenderError> {
        self.ensure_open()?;
        let node = self.table_node(table);
        self.emit(&node)
    }
}

/// Block level CSS taken from a block's first chunk
fn block_style(chunk: &Chunk) -> String {
    let mut style = String::new();
    if let Some(align) = chunk.attr("align") {
        style.push_str(&format!("text-align: {align}; "));
    }
    if let Some(indent) = chunk.attr("indent").and_then(|i| i.trim().parse::<i32>().ok()) {
        style.push_str(&format!("text-indent: {indent}px; "));
    }
    style
}

/// Inline CSS for a chunk's font attributes
fn font_style(chunk: &Chunk) -> String {
    let mut style = String::new();
    let styles = chunk.font_styles();
    if styles.bold {
        style.push_str("font-weight: bold; ");
    }
    if styles.italic {
        style.push_str("font-style: italic; ");
    }
    if styles.underline {
        style.push_str("text-decoration: underline; ");
    }
    if let Some(size) = chunk.font_size() {
        style.push_str(&format!("font-size: {size}pt; "));
    }
    style
}

/// Append text, turning each `\n` into a `<br>`
fn append_text(parent: &Handle, text: &str) {
    let mut children = parent.children.borrow_mut();
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            children.push(create_element("br", Vec::new()));
        }
        if !line.is_empty() {
            children.push(create_text(line));
        }
    }
}

fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
