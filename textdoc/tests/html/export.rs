//! Export tests for the HTML backend (template + data -> HTML)
//!
//! These tests verify the page produced for a complete template by checking
//! the resulting HTML structure.

use crate::common::{invoice_data, INVOICE_TEMPLATE};
use std::collections::HashMap;
use textdoc::backends::{HtmlBackend, HtmlOptions, PlaceholderMode};
use textdoc::{Backend, BackendRegistry, DataStore, DiagnosticKind};

fn invoice_html(options: &HashMap<String, String>) -> (String, usize) {
    let rendered = HtmlBackend::default()
        .render_with_options(INVOICE_TEMPLATE, &invoice_data(), options)
        .unwrap();
    (rendered.output, rendered.diagnostics.len())
}

#[test]
fn test_document_head() {
    let (html, _) = invoice_html(&HashMap::new());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Invoice 42</title>"));
    assert!(html.contains("<meta charset=\"UTF-8\">"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_title_block_style() {
    let (html, _) = invoice_html(&HashMap::new());
    assert!(html.contains(r#"<h1 class="title" style="text-align: center; ">Invoice</h1>"#));
}

#[test]
fn test_placeholders_as_text() {
    let (html, diagnostics) = invoice_html(&HashMap::new());

    assert!(html.contains(
        r#"<p class="para">Customer:<span> </span><span style="font-weight: bold; text-decoration: underline; ">ACME &amp; Co</span></p>"#
    ));
    assert!(html.contains(
        r#"<p class="para" style="text-indent: 20px; ">Amount due:<span> </span><span style="font-weight: bold; ">42.00</span></p>"#
    ));
    // "reference" is not in the data store
    assert_eq!(diagnostics, 1);
}

#[test]
fn test_placeholders_as_inputs() {
    let mut options = HashMap::new();
    options.insert("placeholders".to_string(), "input".to_string());
    let (html, _) = invoice_html(&options);

    assert!(html.contains(
        r#"<input type="text" id="customer" name="customer" size="10" value="ACME &amp; Co">"#
    ));
    assert!(!html.contains("<select"));
}

#[test]
fn test_table_export() {
    let (html, _) = invoice_html(&HashMap::new());

    assert!(html.contains(r#"<table border="2" width="90%">"#));
    assert!(html.contains(
        r#"<tr><td width="66%">Item</td><td width="33%" style="text-align: right;">Price</td></tr>"#
    ));
    assert!(html.contains(
        r#"<tr><td width="66%">Widget</td><td width="33%" style="text-align: right;">10.00</td></tr>"#
    ));
}

#[test]
fn test_rules_breaks_and_empty_paragraphs() {
    let (html, _) = invoice_html(&HashMap::new());

    assert!(html.contains(r#"<hr style="width: 80%; border-top-width: 1px;">"#));
    // one for <page>, one for <pagebreak>
    assert_eq!(html.matches(r#"<hr class="pagebreak">"#).count(), 2);
    assert!(html.contains(r#"<p class="para"> </p>"#));
    assert!(html.contains(r#"<h3 class="section">Notes<span><br>Thank you</span></h3>"#));
}

#[test]
fn test_unresolved_placeholder_renders_empty() {
    let (html, _) = invoice_html(&HashMap::new());
    assert!(html.contains(
        r#"<p class="para" style="font-style: italic; ">Reference:<span style="font-style: italic; "></span></p>"#
    ));
}

#[test]
fn test_head_options() {
    let mut options = HashMap::new();
    options.insert("css".to_string(), "print.css,screen.css".to_string());
    options.insert("js".to_string(), "form.js".to_string());
    options.insert("title".to_string(), "Override".to_string());
    options.insert("extra".to_string(), "<div id=\"sig\"></div>".to_string());
    let (html, _) = invoice_html(&options);

    assert!(html.contains("<title>Override</title>"));
    assert!(html.contains(r#"href="print.css""#));
    assert!(html.contains(r#"href="screen.css""#));
    assert!(html.contains(r#"src="form.js""#));
    assert!(html.contains("<div id=\"sig\"></div>\n</body>"));
}

#[test]
fn test_configured_backend_defaults() {
    let backend = HtmlBackend::new(HtmlOptions {
        declare: "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\">".to_string(),
        placeholders: PlaceholderMode::Combo,
        ..HtmlOptions::default()
    });
    let rendered = backend
        .render(INVOICE_TEMPLATE, &invoice_data())
        .unwrap();

    assert!(rendered.output.starts_with("<!DOCTYPE html PUBLIC"));
    assert!(rendered.output.contains(r#"<select id="amount_need" name="amount_need">"#));
}

#[test]
fn test_custom_root_via_registry() {
    let registry = BackendRegistry::default();
    let rendered = registry
        .render(
            "<Doc><para>x</para></Doc>",
            &DataStore::empty(),
            "html",
            &HashMap::from([("root".to_string(), "doc".to_string())]),
        )
        .unwrap();
    assert!(rendered.output.contains(r#"<p class="para">x</p>"#));
    assert_eq!(
        rendered
            .diagnostics
            .of_kind(DiagnosticKind::Renderer)
            .count(),
        0
    );
}
