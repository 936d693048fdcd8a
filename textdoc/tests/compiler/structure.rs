//! Document structure: root handling, call ordering and fatal errors

use crate::common::{blocks_of, compile_blocks, PickyRenderer};
use textdoc::backends::RenderCall;
use textdoc::{compile, BlockKind, Chunk, CompileError, DataStore, DiagnosticKind, RenderError};

#[test]
fn test_single_paragraph() {
    let (renderer, diagnostics) =
        compile_blocks("<textpdf><para>Hello</para></textpdf>", &DataStore::empty()).unwrap();

    assert!(diagnostics.is_empty());
    assert_eq!(renderer.calls().len(), 3);
    assert_eq!(renderer.calls()[0], RenderCall::Open);
    assert_eq!(renderer.calls()[2], RenderCall::Close);

    let block = renderer.blocks().next().unwrap();
    assert_eq!(block.kind, BlockKind::Paragraph);
    assert_eq!(block.chunks, vec![Chunk::text("Hello")]);
}

#[test]
fn test_blocks_in_document_order() {
    let blocks = blocks_of(
        r#"<textpdf>
            <title>T</title>
            <chapter>C</chapter>
            <section>S</section>
            <para>P</para>
        </textpdf>"#,
    );
    let kinds: Vec<_> = blocks.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Title,
            BlockKind::Chapter,
            BlockKind::Section,
            BlockKind::Paragraph
        ]
    );
    let texts: Vec<_> = blocks.iter().map(|b| b.text()).collect();
    assert_eq!(texts, vec!["T", "C", "S", "P"]);
}

#[test]
fn test_element_names_ignore_case() {
    let blocks = blocks_of("<TextPdf><PARA>x</PARA><Title>y</Title></TextPdf>");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[1].kind, BlockKind::Title);
}

#[test]
fn test_close_is_called_exactly_once() {
    let (renderer, _) = compile_blocks(
        "<textpdf><para>a</para><para>b</para></textpdf>",
        &DataStore::empty(),
    )
    .unwrap();
    let closes = renderer
        .calls()
        .iter()
        .filter(|c| **c == RenderCall::Close)
        .count();
    assert_eq!(closes, 1);
    assert!(!textdoc::DocumentRenderer::is_open(&renderer));
}

#[test]
fn test_prolog_and_comments_are_ignored() {
    let blocks = blocks_of(
        "<?xml version=\"1.0\"?>\n<!-- header -->\n<textpdf><!-- x --><para>Hi</para></textpdf>\n",
    );
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text(), "Hi");
}

#[test]
fn test_cdata_is_text() {
    let blocks = blocks_of("<textpdf><para><![CDATA[a < b]]></para></textpdf>");
    assert_eq!(blocks[0].text(), "a < b");
}

#[test]
fn test_element_before_root_is_fatal() {
    let result = compile_blocks("<para>x</para>", &DataStore::empty());
    assert!(matches!(result, Err(CompileError::NotOpened { .. })));
}

#[test]
fn test_duplicate_root_is_fatal() {
    let result = compile_blocks(
        "<textpdf><textpdf></textpdf></textpdf>",
        &DataStore::empty(),
    );
    assert!(matches!(result, Err(CompileError::DuplicateRoot { .. })));
}

#[test]
fn test_element_after_close_is_fatal() {
    let result = compile_blocks("<textpdf></textpdf><para>x</para>", &DataStore::empty());
    assert!(matches!(result, Err(CompileError::AfterClose { .. })));
}

#[test]
fn test_malformed_markup_is_fatal() {
    let result = compile_blocks("<textpdf><para>x</textpdf>", &DataStore::empty());
    assert!(matches!(result, Err(CompileError::Markup { .. })));
}

#[test]
fn test_missing_root() {
    let result = compile_blocks("", &DataStore::empty());
    assert!(matches!(result, Err(CompileError::MissingRoot { .. })));

    let result = compile_blocks("<!-- nothing here -->", &DataStore::empty());
    assert!(matches!(result, Err(CompileError::MissingRoot { .. })));
}

#[test]
fn test_unclosed_document() {
    let result = compile_blocks("<textpdf><para>x</para>", &DataStore::empty());
    assert!(matches!(result, Err(CompileError::UnexpectedEof { .. })));
}

#[test]
fn test_unsupported_block_becomes_diagnostic() {
    let mut renderer = PickyRenderer::new();
    renderer.reject_titles = true;

    let diagnostics = compile(
        "<textpdf><title>Gone</title><para>Kept</para></textpdf>",
        &DataStore::empty(),
        &mut renderer,
    )
    .unwrap();

    assert_eq!(diagnostics.of_kind(DiagnosticKind::Renderer).count(), 1);
    let blocks: Vec<_> = renderer.inner.blocks().collect();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text(), "Kept");
}

#[test]
fn test_renderer_failure_is_fatal() {
    let mut renderer = PickyRenderer::new();
    renderer.fail_tables = true;

    let result = compile(
        "<textpdf><table><cell>x</cell></table><para>never</para></textpdf>",
        &DataStore::empty(),
        &mut renderer,
    );
    assert!(matches!(
        result,
        Err(CompileError::Render(RenderError::Backend(_)))
    ));
    assert_eq!(renderer.inner.blocks().count(), 0);
}

#[test]
fn test_open_failure_is_fatal() {
    let mut renderer = PickyRenderer::new();
    renderer.fail_open = true;

    let result = compile("<textpdf></textpdf>", &DataStore::empty(), &mut renderer);
    assert!(matches!(result, Err(CompileError::OpenFailed(_))));
    assert!(renderer.inner.calls().is_empty());
}
