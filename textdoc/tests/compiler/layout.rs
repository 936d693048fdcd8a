//! Page setup, page breaks, rules and images

use crate::common::compile_blocks;
use textdoc::backends::RenderCall;
use textdoc::{DataStore, DiagnosticKind, HorizontalRule, Image, PageMargins, PageSize};

#[test]
fn test_layout_calls_in_order() {
    let (renderer, diagnostics) = compile_blocks(
        r#"<textpdf>
            <page size="a5" margin="10,10,20,20"/>
            <para>x</para>
            <pagebreak/>
            <hrule/>
            <img src="logo.png"/>
        </textpdf>"#,
        &DataStore::empty(),
    )
    .unwrap();

    assert!(diagnostics.is_empty());
    let calls = renderer.calls();
    assert_eq!(calls.len(), 9);
    assert_eq!(
        calls[1],
        RenderCall::SetPageSize {
            size: PageSize::from_name("a5").unwrap()
        }
    );
    assert_eq!(
        calls[2],
        RenderCall::SetPageMargins {
            margins: PageMargins {
                left: 10,
                right: 10,
                top: 20,
                bottom: 20
            }
        }
    );
    assert_eq!(calls[3], RenderCall::NewPage);
    assert!(matches!(calls[4], RenderCall::Block { .. }));
    assert_eq!(calls[5], RenderCall::NewPage);
    assert_eq!(
        calls[6],
        RenderCall::HorizontalRule {
            rule: HorizontalRule::default()
        }
    );
    assert_eq!(
        calls[7],
        RenderCall::Image {
            image: Image {
                source: "logo.png".to_string()
            }
        }
    );
}

#[test]
fn test_bad_page_attributes_are_diagnostics() {
    let (renderer, diagnostics) = compile_blocks(
        r#"<textpdf><page size="letter" margin="1,2"/></textpdf>"#,
        &DataStore::empty(),
    )
    .unwrap();

    assert_eq!(diagnostics.of_kind(DiagnosticKind::AttributeFormat).count(), 2);
    assert_eq!(
        renderer.calls(),
        &[RenderCall::Open, RenderCall::NewPage, RenderCall::Close]
    );
}

#[test]
fn test_rule_attributes() {
    let (renderer, diagnostics) = compile_blocks(
        r#"<textpdf><hrule width="3" percent="50"/><hrule width="thick"/></textpdf>"#,
        &DataStore::empty(),
    )
    .unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        renderer.calls()[1],
        RenderCall::HorizontalRule {
            rule: HorizontalRule {
                width: 3,
                percent: 50
            }
        }
    );
    assert_eq!(
        renderer.calls()[2],
        RenderCall::HorizontalRule {
            rule: HorizontalRule::default()
        }
    );
}

#[test]
fn test_image_without_source() {
    let (renderer, diagnostics) =
        compile_blocks("<textpdf><img/></textpdf>", &DataStore::empty()).unwrap();
    assert_eq!(diagnostics.of_kind(DiagnosticKind::Renderer).count(), 1);
    assert_eq!(renderer.calls().len(), 2);
}

#[test]
fn test_pagebreak_discards_pending_block_chunks() {
    let (renderer, _) = compile_blocks(
        "<textpdf><para>a<b>x</b><pagebreak/>c</para></textpdf>",
        &DataStore::empty(),
    )
    .unwrap();

    let block = renderer.blocks().next().unwrap();
    assert_eq!(block.text(), "c");
    assert!(matches!(renderer.calls()[1], RenderCall::NewPage));
}

#[test]
fn test_void_elements_keep_inline_stack() {
    let (renderer, _) = compile_blocks(
        r#"<textpdf><para align="center">a<img src="x.png"/>b</para></textpdf>"#,
        &DataStore::empty(),
    )
    .unwrap();
    let block = renderer.blocks().next().unwrap();
    assert_eq!(block.text(), "ab");
    assert!(block.chunks.iter().all(|c| c.attr("align") == Some("center")));
}
