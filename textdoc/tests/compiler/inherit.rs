//! Attribute inheritance, chunk boundaries and whitespace handling

use crate::common::{blocks_of, compile_blocks};
use pretty_assertions::assert_eq;
use textdoc::{DataStore, DiagnosticKind};

#[test]
fn test_child_inherits_parent_attributes() {
    let blocks = blocks_of(
        r#"<textpdf><para align="center">Hi <b font-style="bold">there</b> all</para></textpdf>"#,
    );
    let chunks = &blocks[0].chunks;

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].contents, "Hi");
    assert_eq!(chunks[0].attr("align"), Some("center"));
    assert_eq!(chunks[1].contents, "there");
    assert_eq!(chunks[1].attr("align"), Some("center"));
    assert_eq!(chunks[1].attr("font-style"), Some("bold"));
    assert_eq!(chunks[2].contents, "all");
    assert_eq!(chunks[2].attr("font-style"), None);
}

#[test]
fn test_child_overrides_parent_attribute() {
    let blocks = blocks_of(
        r#"<textpdf><para font-size="10">a<big font-size="18">b<small font-size="8">c</small></big></para></textpdf>"#,
    );
    let sizes: Vec<_> = blocks[0]
        .chunks
        .iter()
        .map(|c| (c.contents.as_str(), c.attr("font-size")))
        .collect();
    assert_eq!(
        sizes,
        vec![("a", Some("10")), ("b", Some("18")), ("c", Some("8"))]
    );
}

#[test]
fn test_siblings_do_not_share_attributes() {
    let blocks = blocks_of(
        r#"<textpdf><para><i font-style="italic">x</i><u font-style="underline">y</u></para></textpdf>"#,
    );
    let chunks = &blocks[0].chunks;
    assert_eq!(chunks[0].attr("font-style"), Some("italic"));
    assert_eq!(chunks[1].attr("font-style"), Some("underline"));
}

#[test]
fn test_template_whitespace_is_collapsed() {
    let blocks = blocks_of(
        "<textpdf>\n    <para>\n        Hello\n        World\n    </para>\n</textpdf>",
    );
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text(), "HelloWorld");
}

#[test]
fn test_empty_paragraph_is_a_single_space() {
    let blocks = blocks_of(r#"<textpdf><para align="right"></para><para/></textpdf>"#);

    assert_eq!(blocks.len(), 2);
    for block in &blocks {
        assert_eq!(block.chunks.len(), 1);
        assert_eq!(block.chunks[0].contents, " ");
    }
    assert_eq!(blocks[0].chunks[0].attr("align"), Some("right"));
}

#[test]
fn test_whitespace_only_paragraph_is_a_single_space() {
    let blocks = blocks_of("<textpdf><para>\n   \n</para></textpdf>");
    assert_eq!(blocks[0].text(), " ");
}

#[test]
fn test_empty_heading_produces_no_block() {
    let blocks = blocks_of("<textpdf><title></title><section/><para>x</para></textpdf>");
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].text(), "x");
}

#[test]
fn test_line_break_inside_block() {
    let blocks = blocks_of("<textpdf><para>Line one<break/>Line two</para></textpdf>");
    assert_eq!(blocks[0].text(), "Line one\nLine two");
}

#[test]
fn test_line_break_attributes_do_not_leak() {
    let blocks = blocks_of(
        r#"<textpdf><para>a<break font-style="bold"/>b</para><para>c</para></textpdf>"#,
    );
    assert_eq!(blocks[0].chunks.len(), 2);
    assert_eq!(blocks[0].chunks[1].contents, "\nb");
    assert_eq!(blocks[0].chunks[1].attr("font-style"), None);
    assert_eq!(blocks[1].chunks[0].attr("font-style"), None);
}

#[test]
fn test_spacer_inserts_spaces() {
    let blocks = blocks_of(r#"<textpdf><para>A<hspace size="3"/>B</para></textpdf>"#);
    assert_eq!(blocks[0].text(), "A   B");
    assert_eq!(blocks[0].chunks[1].contents, "   ");
}

#[test]
fn test_bad_spacer_is_a_diagnostic() {
    let (renderer, diagnostics) = compile_blocks(
        r#"<textpdf><para>A<hspace size="wide"/><hspace/>B</para></textpdf>"#,
        &DataStore::empty(),
    )
    .unwrap();

    assert_eq!(diagnostics.of_kind(DiagnosticKind::AttributeFormat).count(), 2);
    assert_eq!(renderer.blocks().next().unwrap().text(), "AB");
}

#[test]
fn test_oversized_spacer_is_a_diagnostic() {
    let (renderer, diagnostics) = compile_blocks(
        r#"<textpdf><para>A<hspace size="18446744073709551615"/><hspace size="1001"/>B</para></textpdf>"#,
        &DataStore::empty(),
    )
    .unwrap();

    let messages: Vec<_> = diagnostics
        .of_kind(DiagnosticKind::AttributeFormat)
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("exceeds"));
    assert_eq!(renderer.blocks().next().unwrap().text(), "AB");
}

#[test]
fn test_spacer_at_limit_is_kept() {
    let blocks = blocks_of(r#"<textpdf><para>A<hspace size="1000"/>B</para></textpdf>"#);
    assert_eq!(blocks[0].text().len(), 1002);
}

#[test]
fn test_full_width_indentation_survives() {
    let blocks = blocks_of("<textpdf><para>\u{3000}\u{3000}Indented</para></textpdf>");
    assert_eq!(blocks[0].text(), "\u{3000}\u{3000}Indented");

    let blocks = blocks_of("<textpdf><para>a\u{a0}\n  b</para></textpdf>");
    assert_eq!(blocks[0].text(), "a\u{a0}b");
}

#[test]
fn test_block_attributes_reset_between_blocks() {
    let blocks = blocks_of(
        r#"<textpdf><para align="center">a</para><para>b</para></textpdf>"#,
    );
    assert_eq!(blocks[1].chunks[0].attr("align"), None);
}
