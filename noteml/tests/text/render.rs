//! Plain-text rendering tests driven from markup input, covering the full
//! markup → tree → text path plus the reverse text import.

use std::collections::HashMap;

use noteml::{parse_markup, parse_plain_text, serialize_markup, to_plain_text, PlainTextOptions};
use noteml::formats::text;

fn markup_to_text(markup: &str) -> String {
    let doc = parse_markup(markup).expect("markup should parse");
    to_plain_text(&doc)
}

#[test]
fn test_paragraphs_become_lines() {
    let out = markup_to_text("<en-note><div>first</div><div>second</div></en-note>");
    assert_eq!(out, "first\nsecond");
}

#[test]
fn test_inline_styles_are_transparent() {
    let out = markup_to_text(
        "<en-note><div><b>bold</b> <i>italic</i> <u>under</u> plain</div></en-note>",
    );
    assert_eq!(out, "bold italic under plain");
}

#[test]
fn test_explicit_breaks_stack() {
    let out = markup_to_text("<en-note><div>Line 1<br/><br/>Line 2</div></en-note>");
    assert_eq!(out, "Line 1\n\nLine 2");
}

#[test]
fn test_pretty_printed_markup_renders_without_stray_spaces() {
    // Indentation between block elements must not leak into line starts.
    let out = markup_to_text(concat!(
        "<en-note>\n",
        "  <div>alpha</div>\n",
        "  <div>beta</div>\n",
        "</en-note>",
    ));
    assert_eq!(out, "alpha\nbeta");
}

#[test]
fn test_whitespace_runs_collapse() {
    let out = markup_to_text("<en-note><div>too   many\n\t spaces</div></en-note>");
    assert_eq!(out, "too many spaces");
}

#[test]
fn test_ordered_list_prefixes() {
    let out = markup_to_text("<en-note><ol><li>a</li><li>b</li><li>c</li></ol></en-note>");
    assert_eq!(out, "1. a\n2. b\n3. c");
}

#[test]
fn test_todo_markers() {
    let out = markup_to_text(concat!(
        "<en-note><ul>",
        "<li><en-todo checked=\"true\"/>done</li>",
        "<li><en-todo/>pending</li>",
        "</ul></en-note>",
    ));
    assert_eq!(out, "- [x] done\n- [ ] pending");
}

#[test]
fn test_table_cells_tab_separated() {
    let out = markup_to_text(concat!(
        "<en-note><table>",
        "<tr><td>a</td><td>b</td></tr>",
        "<tr><td>c</td><td>d</td></tr>",
        "</table></en-note>",
    ));
    assert_eq!(out, "a\tb\nc\td");
}

#[test]
fn test_attachment_placeholder_falls_back_to_hash() {
    let out = markup_to_text("<en-note><div><en-media hash=\"abc123\"/></div></en-note>");
    assert_eq!(out, "[Attachment: abc123]");
}

#[test]
fn test_attachment_name_lookup() {
    let doc = parse_markup(
        "<en-note><div><en-media hash=\"abc123\" type=\"application/pdf\"/></div></en-note>",
    )
    .unwrap();
    let mut names = HashMap::new();
    names.insert("abc123".to_string(), "report.pdf".to_string());
    let options = PlainTextOptions {
        attachment_names: names,
        ..PlainTextOptions::default()
    };
    assert_eq!(
        text::to_plain_text(&doc, &options),
        "[Attachment: report.pdf]"
    );
}

#[test]
fn test_flattened_mode_joins_with_spaces() {
    let doc = parse_markup("<en-note><div>one</div><div>two</div></en-note>").unwrap();
    let options = PlainTextOptions {
        preserve_line_breaks: false,
        ..PlainTextOptions::default()
    };
    assert_eq!(text::to_plain_text(&doc, &options), "one two");
}

#[test]
fn test_unknown_elements_keep_their_text() {
    let out = markup_to_text("<en-note><div>a <en-crypt>hidden</en-crypt> b</div></en-note>");
    assert_eq!(out, "a hidden b");
}

#[test]
fn test_rendering_is_deterministic() {
    let doc = parse_markup("<en-note><div>stable <b>output</b></div></en-note>").unwrap();
    let first = to_plain_text(&doc);
    let second = to_plain_text(&doc);
    assert_eq!(first, second);
}

#[test]
fn test_text_import_roundtrips_through_markup() {
    let markup = serialize_markup(&parse_plain_text("Line 1\nLine 2"));
    assert!(markup.ends_with("<en-note><div>Line 1<br/>Line 2</div></en-note>"));
}

#[test]
fn test_text_import_then_render_preserves_lines() {
    let doc = parse_plain_text("alpha\n\nbeta");
    assert_eq!(to_plain_text(&doc), "alpha\n\nbeta");
}

#[test]
fn test_empty_input_yields_empty_document() {
    let doc = parse_plain_text("");
    assert!(doc.children.is_empty());
    assert_eq!(to_plain_text(&doc), "");
}
