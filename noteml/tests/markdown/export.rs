//! Export tests for the Markdown format (tree → Markdown).
//!
//! Exercised through the markup parser so they cover the conversion path a
//! caller actually uses: markup in, Markdown out.

use noteml::{parse_markup, to_markdown};

fn markup_to_md(markup: &str) -> String {
    let doc = parse_markup(markup).expect("markup should parse");
    to_markdown(&doc)
}

#[test]
fn test_styled_paragraph() {
    let md = markup_to_md("<en-note><div><b>bold</b> and <i>italic</i></div></en-note>");
    assert_eq!(md, "**bold** and *italic*");
}

#[test]
fn test_underline_exports_as_emphasis() {
    let md = markup_to_md("<en-note><div><u>important</u></div></en-note>");
    assert_eq!(md, "_important_");
}

#[test]
fn test_literal_markdown_characters_are_escaped() {
    let md = markup_to_md("<en-note><div>a*b_c</div></en-note>");
    assert_eq!(md, "a\\*b\\_c");
}

#[test]
fn test_paragraphs_separated_by_blank_line() {
    let md = markup_to_md("<en-note><div>first</div><div>second</div></en-note>");
    assert_eq!(md, "first\n\nsecond");
}

#[test]
fn test_todo_list_exports_as_task_list() {
    let md = markup_to_md(concat!(
        "<en-note><ul>",
        "<li><en-todo checked=\"true\"/>done</li>",
        "<li><en-todo/>pending</li>",
        "</ul></en-note>",
    ));
    assert_eq!(md, "- [x] done\n- [ ] pending");
}

#[test]
fn test_attachment_exports_by_hash() {
    let md = markup_to_md(
        "<en-note><div><en-media hash=\"abc123\" type=\"image/png\"/></div></en-note>",
    );
    assert_eq!(md, "![abc123](attachment:abc123)");
}

#[test]
fn test_code_block_exports_fenced() {
    let md = markup_to_md("<en-note><pre>let x = 1;</pre></en-note>");
    assert_eq!(md, "```\nlet x = 1;\n```");
}

#[test]
fn test_table_exports_as_pipe_table() {
    let md = markup_to_md(concat!(
        "<en-note><table>",
        "<tr><td>Name</td><td>Qty</td></tr>",
        "<tr><td>milk</td><td>2</td></tr>",
        "</table></en-note>",
    ));
    assert_eq!(md, "| Name | Qty |\n| --- | --- |\n| milk | 2 |");
}

#[test]
fn test_unknown_element_exports_its_text() {
    let md = markup_to_md("<en-note><div>before <en-crypt>secret</en-crypt> after</div></en-note>");
    assert_eq!(md, "before secret after");
}

#[test]
fn test_empty_inline_elements_elided() {
    let md = markup_to_md("<en-note><div><b></b>visible</div></en-note>");
    assert_eq!(md, "visible");
}
