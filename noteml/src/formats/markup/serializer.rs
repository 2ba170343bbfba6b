//! Note-markup serialization (document tree → markup).
//!
//! Output is canonical: the fixed declaration/DOCTYPE wrapper, a stable
//! attribute order, and only the XML escaping needed for round-trip safety.
//! Re-parsing the output always yields a tree structurally equal to the
//! input tree; byte-identity with the original source is not a goal.

use crate::tree::{Document, Node, MAX_DEPTH};

/// Fixed declaration and document type preamble for serialized markup.
pub const MARKUP_HEADER: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
    "<!DOCTYPE en-note SYSTEM \"http://xml.evernote.com/pub/enml2.dtd\">\n",
);

/// Serialize a document tree to canonical markup.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::with_capacity(256);
    out.push_str(MARKUP_HEADER);
    out.push_str("<en-note>");
    write_nodes(&doc.children, 0, &mut out);
    out.push_str("</en-note>");
    out
}

fn write_nodes(nodes: &[Node], depth: usize, out: &mut String) {
    if depth > MAX_DEPTH {
        return;
    }
    for node in nodes {
        write_node(node, depth, out);
    }
}

fn write_node(node: &Node, depth: usize, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::LineBreak => out.push_str("<br/>"),
        Node::Paragraph(children) => wrap(out, "div", children, depth),
        Node::Bold(children) => wrap(out, "b", children, depth),
        Node::Italic(children) => wrap(out, "i", children, depth),
        Node::Underline(children) => wrap(out, "u", children, depth),
        Node::Strikethrough(children) => wrap(out, "s", children, depth),
        Node::InlineCode(code) => {
            out.push_str("<code>");
            out.push_str(&escape_text(code));
            out.push_str("</code>");
        }
        Node::CodeBlock(block) => {
            // The dialect has no language attribute; the hint is dropped.
            out.push_str("<pre>");
            out.push_str(&escape_text(&block.content));
            out.push_str("</pre>");
        }
        Node::Link(link) => {
            out.push_str("<a href=\"");
            out.push_str(&escape_attribute(&link.href));
            out.push_str("\">");
            write_nodes(&link.children, depth + 1, out);
            out.push_str("</a>");
        }
        Node::List(list) => {
            let tag = if list.ordered { "ol" } else { "ul" };
            out.push('<');
            out.push_str(tag);
            out.push('>');
            for item in &list.items {
                wrap(out, "li", &item.children, depth);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        Node::Table(table) => {
            out.push_str("<table>");
            for row in &table.rows {
                out.push_str("<tr>");
                for cell in &row.cells {
                    wrap(out, "td", &cell.children, depth);
                }
                out.push_str("</tr>");
            }
            out.push_str("</table>");
        }
        Node::Todo(checked) => {
            if *checked {
                out.push_str("<en-todo checked=\"true\"/>");
            } else {
                out.push_str("<en-todo/>");
            }
        }
        Node::Attachment(attachment) => {
            out.push_str("<en-media hash=\"");
            out.push_str(&escape_attribute(&attachment.hash));
            out.push('"');
            if let Some(mime) = &attachment.mime {
                out.push_str(" type=\"");
                out.push_str(&escape_attribute(mime));
                out.push('"');
            }
            out.push_str("/>");
        }
        Node::Unknown(unknown) => {
            out.push('<');
            out.push_str(&unknown.tag);
            for (name, value) in &unknown.attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
            if unknown.children.is_empty() {
                out.push_str("/>");
            } else {
                out.push('>');
                write_nodes(&unknown.children, depth + 1, out);
                out.push_str("</");
                out.push_str(&unknown.tag);
                out.push('>');
            }
        }
    }
}

fn wrap(out: &mut String, tag: &str, children: &[Node], depth: usize) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    write_nodes(children, depth + 1, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Escape character data.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value (attributes are always double-quoted).
fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
