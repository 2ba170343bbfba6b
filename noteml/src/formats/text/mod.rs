//! Plain-text rendering (tree → display text) and the reverse line-oriented
//! import (plain text → tree).
//!
//! This is the human-facing flattening: inline styles drop their markers,
//! block-level nodes each terminate with exactly one line break, attachments
//! render through a placeholder template. The search extractor in
//! [`crate::formats::search`] applies a different whitespace policy.

use crate::error::ConvertError;
use crate::format::Format;
use crate::tree::{Document, Node, MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Options for [`to_plain_text`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlainTextOptions {
    /// When false, line breaks and block boundaries degrade to single
    /// spaces, flattening the note to one line.
    pub preserve_line_breaks: bool,
    /// Placeholder template for attachments; `<name>` is substituted with
    /// the resolved display name.
    pub attachment_placeholder: String,
    /// Attachment identity → display name, supplied by the caller's
    /// resource lookup. Unmapped attachments fall back to their mime hint,
    /// then their identity hash.
    pub attachment_names: HashMap<String, String>,
}

impl Default for PlainTextOptions {
    fn default() -> Self {
        PlainTextOptions {
            preserve_line_breaks: true,
            attachment_placeholder: "[Attachment: <name>]".to_string(),
            attachment_names: HashMap::new(),
        }
    }
}

/// Render a document tree as human-readable flat text.
pub fn to_plain_text(doc: &Document, options: &PlainTextOptions) -> String {
    let mut out = String::new();
    for node in &doc.children {
        render_node(node, options, 0, &mut out);
    }
    out.trim_end().to_string()
}

fn render_node(node: &Node, options: &PlainTextOptions, depth: usize, out: &mut String) {
    if depth > MAX_DEPTH {
        return;
    }
    match node {
        Node::Text(text) => push_collapsed(text, out),
        Node::LineBreak => {
            // Explicit breaks are user content; unlike block terminators,
            // consecutive ones stack.
            if options.preserve_line_breaks {
                while out.ends_with(' ') {
                    out.pop();
                }
                out.push('\n');
            } else {
                out.push(' ');
            }
        }
        Node::Paragraph(children) => {
            render_children(children, options, depth, out);
            end_block(options, out);
        }
        Node::Bold(children)
        | Node::Italic(children)
        | Node::Underline(children)
        | Node::Strikethrough(children) => render_children(children, options, depth, out),
        Node::InlineCode(code) => out.push_str(code),
        Node::CodeBlock(block) => {
            out.push_str(&block.content);
            end_block(options, out);
        }
        Node::Link(link) => {
            let before = out.len();
            render_children(&link.children, options, depth, out);
            if out.len() == before {
                out.push_str(&link.href);
            }
        }
        Node::List(list) => {
            for (index, item) in list.items.iter().enumerate() {
                if list.ordered {
                    out.push_str(&format!("{}. ", index + 1));
                } else {
                    out.push_str("- ");
                }
                render_children(&item.children, options, depth + 1, out);
                end_block(options, out);
            }
        }
        Node::Table(table) => {
            for row in &table.rows {
                for (index, cell) in row.cells.iter().enumerate() {
                    if index > 0 {
                        out.push('\t');
                    }
                    let mut cell_text = String::new();
                    render_children(&cell.children, options, depth + 1, &mut cell_text);
                    out.push_str(cell_text.replace('\n', " ").trim());
                }
                end_block(options, out);
            }
        }
        Node::Todo(checked) => out.push_str(if *checked { "[x] " } else { "[ ] " }),
        Node::Attachment(attachment) => {
            let name = options
                .attachment_names
                .get(&attachment.hash)
                .cloned()
                .or_else(|| attachment.mime.clone())
                .unwrap_or_else(|| attachment.hash.clone());
            out.push_str(&options.attachment_placeholder.replace("<name>", &name));
        }
        Node::Unknown(unknown) => render_children(&unknown.children, options, depth, out),
    }
}

fn render_children(children: &[Node], options: &PlainTextOptions, depth: usize, out: &mut String) {
    for child in children {
        render_node(child, options, depth + 1, out);
    }
}

/// Terminate a block with exactly one separator, however deeply the block
/// content was nested.
fn end_block(options: &PlainTextOptions, out: &mut String) {
    if out.is_empty() {
        return;
    }
    if options.preserve_line_breaks {
        while out.ends_with(' ') {
            out.pop();
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }
    } else if !out.ends_with(' ') {
        out.push(' ');
    }
}

/// Push text with whitespace runs collapsed to single spaces.
///
/// A run is dropped entirely when the output already ends in whitespace or
/// is at a line start, so indentation between block elements in
/// pretty-printed markup never leaks into the rendered text.
fn push_collapsed(text: &str, out: &mut String) {
    let mut in_whitespace = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_whitespace && !out.is_empty() && !out.ends_with(|c: char| c.is_whitespace()) {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
}

/// Parse plain text into a document tree: one paragraph, lines joined by
/// line breaks. Empty input yields an empty document.
pub fn parse_plain_text(text: &str) -> Document {
    if text.is_empty() {
        return Document::default();
    }
    let mut children = Vec::new();
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            children.push(Node::LineBreak);
        }
        if !line.is_empty() {
            children.push(Node::Text(line.to_string()));
        }
    }
    Document::with_children(vec![Node::Paragraph(children)])
}

/// Format implementation for plain text.
pub struct PlainTextFormat;

impl Format for PlainTextFormat {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable flat text"
    }

    fn file_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        Ok(parse_plain_text(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        Ok(to_plain_text(doc, &PlainTextOptions::default()))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        let mut opts = PlainTextOptions::default();
        if let Some(value) = options.get("preserve-line-breaks") {
            opts.preserve_line_breaks = value != "false";
        }
        if let Some(template) = options.get("attachment-placeholder") {
            opts.attachment_placeholder = template.clone();
        }
        Ok(to_plain_text(doc, &opts))
    }
}
