//! Search-text extraction (document tree → index-ready text).
//!
//! Produces the flat text a search index would store for a note: visible
//! text plus code content, with markup structure reduced to word boundaries.
//! This is a one-way projection; there is no parser for it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;
use crate::format::Format;
use crate::tree::{Document, Node, MAX_DEPTH};

/// Options controlling search-text extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Restrict output to visible note content, dropping attachment hashes.
    pub note_content_only: bool,
    /// Lowercase and split on non-alphanumeric boundaries instead of
    /// returning the raw text.
    pub tokenize: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            note_content_only: false,
            tokenize: true,
        }
    }
}

/// Extract search text from a document tree.
pub fn extract_search_text(doc: &Document, options: &SearchOptions) -> String {
    let mut raw = String::with_capacity(256);
    for node in &doc.children {
        walk(node, 0, options, &mut raw);
    }

    if options.tokenize {
        raw.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(|token| token.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

fn walk(node: &Node, depth: usize, options: &SearchOptions, out: &mut String) {
    if depth > MAX_DEPTH {
        return;
    }
    match node {
        Node::Text(text) => out.push_str(text),
        Node::LineBreak => out.push(' '),
        Node::InlineCode(code) => {
            out.push_str(code);
            out.push(' ');
        }
        Node::CodeBlock(block) => {
            out.push_str(&block.content);
            out.push(' ');
        }
        Node::Paragraph(children)
        | Node::Bold(children)
        | Node::Italic(children)
        | Node::Underline(children)
        | Node::Strikethrough(children) => {
            for child in children {
                walk(child, depth + 1, options, out);
            }
            if matches!(node, Node::Paragraph(_)) {
                out.push(' ');
            }
        }
        Node::Link(link) => {
            for child in &link.children {
                walk(child, depth + 1, options, out);
            }
            out.push(' ');
        }
        Node::List(list) => {
            for item in &list.items {
                for child in &item.children {
                    walk(child, depth + 1, options, out);
                }
                out.push(' ');
            }
        }
        Node::Table(table) => {
            for row in &table.rows {
                for cell in &row.cells {
                    for child in &cell.children {
                        walk(child, depth + 1, options, out);
                    }
                    out.push(' ');
                }
            }
        }
        // Checkbox state is not searchable content.
        Node::Todo(_) => {}
        Node::Attachment(attachment) => {
            if !options.note_content_only {
                out.push_str(&attachment.hash);
                out.push(' ');
            }
        }
        Node::Unknown(unknown) => {
            for child in &unknown.children {
                walk(child, depth + 1, options, out);
            }
        }
    }
}

/// Format implementation for search text. Serialize-only.
pub struct SearchTextFormat;

impl Format for SearchTextFormat {
    fn name(&self) -> &str {
        "search-text"
    }

    fn description(&self) -> &str {
        "Flat text projection for search indexing"
    }

    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        Ok(extract_search_text(doc, &SearchOptions::default()))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        let mut search_options = SearchOptions::default();
        if let Some(value) = options.get("tokenize") {
            search_options.tokenize = value == "true";
        }
        if let Some(value) = options.get("note-content-only") {
            search_options.note_content_only = value == "true";
        }
        Ok(extract_search_text(doc, &search_options))
    }
}
