//! Note-markup parsing (markup → document tree).
//!
//! The markup dialect is a constrained XML: a single `<en-note>` root with
//! HTML-like formatting elements plus the note-specific `<en-media>` and
//! `<en-todo>`. Anything unrecognized is preserved as an [`Node::Unknown`]
//! so parsing never fails just because another client wrote an extension
//! element.

use crate::error::ConvertError;
use crate::tree::{
    Attachment, CodeBlock, Document, Link, List, ListItem, Node, Table, TableCell, TableRow,
    Unknown, MAX_DEPTH,
};
use roxmltree::{Node as XmlNode, NodeType};

/// Parse a markup string into a document tree.
pub fn parse(source: &str) -> Result<Document, ConvertError> {
    parse_with_limit(source, MAX_DEPTH)
}

/// Parse with an explicit nesting-depth limit.
///
/// Input nested deeper than `max_depth` is rejected as malformed rather than
/// risking unbounded recursion.
pub fn parse_with_limit(source: &str, max_depth: usize) -> Result<Document, ConvertError> {
    let decoded = decode_entities(source);

    let mut options = roxmltree::ParsingOptions::default();
    // Note markup carries a DOCTYPE pointing at the dialect's external DTD.
    options.allow_dtd = true;

    let xml = roxmltree::Document::parse_with_options(&decoded, options)
        .map_err(|e| ConvertError::malformed(e.to_string(), fragment_at(&decoded, &e)))?;

    let root = xml.root_element();
    let root_tag = root.tag_name().name();
    if root_tag != "en-note" {
        return Err(ConvertError::malformed(
            "root element must be <en-note>",
            format!("<{root_tag}>"),
        ));
    }

    Ok(Document::with_children(parse_children(root, 0, max_depth)?))
}

/// Convert the children of `node` into tree nodes.
///
/// Character data is significant here; list and table scaffolding, where the
/// dialect allows no character data, goes through [`parse_list_items`] and
/// [`parse_table_rows`] instead, which drop whitespace between elements.
fn parse_children(node: XmlNode, depth: usize, max_depth: usize) -> Result<Vec<Node>, ConvertError> {
    if depth > max_depth {
        return Err(ConvertError::malformed(
            format!("nesting exceeds depth limit of {max_depth}"),
            format!("<{}>", node.tag_name().name()),
        ));
    }

    let mut children = Vec::new();
    for child in node.children() {
        match child.node_type() {
            NodeType::Text => {
                let text = child.text().unwrap_or("");
                if text.is_empty() {
                    continue;
                }
                children.push(Node::Text(text.to_string()));
            }
            NodeType::Element => {
                children.push(parse_element(child, depth, max_depth)?);
            }
            // Comments and processing instructions carry no note content.
            _ => {}
        }
    }
    Ok(children)
}

fn parse_element(node: XmlNode, depth: usize, max_depth: usize) -> Result<Node, ConvertError> {
    let tag = node.tag_name().name();
    let parsed = match tag {
        "div" | "p" => Node::Paragraph(parse_children(node, depth + 1, max_depth)?),
        "br" => Node::LineBreak,
        "b" | "strong" => Node::Bold(parse_children(node, depth + 1, max_depth)?),
        "i" | "em" => Node::Italic(parse_children(node, depth + 1, max_depth)?),
        "u" => Node::Underline(parse_children(node, depth + 1, max_depth)?),
        "s" | "strike" | "del" => {
            Node::Strikethrough(parse_children(node, depth + 1, max_depth)?)
        }
        "code" | "tt" => Node::InlineCode(element_text(node)),
        "pre" => Node::CodeBlock(CodeBlock {
            language: None,
            content: element_text(node),
        }),
        "a" => Node::Link(Link {
            href: node.attribute("href").unwrap_or("").to_string(),
            children: parse_children(node, depth + 1, max_depth)?,
        }),
        "ul" | "ol" => Node::List(List {
            ordered: tag == "ol",
            items: parse_list_items(node, depth + 1, max_depth)?,
        }),
        "table" => Node::Table(Table {
            rows: parse_table_rows(node, depth + 1, max_depth)?,
        }),
        "en-todo" => Node::Todo(node.attribute("checked") == Some("true")),
        "en-media" => {
            let hash = node.attribute("hash").ok_or_else(|| {
                ConvertError::malformed("en-media element is missing its hash attribute", "<en-media>")
            })?;
            Node::Attachment(Attachment {
                hash: hash.to_string(),
                mime: node.attribute("type").map(|t| t.to_string()),
            })
        }
        _ => Node::Unknown(Unknown {
            tag: tag.to_string(),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            children: parse_children(node, depth + 1, max_depth)?,
        }),
    };
    Ok(parsed)
}

fn parse_list_items(
    node: XmlNode,
    depth: usize,
    max_depth: usize,
) -> Result<Vec<ListItem>, ConvertError> {
    let mut items = Vec::new();
    for child in node.children() {
        if child.node_type() != NodeType::Element {
            continue;
        }
        if child.tag_name().name() == "li" {
            items.push(ListItem {
                children: parse_children(child, depth + 1, max_depth)?,
            });
        }
    }
    Ok(items)
}

fn parse_table_rows(
    node: XmlNode,
    depth: usize,
    max_depth: usize,
) -> Result<Vec<TableRow>, ConvertError> {
    let mut rows = Vec::new();
    for child in node.children() {
        if child.node_type() != NodeType::Element {
            continue;
        }
        match child.tag_name().name() {
            "tr" => rows.push(parse_table_row(child, depth + 1, max_depth)?),
            // Section wrappers contribute their rows directly.
            "thead" | "tbody" | "tfoot" => {
                rows.extend(parse_table_rows(child, depth + 1, max_depth)?)
            }
            _ => {}
        }
    }
    Ok(rows)
}

fn parse_table_row(
    node: XmlNode,
    depth: usize,
    max_depth: usize,
) -> Result<TableRow, ConvertError> {
    let mut cells = Vec::new();
    for child in node.children() {
        if child.node_type() != NodeType::Element {
            continue;
        }
        let tag = child.tag_name().name();
        if tag == "td" || tag == "th" {
            cells.push(TableCell {
                children: parse_children(child, depth + 1, max_depth)?,
            });
        }
    }
    Ok(TableRow { cells })
}

/// Collect the raw character content of an element, depth-first.
fn element_text(node: XmlNode) -> String {
    let mut out = String::new();
    push_element_text(node, &mut out);
    out
}

fn push_element_text(node: XmlNode, out: &mut String) {
    for child in node.children() {
        match child.node_type() {
            NodeType::Text => out.push_str(child.text().unwrap_or("")),
            NodeType::Element => push_element_text(child, out),
            _ => {}
        }
    }
}

/// Decode named HTML entities that the dialect's external DTD defines but an
/// XML parser without that DTD would reject. The five XML-predefined entities
/// are left for the parser itself.
fn decode_entities(source: &str) -> String {
    if !source.contains('&') {
        return source.to_string();
    }
    source
        .replace("&nbsp;", "\u{a0}")
        .replace("&ndash;", "\u{2013}")
        .replace("&mdash;", "\u{2014}")
        .replace("&lsquo;", "\u{2018}")
        .replace("&rsquo;", "\u{2019}")
        .replace("&ldquo;", "\u{201c}")
        .replace("&rdquo;", "\u{201d}")
        .replace("&hellip;", "\u{2026}")
        .replace("&copy;", "\u{a9}")
}

/// The source line an XML error points at, trimmed for the error message.
fn fragment_at(source: &str, error: &roxmltree::Error) -> String {
    let row = error.pos().row as usize;
    let line = source.lines().nth(row.saturating_sub(1)).unwrap_or("");
    let mut fragment = line.trim().to_string();
    if fragment.len() > 80 {
        fragment.truncate(80);
    }
    fragment
}
