//! Core data structures for the note document tree.
//!
//! A [`Document`] is the parsed representation of one note's markup. It is
//! built fresh by each parser, treated as read-only by the renderers, and
//! dropped when the conversion call returns.

use serde::{Deserialize, Serialize};

/// Upper bound on tree depth for every recursive walk in this crate.
///
/// Parsers reject or flatten input nested deeper than this; renderers stop
/// descending. Keeps adversarial input from exhausting the stack.
pub const MAX_DEPTH: usize = 128;

/// The root of a parsed note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    /// Create a document from top-level nodes.
    pub fn with_children(children: Vec<Node>) -> Self {
        Document { children }
    }

    /// Flatten the whole tree to its raw character content.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

/// A single node of the document tree.
///
/// Known markup constructs get their own variant; anything else is preserved
/// verbatim as [`Node::Unknown`] so a parse/serialize round trip never drops
/// content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Literal character data.
    Text(String),
    /// Hard line break (`<br/>`).
    LineBreak,
    /// Block container (`<div>` / `<p>`).
    Paragraph(Vec<Node>),
    Bold(Vec<Node>),
    Italic(Vec<Node>),
    Underline(Vec<Node>),
    Strikethrough(Vec<Node>),
    /// Inline code span.
    InlineCode(String),
    CodeBlock(CodeBlock),
    Link(Link),
    List(List),
    Table(Table),
    /// Checkbox (`<en-todo>`); true when checked.
    Todo(bool),
    /// Reference to binary content owned outside the tree.
    Attachment(Attachment),
    /// Unrecognized element, preserved verbatim for round-trip safety.
    Unknown(Unknown),
}

/// A verbatim block of code or preformatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language hint; note markup has no channel for this, so it survives
    /// only within Markdown conversions.
    pub language: Option<String>,
    pub content: String,
}

/// A hyperlink with inline label content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub children: Vec<Node>,
}

/// An ordered or unordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// One list entry; owned by its list, never free-floating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub children: Vec<Node>,
}

/// A table of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub children: Vec<Node>,
}

/// A reference to an attachment (`<en-media>`).
///
/// The tree holds only the identity hash and an optional mime hint; the
/// attachment bytes live with the external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub hash: String,
    pub mime: Option<String>,
}

/// An element this crate does not render specially.
///
/// Tag name, attributes (in document order), and children are kept verbatim
/// so serialization re-emits the element untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unknown {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Append the raw character content of `nodes` to `out`, depth-first.
pub fn collect_text(nodes: &[Node], out: &mut String) {
    collect_text_bounded(nodes, 0, out);
}

fn collect_text_bounded(nodes: &[Node], depth: usize, out: &mut String) {
    if depth > MAX_DEPTH {
        return;
    }
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::InlineCode(code) => out.push_str(code),
            Node::CodeBlock(block) => out.push_str(&block.content),
            Node::LineBreak => out.push(' '),
            Node::Paragraph(children)
            | Node::Bold(children)
            | Node::Italic(children)
            | Node::Underline(children)
            | Node::Strikethrough(children) => collect_text_bounded(children, depth + 1, out),
            Node::Link(link) => collect_text_bounded(&link.children, depth + 1, out),
            Node::List(list) => {
                for item in &list.items {
                    collect_text_bounded(&item.children, depth + 1, out);
                    out.push(' ');
                }
            }
            Node::Table(table) => {
                for row in &table.rows {
                    for cell in &row.cells {
                        collect_text_bounded(&cell.children, depth + 1, out);
                        out.push(' ');
                    }
                }
            }
            Node::Unknown(unknown) => collect_text_bounded(&unknown.children, depth + 1, out),
            Node::Todo(_) | Node::Attachment(_) => {}
        }
    }
}
