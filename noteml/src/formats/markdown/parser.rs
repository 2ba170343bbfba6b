//! Markdown parsing (Markdown → document tree).
//!
//! Pipeline: Markdown string → Comrak AST → document tree. Parsing is
//! lenient: CommonMark has no failure mode for plain text input, so this
//! conversion always succeeds.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};

use crate::tree::{
    Attachment, CodeBlock, Document, Link, List, ListItem, Node, Table, TableCell, TableRow,
    MAX_DEPTH,
};

/// Parse a Markdown string into a document tree.
pub fn from_markdown(source: &str) -> Document {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let mut children = Vec::new();
    for child in root.children() {
        collect_block(child, 0, &mut children);
    }
    Document::with_children(children)
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    options
}

fn collect_block<'a>(node: &'a AstNode<'a>, depth: usize, out: &mut Vec<Node>) {
    if depth > MAX_DEPTH {
        let mut text = String::new();
        collect_text_content(node, &mut text);
        if !text.trim().is_empty() {
            out.push(Node::Paragraph(vec![Node::Text(text)]));
        }
        return;
    }

    let node_data = node.data.borrow();
    match &node_data.value {
        NodeValue::Paragraph => {
            let mut inlines = Vec::new();
            for child in node.children() {
                collect_inline(child, depth + 1, &mut inlines);
            }
            if !inlines.is_empty() {
                out.push(Node::Paragraph(inlines));
            }
        }

        // Headings have no counterpart in the note markup; the emphasis at
        // least survives as bold.
        NodeValue::Heading(_) => {
            let mut inlines = Vec::new();
            for child in node.children() {
                collect_inline(child, depth + 1, &mut inlines);
            }
            if !inlines.is_empty() {
                out.push(Node::Paragraph(vec![Node::Bold(inlines)]));
            }
        }

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            let mut items = Vec::new();
            for child in node.children() {
                collect_list_item(child, depth + 1, &mut items);
            }
            out.push(Node::List(List { ordered, items }));
        }

        NodeValue::CodeBlock(code_block) => {
            let language = if code_block.info.is_empty() {
                None
            } else {
                Some(code_block.info.clone())
            };
            out.push(Node::CodeBlock(CodeBlock {
                language,
                content: code_block.literal.trim_end_matches('\n').to_string(),
            }));
        }

        NodeValue::Table(_) => {
            let mut rows = Vec::new();
            for child in node.children() {
                if let NodeValue::TableRow(_) = child.data.borrow().value {
                    let mut cells = Vec::new();
                    for cell in child.children() {
                        let mut inlines = Vec::new();
                        for inline in cell.children() {
                            collect_inline(inline, depth + 1, &mut inlines);
                        }
                        cells.push(TableCell { children: inlines });
                    }
                    rows.push(TableRow { cells });
                }
            }
            out.push(Node::Table(Table { rows }));
        }

        // Block quotes have no markup counterpart, so their content is
        // hoisted out as ordinary blocks.
        NodeValue::BlockQuote => {
            for child in node.children() {
                collect_block(child, depth + 1, out);
            }
        }

        NodeValue::HtmlBlock(html) => {
            let literal = html.literal.trim_end().to_string();
            if !literal.is_empty() {
                out.push(Node::Paragraph(vec![Node::Text(literal)]));
            }
        }

        NodeValue::ThematicBreak => {}

        _ => {
            // Anything unexpected at block level keeps its text.
            let mut text = String::new();
            collect_text_content(node, &mut text);
            if !text.trim().is_empty() {
                out.push(Node::Paragraph(vec![Node::Text(text)]));
            }
        }
    }
}

fn collect_list_item<'a>(node: &'a AstNode<'a>, depth: usize, items: &mut Vec<ListItem>) {
    let node_data = node.data.borrow();
    let checkbox = match &node_data.value {
        NodeValue::Item(_) => None,
        NodeValue::TaskItem(symbol) => Some(symbol.is_some()),
        _ => return,
    };

    let mut children = Vec::new();
    if let Some(checked) = checkbox {
        children.push(Node::Todo(checked));
    }

    let mut blocks = Vec::new();
    for child in node.children() {
        collect_block(child, depth + 1, &mut blocks);
    }

    // A leading paragraph keeps its inlines directly on the item, which is
    // how the markup side shapes list content; further blocks (nested lists,
    // extra paragraphs) follow as siblings.
    let mut blocks = blocks.into_iter();
    match blocks.next() {
        Some(Node::Paragraph(inlines)) => children.extend(inlines),
        Some(other) => children.push(other),
        None => {}
    }
    children.extend(blocks);
    items.push(ListItem { children });
}

fn collect_inline<'a>(node: &'a AstNode<'a>, depth: usize, out: &mut Vec<Node>) {
    if depth > MAX_DEPTH {
        let mut text = String::new();
        collect_text_content(node, &mut text);
        if !text.is_empty() {
            out.push(Node::Text(text));
        }
        return;
    }

    let node_data = node.data.borrow();
    match &node_data.value {
        NodeValue::Text(text) => out.push(Node::Text(text.clone())),

        NodeValue::SoftBreak => out.push(Node::Text(" ".to_string())),
        NodeValue::LineBreak => out.push(Node::LineBreak),

        NodeValue::Strong => out.push(Node::Bold(collect_inline_children(node, depth))),
        NodeValue::Emph => out.push(Node::Italic(collect_inline_children(node, depth))),
        NodeValue::Strikethrough => {
            out.push(Node::Strikethrough(collect_inline_children(node, depth)))
        }

        NodeValue::Code(code) => out.push(Node::InlineCode(code.literal.clone())),

        NodeValue::Link(link) => {
            if let Some(hash) = link.url.strip_prefix("attachment:") {
                out.push(Node::Attachment(Attachment {
                    hash: hash.to_string(),
                    mime: None,
                }));
            } else {
                out.push(Node::Link(Link {
                    href: link.url.clone(),
                    children: collect_inline_children(node, depth),
                }));
            }
        }

        NodeValue::Image(link) => {
            if let Some(hash) = link.url.strip_prefix("attachment:") {
                out.push(Node::Attachment(Attachment {
                    hash: hash.to_string(),
                    mime: Some("image".to_string()),
                }));
            } else {
                // External images degrade to links; the markup dialect only
                // embeds resources by hash.
                let mut alt = String::new();
                collect_text_content(node, &mut alt);
                let children = if alt.trim().is_empty() {
                    vec![]
                } else {
                    vec![Node::Text(alt)]
                };
                out.push(Node::Link(Link {
                    href: link.url.clone(),
                    children,
                }));
            }
        }

        NodeValue::HtmlInline(html) => {
            if !html.trim().is_empty() {
                out.push(Node::Text(html.clone()));
            }
        }

        _ => {
            let mut text = String::new();
            collect_text_content(node, &mut text);
            if !text.is_empty() {
                out.push(Node::Text(text));
            }
        }
    }
}

fn collect_inline_children<'a>(node: &'a AstNode<'a>, depth: usize) -> Vec<Node> {
    let mut children = Vec::new();
    for child in node.children() {
        collect_inline(child, depth + 1, &mut children);
    }
    children
}

fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}
