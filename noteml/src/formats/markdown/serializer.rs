//! Markdown serialization (document tree → Markdown).
//!
//! A single-pass walk emitting CommonMark with the GFM extensions the
//! dialect needs (strikethrough, pipe tables, task items). Literal Markdown
//! control characters in text are backslash-escaped so round-tripping
//! through a Markdown editor does not reinterpret note content.

use crate::tree::{collect_text, Document, List, Node, Table, MAX_DEPTH};

/// Serialize a document tree to Markdown.
pub fn to_markdown(doc: &Document) -> String {
    let mut out = String::with_capacity(1024);
    render_blocks(&doc.children, 0, &mut out);
    collapse_and_trim(&mut out);
    out
}

fn is_block(node: &Node) -> bool {
    matches!(
        node,
        Node::Paragraph(_) | Node::List(_) | Node::Table(_) | Node::CodeBlock(_)
    )
}

/// Render a mixed sequence: inline runs become paragraphs, block nodes
/// render themselves.
fn render_blocks(nodes: &[Node], depth: usize, out: &mut String) {
    if depth > MAX_DEPTH {
        return;
    }
    let mut inline_run: Vec<&Node> = Vec::new();
    for node in nodes {
        if is_block(node) {
            flush_inline_run(&mut inline_run, depth, out);
            render_block(node, depth, out);
        } else {
            inline_run.push(node);
        }
    }
    flush_inline_run(&mut inline_run, depth, out);
}

fn flush_inline_run(run: &mut Vec<&Node>, depth: usize, out: &mut String) {
    if run.is_empty() {
        return;
    }
    let mut line = String::new();
    let mut nodes = std::mem::take(run).into_iter().peekable();
    // A leading checkbox turns the whole run into a task entry.
    if let Some(Node::Todo(checked)) = nodes.peek() {
        line.push_str(if *checked { "- [x] " } else { "- [ ] " });
        nodes.next();
    }
    for node in nodes {
        render_inline(node, depth, &mut line);
    }
    if !line.trim().is_empty() {
        out.push_str(line.trim_end());
        out.push_str("\n\n");
    }
}

fn render_block(node: &Node, depth: usize, out: &mut String) {
    match node {
        Node::Paragraph(children) => render_blocks(children, depth + 1, out),
        Node::List(list) => {
            render_list(list, 0, depth + 1, out);
            out.push('\n');
        }
        Node::Table(table) => render_table(table, depth + 1, out),
        Node::CodeBlock(block) => {
            out.push_str("```");
            if let Some(language) = &block.language {
                out.push_str(language);
            }
            out.push('\n');
            out.push_str(&block.content);
            if !block.content.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("```\n\n");
        }
        other => {
            let mut line = String::new();
            render_inline(other, depth, &mut line);
            if !line.trim().is_empty() {
                out.push_str(line.trim_end());
                out.push_str("\n\n");
            }
        }
    }
}

fn render_list(list: &List, indent_level: usize, depth: usize, out: &mut String) {
    if depth > MAX_DEPTH {
        return;
    }
    for (index, item) in list.items.iter().enumerate() {
        out.push_str(&"  ".repeat(indent_level));
        if list.ordered {
            out.push_str(&format!("{}. ", index + 1));
        } else {
            out.push_str("- ");
        }

        let mut children = item.children.as_slice();
        if let Some(Node::Todo(checked)) = children.first() {
            out.push_str(if *checked { "[x] " } else { "[ ] " });
            children = &children[1..];
        }

        // Inline content goes on the marker line; nested blocks follow it.
        let mut line = String::new();
        let mut nested: Vec<&Node> = Vec::new();
        for child in children {
            match child {
                Node::List(_) | Node::Table(_) | Node::CodeBlock(_) => nested.push(child),
                Node::Paragraph(inner) => {
                    if !line.is_empty() {
                        line.push(' ');
                    }
                    render_inlines(inner, depth, &mut line);
                }
                _ => render_inline(child, depth, &mut line),
            }
        }
        out.push_str(line.trim());
        out.push('\n');

        for block in nested {
            match block {
                Node::List(inner) => render_list(inner, indent_level + 1, depth + 1, out),
                _ => render_block(block, depth, out),
            }
        }
    }
}

fn render_table(table: &Table, depth: usize, out: &mut String) {
    for (row_index, row) in table.rows.iter().enumerate() {
        out.push('|');
        for cell in &row.cells {
            let mut text = String::new();
            render_inlines(&cell.children, depth, &mut text);
            let text = text.replace('\n', " ");
            out.push(' ');
            out.push_str(text.trim());
            out.push_str(" |");
        }
        out.push('\n');

        // Markdown tables need a header separator after the first row.
        if row_index == 0 {
            out.push('|');
            for _ in &row.cells {
                out.push_str(" --- |");
            }
            out.push('\n');
        }
    }
    out.push('\n');
}

fn render_inlines(nodes: &[Node], depth: usize, out: &mut String) {
    for node in nodes {
        render_inline(node, depth, out);
    }
}

fn render_inline(node: &Node, depth: usize, out: &mut String) {
    if depth > MAX_DEPTH {
        return;
    }
    match node {
        Node::Text(text) => out.push_str(&escape_markdown(text)),
        Node::LineBreak => out.push_str("  \n"),
        Node::Bold(children) => wrap_inline(children, "**", "**", depth, out),
        Node::Italic(children) => wrap_inline(children, "*", "*", depth, out),
        // Markdown has no underline channel; `_..._` keeps the emphasis
        // visible at the cost of re-parsing as italic.
        Node::Underline(children) => wrap_inline(children, "_", "_", depth, out),
        Node::Strikethrough(children) => wrap_inline(children, "~~", "~~", depth, out),
        Node::InlineCode(code) => push_code_span(code, out),
        Node::CodeBlock(block) => push_code_span(&block.content, out),
        Node::Link(link) => {
            let mut label = String::new();
            render_inlines(&link.children, depth + 1, &mut label);
            if label.trim().is_empty() {
                label = link.href.clone();
            }
            out.push('[');
            out.push_str(label.trim());
            out.push_str("](");
            out.push_str(&link.href);
            out.push(')');
        }
        Node::Attachment(attachment) => {
            let is_image = attachment
                .mime
                .as_deref()
                .is_some_and(|mime| mime.starts_with("image"));
            if is_image {
                out.push('!');
            }
            out.push('[');
            out.push_str(&attachment.hash);
            out.push_str("](attachment:");
            out.push_str(&attachment.hash);
            out.push(')');
        }
        Node::Todo(checked) => out.push_str(if *checked { "[x]" } else { "[ ]" }),
        // Markdown cannot express the semantics of an unknown element, so
        // only its flattened text survives.
        Node::Unknown(unknown) => {
            let mut plain = String::new();
            collect_text(&unknown.children, &mut plain);
            out.push_str(&escape_markdown(plain.trim()));
        }
        Node::Paragraph(children) => render_inlines(children, depth + 1, out),
        Node::List(list) => {
            for item in &list.items {
                render_inlines(&item.children, depth + 1, out);
                out.push(' ');
            }
        }
        Node::Table(table) => {
            for row in &table.rows {
                for cell in &row.cells {
                    render_inlines(&cell.children, depth + 1, out);
                    out.push(' ');
                }
            }
        }
    }
}

fn wrap_inline(children: &[Node], open: &str, close: &str, depth: usize, out: &mut String) {
    let mut inner = String::new();
    render_inlines(children, depth + 1, &mut inner);
    if inner.trim().is_empty() {
        return;
    }
    out.push_str(open);
    out.push_str(inner.trim());
    out.push_str(close);
}

/// Emit an inline code span, widening the fence when the content itself
/// contains backticks.
fn push_code_span(code: &str, out: &mut String) {
    if code.is_empty() {
        return;
    }
    let fence = if code.contains('`') { "``" } else { "`" };
    let pad = if code.starts_with('`') || code.ends_with('`') {
        " "
    } else {
        ""
    };
    out.push_str(fence);
    out.push_str(pad);
    out.push_str(code);
    out.push_str(pad);
    out.push_str(fence);
}

/// Backslash-escape literal Markdown control characters in text content.
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '*' | '_' | '`' | '[' | ']' | '#') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Collapse runs of three or more newlines to a blank line and trim the
/// document edges.
fn collapse_and_trim(s: &mut String) {
    let mut result = String::with_capacity(s.len());
    let mut newlines = 0;
    for ch in s.trim_matches('\n').chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines <= 2 {
                result.push(ch);
            }
        } else {
            newlines = 0;
            result.push(ch);
        }
    }
    *s = result.trim_end().to_string();
}
