//! Markdown format implementation
//!
//! Bidirectional conversion between the note document tree and CommonMark
//! Markdown with GFM extensions (tables, strikethrough, task lists).
//!
//! # Library Choice
//!
//! Parsing uses the `comrak` crate (CommonMark compliant, supports the
//! extensions this dialect needs). Serialization is hand-rolled: the escaping
//! and element-mapping rules here are strict enough that emitting Markdown
//! directly is simpler than steering a generic formatter.
//!
//! # Element Mapping Table
//!
//! | Tree node     | Markdown               | Notes                                    |
//! |---------------|------------------------|------------------------------------------|
//! | Paragraph     | Paragraph              | Headings import as bold paragraphs       |
//! | Bold          | `**bold**`             |                                          |
//! | Italic        | `*italic*`             |                                          |
//! | Underline     | `_underline_`          | Lossy: re-imports as italic              |
//! | Strikethrough | `~~strike~~`           | GFM extension                            |
//! | InlineCode    | `` `code` ``           | Fence widens when content has backticks  |
//! | CodeBlock     | Fenced code block      | Language carried on the info string      |
//! | Link          | `[label](href)`        | Empty label falls back to the href       |
//! | List          | `-` / `1.` items       | Nesting via two-space indent             |
//! | Table         | GFM pipe table         | First row doubles as the header          |
//! | Todo          | `- [ ]` / `- [x]`      | Task list items both ways                |
//! | Attachment    | `[hash](attachment:…)` | `![…]` form when the MIME type is image  |
//! | Unknown       | Flattened text         | Lossy: element identity does not survive |
//!
//! # Lossy Conversions
//!
//! Underline, unknown elements, and attachment MIME types do not survive a
//! markup → Markdown → markup round trip. Export is the lossy direction;
//! import never fails because CommonMark accepts any text.

pub mod parser;
pub mod serializer;

pub use parser::from_markdown;
pub use serializer::to_markdown;

use crate::error::ConvertError;
use crate::format::Format;
use crate::tree::Document;

/// Format implementation for Markdown.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with GFM tables, strikethrough, and task lists"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        Ok(parser::from_markdown(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        Ok(serializer::to_markdown(doc))
    }
}
