//! Note markup format (the constrained XML dialect notes are stored in).

pub mod parser;
pub mod serializer;

pub use parser::{parse, parse_with_limit};
pub use serializer::{serialize, MARKUP_HEADER};

use crate::error::ConvertError;
use crate::format::Format;
use crate::tree::Document;

/// Format implementation for note markup.
pub struct MarkupFormat;

impl Format for MarkupFormat {
    fn name(&self) -> &str {
        "markup"
    }

    fn description(&self) -> &str {
        "Note markup, the XML dialect notes are stored in"
    }

    fn file_extensions(&self) -> &[&str] {
        &["enml", "xml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        parser::parse(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        Ok(serializer::serialize(doc))
    }
}
