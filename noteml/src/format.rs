//! Format trait definition.
//!
//! The trait gives every conversion target the same interface: parse a
//! source string into a [`Document`], or serialize a [`Document`] back out.
//! Formats declare which directions they support.

use crate::error::ConvertError;
use crate::tree::Document;
use std::collections::HashMap;

/// Trait for conversion formats.
///
/// Implementors provide one or both directions between a string
/// representation and the document tree. Renderer options travel as string
/// key/value pairs through [`Format::serialize_with_options`]; the typed
/// option structs in each format module remain the primary API.
pub trait Format: Send + Sync {
    /// The name of this format (e.g. "markup", "markdown").
    fn name(&self) -> &str;

    /// Optional description of this format.
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document).
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source).
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse source text into a document tree.
    fn parse(&self, _source: &str) -> Result<Document, ConvertError> {
        Err(ConvertError::NotSupported(format!(
            "format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a document tree into this format.
    fn serialize(&self, _doc: &Document) -> Result<String, ConvertError> {
        Err(ConvertError::NotSupported(format!(
            "format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize with string-keyed options.
    ///
    /// The default implementation ignores the options and delegates to
    /// [`Format::serialize`]; formats with renderer options override this
    /// and read the keys they understand.
    fn serialize_with_options(
        &self,
        doc: &Document,
        _options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        self.serialize(doc)
    }
}
