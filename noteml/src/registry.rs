//! Format registry for format discovery and selection.

use crate::error::ConvertError;
use crate::format::Format;
use crate::tree::Document;
use std::collections::HashMap;

/// Registry of conversion formats.
///
/// Formats are registered by name and looked up for parsing, serialization,
/// or whole-string conversion between two formats.
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let text = registry.convert("<en-note><b>hi</b></en-note>", "markup", "markdown")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format, replacing any existing format of the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name.
    pub fn get(&self, name: &str) -> Result<&dyn Format, ConvertError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| ConvertError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists.
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted).
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect format from a filename based on its extension.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        for format in self.formats.values() {
            if format.file_extensions().contains(&extension) {
                return Some(format.name().to_string());
            }
        }

        None
    }

    /// Parse source text using the named format.
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, ConvertError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(ConvertError::NotSupported(format!(
                "format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    /// Serialize a document using the named format.
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, ConvertError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    /// Serialize a document using the named format and string-keyed options.
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, ConvertError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(ConvertError::NotSupported(format!(
                "format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(doc, options)
    }

    /// Convert a string from one registered format to another.
    pub fn convert(&self, source: &str, from: &str, to: &str) -> Result<String, ConvertError> {
        let doc = self.parse(source, from)?;
        self.serialize(&doc, to)
    }

    /// Create a registry with the built-in formats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::markup::MarkupFormat);
        registry.register(crate::formats::markdown::MarkdownFormat);
        registry.register(crate::formats::text::PlainTextFormat);
        registry.register(crate::formats::search::SearchTextFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
