//! Multi-format conversion for note documents
//!
//!     This crate provides a uniform interface for converting between the
//!     XML note markup dialect used by note stores and its other text
//!     representations (plain text, Markdown, search text).
//!
//!     TLDR: For format authors:
//!         - Each format parses into and/or serializes from the document tree (./tree.rs)
//!         - Formats rely on their ecosystem libraries (roxmltree, comrak) rather than
//!           hand-rolled parsing; only serializers are written by hand where the output
//!           rules are strict.
//!         - The markup format is the source of truth: every tree shape must survive a
//!           markup round trip, which is why unrecognized elements are preserved verbatim
//!           instead of being dropped.
//!
//!     This is a pure lib, shell agnostic: no code here supposes a shell
//!     environment, be it std print, env vars etc.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── tree.rs                 # Document tree shared by all formats
//!     ├── formats
//!     │   ├── markup              # XML note markup (parse + serialize)
//!     │   ├── markdown            # CommonMark/GFM (parse + serialize)
//!     │   ├── text                # Plain text (parse + serialize)
//!     │   └── search              # Search-text projection (serialize only)
//!     └── lib.rs
//!
//! Error model
//!
//!     Only malformed markup is fatal: XML that does not parse, a wrong root
//!     element, or a resource element without a hash produce
//!     [`ConvertError::MalformedMarkup`]. Every other direction is total;
//!     Markdown and plain text accept any input, and serialization cannot
//!     fail. Documents are plain owned values, so conversion never mutates
//!     its input.

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod tree;

pub use error::ConvertError;
pub use format::Format;
pub use formats::{
    MarkdownFormat, MarkupFormat, PlainTextFormat, PlainTextOptions, SearchOptions,
    SearchTextFormat,
};
pub use registry::FormatRegistry;
pub use tree::{Document, Node};

/// Parse XML note markup into a document tree.
pub fn parse_markup(source: &str) -> Result<Document, ConvertError> {
    formats::markup::parse(source)
}

/// Serialize a document tree back to XML note markup, including the
/// document header.
pub fn serialize_markup(doc: &Document) -> String {
    formats::markup::serialize(doc)
}

/// Render a document tree as plain text with default options.
pub fn to_plain_text(doc: &Document) -> String {
    formats::text::to_plain_text(doc, &PlainTextOptions::default())
}

/// Parse plain text into a document tree.
pub fn parse_plain_text(source: &str) -> Document {
    formats::text::parse_plain_text(source)
}

/// Render a document tree as Markdown.
pub fn to_markdown(doc: &Document) -> String {
    formats::markdown::to_markdown(doc)
}

/// Parse Markdown into a document tree.
pub fn from_markdown(source: &str) -> Document {
    formats::markdown::from_markdown(source)
}

/// Extract tokenized search text from a document tree.
pub fn extract_search_text(doc: &Document) -> String {
    formats::search::extract_search_text(doc, &SearchOptions::default())
}
