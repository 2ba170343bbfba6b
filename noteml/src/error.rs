//! Error types for conversion operations.

use thiserror::Error;

/// Errors surfaced by the conversion layer.
///
/// [`ConvertError::MalformedMarkup`] is the only fatal error a conversion
/// itself can raise; everything else the parsers handle by best-effort
/// fallback. The remaining variants come from the registry surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// The markup input could not be parsed into a document tree.
    #[error("malformed markup: {reason} (in `{fragment}`)")]
    MalformedMarkup { reason: String, fragment: String },
    /// No format registered under the requested name.
    #[error("format '{0}' not found")]
    FormatNotFound(String),
    /// The format exists but does not support the requested direction.
    #[error("operation not supported: {0}")]
    NotSupported(String),
}

impl ConvertError {
    /// Build a [`ConvertError::MalformedMarkup`] naming the offending
    /// construct.
    pub fn malformed(reason: impl Into<String>, fragment: impl Into<String>) -> Self {
        ConvertError::MalformedMarkup {
            reason: reason.into(),
            fragment: fragment.into(),
        }
    }
}
