//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the note document tree and its text representations.

pub mod markdown;
pub mod markup;
pub mod search;
pub mod text;

pub use markdown::MarkdownFormat;
pub use markup::MarkupFormat;
pub use search::{SearchOptions, SearchTextFormat};
pub use text::{PlainTextFormat, PlainTextOptions};
