//! Markdown format tests
//!
//! Tests for bidirectional Markdown ↔ document tree conversion.

mod export;
