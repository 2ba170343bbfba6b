//! Markup format tests
//!
//! Tests for bidirectional note markup ↔ document tree conversion.

mod roundtrip;
