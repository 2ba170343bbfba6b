//! Plain-text and search-text tests.

mod render;
