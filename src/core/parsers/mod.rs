//! Parsers for translation files.
//!
//! - `json`: flattens `en.json` documents (with whole-line comment support)

pub mod json;
