//! Core lookup engine shared by the language server, CLI and MCP server.
//!
//! ## Module Structure
//!
//! - `parsers::json`: flattening a translation document into a key index
//! - `locator`: finding the translation file under the workspace roots
//! - `store`: the TTL-cached snapshot of the located file
//! - `matcher`: recognizing `Lang.t(...)` / `$t(...)` calls in source text
//! - `completion`: filtering keys for a partially typed key
//! - `links`: resolving complete calls to their definition in the file
//! - `text`: byte offset / UTF-16 position conversions
//! - `fs`: file system access behind a trait
//! - `error`: lookup failures

pub mod completion;
pub mod error;
pub mod fs;
pub mod links;
pub mod locator;
pub mod matcher;
pub mod parsers;
pub mod store;
pub mod text;

pub use completion::{Candidate, complete};
pub use error::LookupError;
pub use links::{KeyLink, KeyPosition, document_links, find_key_definition};
pub use locator::FileLocator;
pub use matcher::{CallForm, CallSite, MatchResult, ReplaceSpan, find_call_sites, match_completion};
pub use parsers::json::{FlatIndex, flatten};
pub use store::{Snapshot, TranslationStore};
