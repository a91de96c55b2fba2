//! langkey - translation key completion and navigation for `Lang.t()` / `$t()` calls
//!
//! langkey indexes a project's `en.json` translation file and offers key
//! completion and go-to-definition links inside `Lang.t('...')` calls (and
//! `$t('...')` calls in `.vue` files). It runs as a Language Server, as an
//! MCP server for AI coding agents, and as a small CLI for scripting.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reports)
//! - `config`: Configuration file loading and parsing
//! - `core`: Lookup engine (flattening, caching, call matching, links)
//! - `lsp`: Language Server Protocol backend
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod lsp;
pub mod mcp;
