//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes key lookup to AI coding agents over stdio. Every tool call opens
//! the project fresh, so edits to `en.json` are visible immediately.
//!
//! ## Module Structure
//!
//! - `server`: tool router and server entry point
//! - `types`: tool parameter and result types

mod server;
pub mod types;

pub use server::{LangkeyMcpServer, run_server};
