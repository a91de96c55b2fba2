//! Language Server Protocol backend.
//!
//! Serves key completion inside `Lang.t('...')` / `$t('...')` calls and
//! document links from call sites to their definition in `en.json`. Links
//! target the `langkey.openAtPosition` command, which the server executes by
//! asking the client to show the translation file at the key.
//!
//! ## Module Structure
//!
//! - `backend`: the `LanguageServer` implementation
//! - `protocol`: conversions from core results to LSP types

mod backend;
pub mod protocol;

use anyhow::Result;
use tower_lsp::{LspService, Server};

pub use backend::Backend;

/// Entry point for the language server over stdio.
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let (service, socket) = LspService::new(Backend::new);
            Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
                .serve(service)
                .await;
            Ok(())
        })
}
