//! Command-line interface layer.
//!
//! `serve` and `mcp` are dispatched by `main` before reaching [`run_cli`],
//! since they own stdout for their JSON-RPC streams.

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

use anyhow::Result;

pub use args::{Arguments, Command, CommonArgs, KeysCommand, LinksCommand, LocateCommand};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}
