use std::process::ExitCode;

use clap::Parser;
use langkey::cli::{Arguments, Command, ExitStatus};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the `tracing` filter directive.
const LOG_ENV: &str = "LANGKEY_LOG";

fn main() -> ExitCode {
    let args = Arguments::parse();

    let server: Option<fn() -> anyhow::Result<()>> = match args.command {
        Some(Command::Serve) => Some(langkey::lsp::run_server),
        Some(Command::Mcp) => Some(langkey::mcp::run_server),
        _ => None,
    };

    if let Some(run_server) = server {
        init_logging("langkey=info");
        if let Err(err) = run_server() {
            eprintln!("Error: {}", err);
            return ExitStatus::Error.into();
        }
        return ExitStatus::Success.into();
    }

    init_logging(if args.verbose() {
        "langkey=debug"
    } else {
        "langkey=warn"
    });

    match langkey::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}

/// Log to stderr; stdout carries command output or a server's JSON-RPC stream.
fn init_logging(default_directive: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
