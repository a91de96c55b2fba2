use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{init::init, keys::keys, links::links, locate::locate},
    exit_status::ExitStatus,
};

/// Dispatch a parsed command to its handler.
///
/// # Returns
/// - `Ok(ExitStatus)` describing whether the command found what it looked for
/// - `Err` if the command could not run (unreadable input, invalid config)
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Keys(cmd)) => keys(cmd),
        Some(Command::Links(cmd)) => links(cmd),
        Some(Command::Locate(cmd)) => locate(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) | Some(Command::Mcp) => {
            // Server commands are handled in main.rs before calling run()
            bail!("Server commands should be handled before run()")
        }
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}
