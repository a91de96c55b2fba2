//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `serve`: Start the language server on stdio
//! - `mcp`: Start the MCP server for AI integration
//! - `keys`: List translation keys matching a partial key
//! - `links`: List translation calls in a file and where their keys are defined
//! - `locate`: Print the translation file langkey would use
//! - `init`: Initialize langkey configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Keys(cmd)) => cmd.common.verbose,
            Some(Command::Links(cmd)) => cmd.common.verbose,
            Some(Command::Locate(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | Some(Command::Mcp) | None => false,
        }
    }
}

/// Common arguments shared by lookup commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Workspace root to search for the translation file (repeatable, default: current directory)
    #[arg(long = "root", value_name = "DIR", env = "LANGKEY_ROOT")]
    pub roots: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    /// Partial key to filter by (case-insensitive substring)
    pub partial: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct LinksCommand {
    /// Source file to scan for translation calls
    pub file: PathBuf,

    /// Also match `$t(...)` calls regardless of the file extension
    #[arg(long)]
    pub alternate: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct LocateCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the language server on stdio
    Serve,
    /// Start MCP server for AI coding agents
    Mcp,
    /// List translation keys matching a partial key
    Keys(KeysCommand),
    /// List translation calls in a file that resolve to a key definition
    Links(LinksCommand),
    /// Print the translation file that would be used
    Locate(LocateCommand),
    /// Initialize a new .langkeyrc.json configuration file
    Init,
}
