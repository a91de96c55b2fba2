use anyhow::Result;
use colored::Colorize;

use super::super::{
    args::LocateCommand,
    exit_status::ExitStatus,
    report::{display_path, print_lookup_error},
};
use super::CommandContext;
use crate::core::LookupError;

/// Print the translation file that completions and links would use.
///
/// With `--verbose` the file is also loaded, so parse errors are reported.
pub fn locate(cmd: LocateCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;

    let Some(path) = ctx.store.locate() else {
        print_lookup_error(&LookupError::NotFound {
            file_name: ctx.config.fallback_file_name.clone(),
        });
        return Ok(ExitStatus::Failure);
    };

    println!("{}", path.display());

    if ctx.verbose {
        match ctx.store.snapshot() {
            Ok(snapshot) => eprintln!(
                "{} {} keys from {} (searched {} {})",
                "loaded".bold().cyan(),
                snapshot.index.len(),
                display_path(&snapshot.path, &ctx.base_dir),
                ctx.roots.len(),
                if ctx.roots.len() == 1 { "root" } else { "roots" }
            ),
            Err(err) => {
                print_lookup_error(&err);
                return Ok(ExitStatus::Failure);
            }
        }
    }

    Ok(ExitStatus::Success)
}
