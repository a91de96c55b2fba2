use anyhow::Result;
use colored::Colorize;

use super::super::{
    args::KeysCommand,
    exit_status::ExitStatus,
    report::{display_path, print_keys, print_lookup_error, print_warning},
};
use super::CommandContext;
use crate::core::complete;

/// List keys containing the partial key, in file order.
pub fn keys(cmd: KeysCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let partial = cmd.partial.unwrap_or_default();

    let snapshot = match ctx.store.snapshot() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            print_lookup_error(&err);
            return Ok(ExitStatus::Failure);
        }
    };

    let candidates: Vec<_> = complete(&partial, &snapshot.index).collect();

    if ctx.verbose {
        eprintln!(
            "{} {} of {} keys from {}",
            "matched".bold().cyan(),
            candidates.len(),
            snapshot.index.len(),
            display_path(&snapshot.path, &ctx.base_dir)
        );
    }

    if candidates.is_empty() {
        print_warning(&format!("no keys match \"{}\"", partial));
    } else {
        print_keys(&candidates);
    }

    Ok(ExitStatus::found(!candidates.is_empty()))
}
