use std::fs;

use anyhow::{Context, Result};

use super::super::{
    args::LinksCommand,
    exit_status::ExitStatus,
    report::{LinkReport, display_path, print_links, print_lookup_error, print_warning},
};
use super::CommandContext;
use crate::core::document_links;

/// List the translation calls in a file whose keys resolve to a definition.
pub fn links(cmd: LinksCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;

    let path = ctx.base_dir.join(&cmd.file);
    let source = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read source file: {}", cmd.file.display()))?;

    let snapshot = match ctx.store.snapshot() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            print_lookup_error(&err);
            return Ok(ExitStatus::Failure);
        }
    };

    let alternate = cmd.alternate || ctx.config.is_alternate_syntax(&path);
    let links = document_links(&source, alternate, &snapshot);

    let file_display = display_path(&path, &ctx.base_dir);
    if links.is_empty() {
        print_warning(&format!(
            "no translation calls in {} resolve to a key in {}",
            file_display,
            display_path(&snapshot.path, &ctx.base_dir)
        ));
        return Ok(ExitStatus::Failure);
    }

    print_links(&LinkReport {
        links: &links,
        source: &source,
        file_display: &file_display,
        target_display: &display_path(&snapshot.path, &ctx.base_dir),
    });

    Ok(ExitStatus::Success)
}
