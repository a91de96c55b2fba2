use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::super::args::CommonArgs;
use crate::{
    config::{Config, load_config},
    core::TranslationStore,
};

/// Roots, configuration and store shared by the lookup commands.
pub struct CommandContext {
    pub roots: Vec<PathBuf>,
    pub config: Config,
    /// Directory paths are displayed relative to.
    pub base_dir: PathBuf,
    pub store: TranslationStore,
    pub verbose: bool,
}

impl CommandContext {
    /// Resolve roots (default: current directory) and load config from the first root.
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let base_dir = env::current_dir().context("Failed to read current directory")?;

        let roots = if common.roots.is_empty() {
            vec![base_dir.clone()]
        } else {
            common
                .roots
                .iter()
                .map(|root| {
                    base_dir
                        .join(root)
                        .canonicalize()
                        .with_context(|| format!("Workspace root not found: {}", root.display()))
                })
                .collect::<Result<Vec<_>>>()?
        };

        let loaded = load_config(&roots[0])?;
        if let Some(path) = &loaded.path {
            debug!(path = %path.display(), "loaded configuration");
        }

        let store = TranslationStore::new(roots.clone(), &loaded.config);

        Ok(Self {
            roots,
            config: loaded.config,
            base_dir,
            store,
            verbose: common.verbose,
        })
    }
}
