use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".langkeyrc.json";

/// Command invoked by document links to open the translation file at a key.
pub const OPEN_AT_POSITION_COMMAND: &str = "langkey.openAtPosition";

/// Characters that trigger key completion.
pub const COMPLETION_TRIGGERS: &[&str] = &["'", "\"", "`", ".", " "];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_translation_paths")]
    pub translation_paths: Vec<String>,
    #[serde(default = "default_fallback_file_name")]
    pub fallback_file_name: String,
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,
    #[serde(default = "default_alternate_syntax_extensions")]
    pub alternate_syntax_extensions: Vec<String>,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_watch_pattern")]
    pub watch_pattern: String,
}

fn default_translation_paths() -> Vec<String> {
    [
        "src/locales/en.json",
        "client/src/locales/en.json",
        "locales/en.json",
        "translations/en.json",
        "i18n/en.json",
    ]
    .map(String::from)
    .to_vec()
}

fn default_fallback_file_name() -> String {
    "en.json".to_string()
}

fn default_excluded_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

fn default_cache_ttl_ms() -> u64 {
    30_000
}

fn default_alternate_syntax_extensions() -> Vec<String> {
    vec![".vue".to_string()]
}

fn default_languages() -> Vec<String> {
    [
        "javascript",
        "typescript",
        "vue",
        "javascriptreact",
        "typescriptreact",
    ]
    .map(String::from)
    .to_vec()
}

fn default_watch_pattern() -> String {
    "**/en.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translation_paths: default_translation_paths(),
            fallback_file_name: default_fallback_file_name(),
            excluded_dirs: default_excluded_dirs(),
            cache_ttl_ms: default_cache_ttl_ms(),
            alternate_syntax_extensions: default_alternate_syntax_extensions(),
            languages: default_languages(),
            watch_pattern: default_watch_pattern(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Translation paths must be relative to a workspace root, the cache TTL
    /// must be positive and `watchPattern` must be a valid glob.
    pub fn validate(&self) -> Result<()> {
        for path in &self.translation_paths {
            if Path::new(path).is_absolute() {
                bail!(
                    "Translation path in 'translationPaths' must be relative: \"{}\"",
                    path
                );
            }
        }

        if self.fallback_file_name.is_empty() || self.fallback_file_name.contains(['/', '\\']) {
            bail!(
                "'fallbackFileName' must be a plain file name: \"{}\"",
                self.fallback_file_name
            );
        }

        if self.cache_ttl_ms == 0 {
            bail!("'cacheTtlMs' must be greater than zero");
        }

        Pattern::new(&self.watch_pattern).with_context(|| {
            format!(
                "Invalid glob pattern in 'watchPattern': \"{}\"",
                self.watch_pattern
            )
        })?;

        Ok(())
    }

    /// Whether `path` should be matched with the alternate `$t(...)` syntax.
    pub fn is_alternate_syntax(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.alternate_syntax_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
    }

    /// Whether documents with this language id get completions and links.
    pub fn supports_language(&self, language_id: &str) -> bool {
        self.languages.iter().any(|l| l == language_id)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config was loaded from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
