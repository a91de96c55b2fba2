//! The translation store: one cached, flattened snapshot of `en.json`.
//!
//! The snapshot is served while it is younger than the configured TTL and
//! rebuilt from disk otherwise. The cache slot is only locked to read or
//! swap an `Arc`, never across file I/O, so a slow rebuild does not block
//! other requests. Concurrent misses may each rebuild; the last one to
//! finish wins, and every rebuild of the same file yields the same index.

use std::{
    path::PathBuf,
    sync::{
        Arc, Mutex, PoisonError, RwLock,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use tracing::{debug, info};

use super::{
    error::LookupError,
    fs::{FileSystem, OsFileSystem},
    locator::FileLocator,
    parsers::json::{FlatIndex, flatten, parse_translation_source},
};
use crate::config::Config;

/// Source of the current time in milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self {
            now: AtomicU64::new(start_millis),
        }
    }

    pub fn set(&self, millis: u64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// A loaded translation file.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub index: Arc<FlatIndex>,
    /// Path the index was loaded from.
    pub path: PathBuf,
    /// Raw file contents, used to locate key definitions.
    pub source: Arc<str>,
}

#[derive(Debug)]
struct CacheEntry {
    snapshot: Snapshot,
    loaded_at: u64,
}

#[derive(Debug)]
struct Settings {
    roots: Vec<PathBuf>,
    locator: FileLocator,
    ttl_ms: u64,
}

pub struct TranslationStore {
    fs: Arc<dyn FileSystem>,
    clock: Arc<dyn Clock>,
    settings: RwLock<Settings>,
    entry: Mutex<Option<Arc<CacheEntry>>>,
}

impl TranslationStore {
    /// A store backed by the real file system and wall clock.
    pub fn new(roots: Vec<PathBuf>, config: &Config) -> Self {
        Self::with_backends(roots, config, Arc::new(OsFileSystem), Arc::new(SystemClock))
    }

    pub fn with_backends(
        roots: Vec<PathBuf>,
        config: &Config,
        fs: Arc<dyn FileSystem>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fs,
            clock,
            settings: RwLock::new(Settings {
                roots,
                locator: FileLocator::from_config(config),
                ttl_ms: config.cache_ttl_ms,
            }),
            entry: Mutex::new(None),
        }
    }

    pub fn roots(&self) -> Vec<PathBuf> {
        self.read_settings().roots.clone()
    }

    /// Replace the workspace roots. Drops the cached snapshot.
    pub fn set_roots(&self, roots: Vec<PathBuf>) {
        self.write_settings().roots = roots;
        self.invalidate();
    }

    /// Apply locator and TTL settings from `config`. Drops the cached snapshot.
    pub fn configure(&self, config: &Config) {
        {
            let mut settings = self.write_settings();
            settings.locator = FileLocator::from_config(config);
            settings.ttl_ms = config.cache_ttl_ms;
        }
        self.invalidate();
    }

    /// Locate the translation file without touching the cache.
    pub fn locate(&self) -> Option<PathBuf> {
        let settings = self.read_settings();
        settings.locator.locate(self.fs.as_ref(), &settings.roots)
    }

    /// The flattened index, rebuilt from disk when the cached one is stale.
    pub fn index(&self) -> Result<Arc<FlatIndex>, LookupError> {
        self.snapshot().map(|snapshot| snapshot.index)
    }

    /// The current snapshot, rebuilt from disk when the cached one is stale.
    ///
    /// On failure the previous entry is left as it was.
    pub fn snapshot(&self) -> Result<Snapshot, LookupError> {
        let ttl_ms = self.read_settings().ttl_ms;
        let now = self.clock.now_millis();

        if let Some(entry) = self.current_entry()
            && now.saturating_sub(entry.loaded_at) < ttl_ms
        {
            debug!(path = %entry.snapshot.path.display(), "serving cached translations");
            return Ok(entry.snapshot.clone());
        }

        let snapshot = self.load()?;
        let entry = Arc::new(CacheEntry {
            snapshot: snapshot.clone(),
            loaded_at: self.clock.now_millis(),
        });
        *self.entry.lock().unwrap_or_else(PoisonError::into_inner) = Some(entry);

        Ok(snapshot)
    }

    /// Drop the cached snapshot so the next request reloads from disk.
    pub fn invalidate(&self) {
        if self
            .entry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
        {
            debug!("translation cache invalidated");
        }
    }

    fn load(&self) -> Result<Snapshot, LookupError> {
        let path = self.locate().ok_or_else(|| LookupError::NotFound {
            file_name: self.read_settings().locator.fallback_file_name.clone(),
        })?;

        let content = self
            .fs
            .read_to_string(&path)
            .map_err(|source| LookupError::Read {
                path: path.clone(),
                source,
            })?;

        let document = parse_translation_source(&content).map_err(|e| LookupError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let index = flatten(&document);
        info!(
            path = %path.display(),
            keys = index.len(),
            "loaded translations"
        );

        Ok(Snapshot {
            index: Arc::new(index),
            path,
            source: Arc::from(content),
        })
    }

    fn current_entry(&self) -> Option<Arc<CacheEntry>> {
        self.entry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn read_settings(&self) -> std::sync::RwLockReadGuard<'_, Settings> {
        self.settings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_settings(&self) -> std::sync::RwLockWriteGuard<'_, Settings> {
        self.settings.write().unwrap_or_else(PoisonError::into_inner)
    }
}
