//! File system access used by the locator and the translation store.
//!
//! Everything that touches the disk goes through [`FileSystem`] so the store
//! can be exercised deterministically with [`MemoryFileSystem`].

use std::{
    collections::{BTreeMap, HashSet},
    fs, io,
    path::{Path, PathBuf},
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use tracing::debug;
use walkdir::WalkDir;

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Find the first file named exactly `file_name` under any of `roots`.
    ///
    /// Directories whose name is listed in `excluded_dirs` are not descended into.
    /// Roots are searched in order; within a root the walk is depth-first with
    /// entries sorted by name, so the result is stable across runs.
    fn find_file(
        &self,
        roots: &[PathBuf],
        file_name: &str,
        excluded_dirs: &[String],
    ) -> Option<PathBuf>;
}

/// The real file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn find_file(
        &self,
        roots: &[PathBuf],
        file_name: &str,
        excluded_dirs: &[String],
    ) -> Option<PathBuf> {
        for root in roots {
            let walker = WalkDir::new(root)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| {
                    // Never prune the root itself, even if it happens to be named like an excluded dir.
                    entry.depth() == 0
                        || !entry.file_type().is_dir()
                        || !is_excluded(entry.file_name().to_str(), excluded_dirs)
                });

            for entry in walker {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        debug!(error = %e, "skipping unreadable path during search");
                        continue;
                    }
                };
                if entry.file_type().is_file() && entry.file_name().to_str() == Some(file_name) {
                    return Some(entry.into_path());
                }
            }
        }
        None
    }
}

fn is_excluded(name: Option<&str>, excluded_dirs: &[String]) -> bool {
    name.is_some_and(|name| excluded_dirs.iter().any(|dir| dir == name))
}

/// An in-memory file system that counts reads.
///
/// Useful for tests and for embedding the store where translations do not live
/// on disk.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
    unreadable: Mutex<HashSet<PathBuf>>,
    reads: AtomicUsize,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let fs = Self::new();
        fs.write(path, content);
        fs
    }

    pub fn write(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), content.into());
    }

    pub fn remove(&self, path: &Path) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
    }

    /// Make reads of `path` fail with `PermissionDenied` while it still "exists".
    pub fn deny_read(&self, path: impl Into<PathBuf>) {
        self.unreadable
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into());
    }

    /// Number of successful and failed `read_to_string` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        if self
            .unreadable
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
        {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }

        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such file: {}", path.display()),
                )
            })
    }

    fn find_file(
        &self,
        roots: &[PathBuf],
        file_name: &str,
        excluded_dirs: &[String],
    ) -> Option<PathBuf> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        roots.iter().find_map(|root| {
            files
                .keys()
                .filter_map(|path| path.strip_prefix(root).ok().map(|rel| (path, rel)))
                .find(|(path, rel)| {
                    path.file_name().and_then(|n| n.to_str()) == Some(file_name)
                        && !rel
                            .parent()
                            .into_iter()
                            .flat_map(Path::components)
                            .any(|c| is_excluded(c.as_os_str().to_str(), excluded_dirs))
                })
                .map(|(path, _)| path.clone())
        })
    }
}
