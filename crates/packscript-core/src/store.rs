//! Artifact store boundary.
//!
//! Every artifact the compiler produces goes through [`ArtifactStore`], which
//! separates where pack content lives from how pack content is compiled.
//! Production drivers use [`FsStore`] rooted at the output directory; tests
//! and tooling use [`MemStore`], which captures writes in memory.
//!
//! Stores distinguish two steps in an artifact's life:
//!
//! - `set_contents` stages the artifact's current text
//! - `confirm` ensures the artifact exists in the backing medium even when no
//!   contents were ever staged (an empty hook file is still a valid hook file)

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::StoreError;

/// Abstraction over the medium holding compiled artifacts.
pub trait ArtifactStore {
    /// Read an artifact's current contents, if it exists and is readable.
    fn contents(&self, path: &Path) -> Option<String>;

    /// Stage the artifact's contents, replacing any previous text.
    fn set_contents(&mut self, path: &Path, text: &str) -> Result<(), StoreError>;

    /// Ensure the artifact exists in the backing medium.
    ///
    /// Contents staged earlier are preserved; an artifact never written to
    /// materializes empty.
    fn confirm(&mut self, path: &Path) -> Result<(), StoreError>;
}

// ============================================================================
// Filesystem store
// ============================================================================

/// Filesystem-backed artifact store.
///
/// Relative artifact paths resolve under the store's root directory. Parent
/// directories are created on demand.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parent(full: &Path, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

impl ArtifactStore for FsStore {
    fn contents(&self, path: &Path) -> Option<String> {
        fs::read_to_string(self.resolve(path)).ok()
    }

    fn set_contents(&mut self, path: &Path, text: &str) -> Result<(), StoreError> {
        let full = self.resolve(path);
        Self::ensure_parent(&full, path)?;
        fs::write(&full, text).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn confirm(&mut self, path: &Path) -> Result<(), StoreError> {
        let full = self.resolve(path);
        if full.exists() {
            return Ok(());
        }
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Materialize {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full)
            .map(|_| ())
            .map_err(|source| StoreError::Materialize {
                path: path.to_path_buf(),
                source,
            })
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-memory artifact store for tests and dry runs.
///
/// Captures staged contents and confirmations without touching the
/// filesystem, and exposes them for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    files: FxHashMap<PathBuf, String>,
    confirmed: FxHashSet<PathBuf>,
}

impl MemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload an artifact, as if a previous run had written it.
    pub fn preload(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    /// Inspect an artifact's staged contents.
    pub fn written(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Check whether an artifact was confirmed.
    pub fn is_confirmed(&self, path: &Path) -> bool {
        self.confirmed.contains(path)
    }

    /// Number of artifacts holding staged contents.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check whether no artifact holds staged contents.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over staged artifact paths.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }
}

impl ArtifactStore for MemStore {
    fn contents(&self, path: &Path) -> Option<String> {
        self.files.get(path).cloned()
    }

    fn set_contents(&mut self, path: &Path, text: &str) -> Result<(), StoreError> {
        self.files.insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    fn confirm(&mut self, path: &Path) -> Result<(), StoreError> {
        self.confirmed.insert(path.to_path_buf());
        Ok(())
    }
}
