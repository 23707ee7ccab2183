//! Path catalogs enumerate the files a bot is assembled from.
//!
//! The [`PathCatalog`] trait is the seam between the engine and the file
//! system. [`DirectoryCatalog`] walks its roots once, eagerly, and keeps the
//! discovered paths sorted so every discovery pass sees the same order.

use std::fs;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::ModuleError;

/// A file known to a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModulePath {
    full_path: Utf8PathBuf,
}

impl ModulePath {
    /// Wraps a path.
    #[must_use]
    pub fn new(full_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            full_path: full_path.into(),
        }
    }

    /// Returns the full path of the file.
    #[must_use]
    pub fn full_path(&self) -> &Utf8Path {
        self.full_path.as_path()
    }

    /// Returns the file name without its extension.
    #[must_use]
    pub fn file_stem(&self) -> Option<&str> {
        self.full_path.file_stem()
    }

    fn depth(&self) -> usize {
        self.full_path.components().count()
    }
}

impl From<&str> for ModulePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Source of the file paths a bot is assembled from.
pub trait PathCatalog {
    /// Looks up a single file by its stem, e.g. `info` for `config/info.json`.
    ///
    /// When several files share the stem, the one closest to a root wins.
    fn find_by_name(&self, name: &str) -> Option<ModulePath>;

    /// Returns every known path, or `None` when nothing was catalogued.
    fn all_paths(&self) -> Option<Vec<ModulePath>>;
}

/// Catalog built by recursively walking one or more root directories.
///
/// # Example
///
/// ```no_run
/// use camino::Utf8PathBuf;
/// use herald_modules::{DirectoryCatalog, PathCatalog};
///
/// let catalog = DirectoryCatalog::scan(&[Utf8PathBuf::from("bot")])?;
/// let info = catalog.find_by_name("info");
/// # Ok::<(), herald_modules::ModuleError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirectoryCatalog {
    paths: Option<Vec<ModulePath>>,
}

impl DirectoryCatalog {
    /// Walks every root and records the files found beneath them.
    ///
    /// Roots that do not exist are skipped. When no root exists the catalog
    /// reports no path set at all.
    ///
    /// # Errors
    ///
    /// Returns [`ModuleError::Io`] when an existing directory cannot be read.
    pub fn scan(roots: &[Utf8PathBuf]) -> Result<Self, ModuleError> {
        let mut paths = Vec::new();
        let mut scanned_any = false;
        for root in roots {
            if !root.is_dir() {
                tracing::warn!(
                    target: "herald_modules::catalog",
                    root = %root,
                    "root directory does not exist; skipping"
                );
                continue;
            }
            scanned_any = true;
            walk(root, &mut paths)?;
        }
        paths.sort();
        tracing::debug!(
            target: "herald_modules::catalog",
            count = paths.len(),
            "catalogued files"
        );
        Ok(Self {
            paths: scanned_any.then_some(paths),
        })
    }

    /// Builds a catalog from an explicit list of paths, preserving order.
    #[must_use]
    pub const fn from_paths(paths: Vec<ModulePath>) -> Self {
        Self { paths: Some(paths) }
    }
}

impl PathCatalog for DirectoryCatalog {
    fn find_by_name(&self, name: &str) -> Option<ModulePath> {
        self.paths
            .as_ref()?
            .iter()
            .filter(|path| path.file_stem() == Some(name))
            .min_by_key(|path| path.depth())
            .cloned()
    }

    fn all_paths(&self) -> Option<Vec<ModulePath>> {
        self.paths.clone()
    }
}

fn walk(dir: &Utf8Path, paths: &mut Vec<ModulePath>) -> Result<(), ModuleError> {
    let io_error = |source: std::io::Error| ModuleError::Io {
        path: dir.to_path_buf(),
        source: Arc::new(source),
    };
    for listed in fs::read_dir(dir).map_err(io_error)? {
        let entry = listed.map_err(io_error)?;
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.path()) else {
            tracing::warn!(
                target: "herald_modules::catalog",
                path = %entry.path().display(),
                "skipping non UTF-8 path"
            );
            continue;
        };
        if entry.file_type().map_err(io_error)?.is_dir() {
            walk(&path, paths)?;
        } else {
            paths.push(ModulePath::new(path));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
