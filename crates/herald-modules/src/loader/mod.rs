//! Loaders turn a catalogued path into the value the file exports.
//!
//! Loading is the only suspension point of the discovery loop. A loader
//! reports "nothing usable" as `Ok(None)` so the engine can record the file
//! and move on; an `Err` is an infrastructure failure the engine does not
//! contain.

use std::future::Future;
use std::sync::Arc;

use camino::Utf8Path;
use serde_json::Value;

use crate::error::ModuleError;

/// Asynchronously imports the export of a module file.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use herald_modules::{ModuleError, ModuleLoader};
/// use serde_json::{Value, json};
///
/// struct FixedLoader;
///
/// impl ModuleLoader for FixedLoader {
///     async fn import_file(&self, _path: &Utf8Path) -> Result<Option<Value>, ModuleError> {
///         Ok(Some(json!({ "event": { "name": "ready", "handler": "log" } })))
///     }
/// }
/// ```
pub trait ModuleLoader {
    /// Imports the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ModuleError`] only for failures that should abort startup.
    fn import_file(
        &self,
        path: &Utf8Path,
    ) -> impl Future<Output = Result<Option<Value>, ModuleError>>;
}

/// Loader for JSON module files.
///
/// Empty files, files that are not UTF-8, and files that do not parse as JSON
/// resolve to `Ok(None)`. Failing to read the file at all is an error.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonModuleLoader;

impl JsonModuleLoader {
    /// Creates a loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ModuleLoader for JsonModuleLoader {
    async fn import_file(&self, path: &Utf8Path) -> Result<Option<Value>, ModuleError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ModuleError::Io {
                path: path.to_path_buf(),
                source: Arc::new(source),
            })?;

        let Ok(text) = String::from_utf8(bytes) else {
            tracing::warn!(
                target: "herald_modules::loader",
                path = %path,
                "module file is not valid UTF-8"
            );
            return Ok(None);
        };

        if text.trim().is_empty() {
            tracing::debug!(
                target: "herald_modules::loader",
                path = %path,
                "module file is empty"
            );
            return Ok(None);
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                tracing::warn!(
                    target: "herald_modules::loader",
                    path = %path,
                    error = %error,
                    "module file is not valid JSON"
                );
                Ok(None)
            }
        }
    }
}
