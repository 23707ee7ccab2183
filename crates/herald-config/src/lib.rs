//! Shared runtime configuration for Herald.
//!
//! [`Config`] is layered by `ortho_config`: compiled defaults, then an
//! optional configuration file (`--config-path` or `HERALD_CONFIG_PATH`),
//! then `HERALD_*` environment variables, then command-line flags. The
//! namespace markers used to recognise module files are not configurable;
//! they live in `herald-modules`.

mod defaults;
mod logging;

use std::ffi::OsString;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_ROOT_DIRECTORY, default_log_filter, default_log_filter_string,
    default_log_format, default_root_directory,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration consumed by the `herald` binary and library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HERALD")]
pub struct Config {
    /// Directory holding the bot data files and the module tree.
    #[serde(default = "default_root_directory")]
    #[ortho_config(default = default_root_directory())]
    pub root_directory: Utf8PathBuf,
    /// `tracing` filter expression, e.g. `info` or `herald_modules=debug`.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format of the telemetry subscriber.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Credential handed to the gateway at login.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_directory: default_root_directory(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            token: None,
        }
    }
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns the aggregated `ortho_config` error when any layer fails to
    /// parse.
    pub fn load() -> Result<Self, Arc<OrthoError>> {
        <Self as OrthoConfig>::load()
    }

    /// Loads configuration from an explicit argument iterator.
    ///
    /// The first item is treated as the binary name, mirroring
    /// [`std::env::args_os`].
    ///
    /// # Errors
    ///
    /// Returns the aggregated `ortho_config` error when any layer fails to
    /// parse.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, Arc<OrthoError>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as OrthoConfig>::load_from_iter(args)
    }

    /// Directory holding the bot data files and the module tree.
    #[must_use]
    pub fn root_directory(&self) -> &Utf8Path {
        self.root_directory.as_path()
    }

    /// Configured `tracing` filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Configured telemetry output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Login credential, when one was supplied.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.trim().is_empty())
    }
}
