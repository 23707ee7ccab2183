use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Directory scanned for bot data and module files when none is configured.
pub const DEFAULT_ROOT_DIRECTORY: &str = "bot";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default root directory as an owned path.
#[must_use]
pub fn default_root_directory() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_ROOT_DIRECTORY)
}

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
