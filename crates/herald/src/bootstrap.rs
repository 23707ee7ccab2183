//! Process bootstrap: configuration, telemetry and the on-disk catalog.

use std::sync::Arc;

use herald_config::Config;
use herald_modules::DirectoryCatalog;
use ortho_config::OrthoError;

use crate::error::StartupError;
use crate::reporter::StartupReporter;
use crate::telemetry::{self, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the bot configuration.
    ///
    /// # Errors
    ///
    /// Returns the aggregated `ortho_config` error.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Result of a successful bootstrap.
#[derive(Debug)]
pub struct Launch {
    config: Config,
    catalog: DirectoryCatalog,
    telemetry: TelemetryHandle,
}

impl Launch {
    /// Resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Catalog of every file beneath the configured root directory.
    #[must_use]
    pub const fn catalog(&self) -> &DirectoryCatalog {
        &self.catalog
    }

    /// Telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }
}

/// Loads configuration, initialises telemetry and catalogues the root
/// directory.
///
/// # Errors
///
/// Returns [`StartupError::Configuration`], [`StartupError::Telemetry`] or
/// [`StartupError::Catalog`] for the stage that failed. The reporter is told
/// about the failure before it is returned.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: &dyn StartupReporter,
) -> Result<Launch, StartupError> {
    reporter.bootstrap_starting();
    let outcome = bootstrap_stages(loader);
    match &outcome {
        Ok(launch) => reporter.bootstrap_succeeded(launch.config()),
        Err(error) => reporter.startup_failed(error),
    }
    outcome
}

fn bootstrap_stages(loader: &dyn ConfigLoader) -> Result<Launch, StartupError> {
    let config = loader
        .load()
        .map_err(|source| StartupError::Configuration { source })?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| StartupError::Telemetry { source })?;
    let catalog = DirectoryCatalog::scan(&[config.root_directory().to_path_buf()])
        .map_err(|source| StartupError::Catalog { source })?;
    Ok(Launch {
        config,
        catalog,
        telemetry,
    })
}
