//! Errors that abort bot startup.

use std::sync::Arc;

use herald_modules::ModuleError;
use ortho_config::OrthoError;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::telemetry::TelemetryError;

/// Errors surfaced while bootstrapping, preparing, or logging in.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The root directory could not be catalogued.
    #[error("failed to catalogue the bot directory: {source}")]
    Catalog {
        /// Underlying walk error.
        #[source]
        source: ModuleError,
    },
    /// A required data file is absent from the catalog.
    #[error("required bot data is missing: {source}")]
    MissingData {
        /// Lookup failure naming the file.
        #[source]
        source: ModuleError,
    },
    /// A data file could not be read.
    #[error("failed to load bot data '{name}': {source}")]
    LoadData {
        /// Catalog name of the data file.
        name: String,
        /// Underlying loader error.
        #[source]
        source: ModuleError,
    },
    /// A data file does not have the expected shape.
    #[error("bot data '{name}' is invalid: {source}")]
    InvalidData {
        /// Catalog name of the data file.
        name: String,
        /// Deserialisation failure.
        #[source]
        source: serde_json::Error,
    },
    /// Module discovery hit an infrastructure failure.
    #[error("module discovery failed: {source}")]
    Discovery {
        /// Underlying engine error.
        #[source]
        source: ModuleError,
    },
    /// The async runtime could not be started.
    #[error("failed to start the async runtime: {source}")]
    Runtime {
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
    /// No login credential was configured.
    #[error("no token is configured; set HERALD_TOKEN or pass --token")]
    MissingToken,
    /// The gateway refused the login.
    #[error("login failed: {source}")]
    Login {
        /// Gateway failure.
        #[source]
        source: GatewayError,
    },
}
