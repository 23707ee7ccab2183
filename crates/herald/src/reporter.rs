//! Structured reporting of startup lifecycle events.

use std::sync::Arc;

use herald_config::Config;
use herald_modules::OutcomeSummary;

use crate::data::BotInfo;
use crate::error::StartupError;

/// Observer notified as startup progresses.
pub trait StartupReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked once configuration and telemetry are ready.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked after a data file was looked up; `loaded` is `false` when the
    /// file exported nothing and defaults were kept.
    fn data_retrieved(&self, name: &str, loaded: bool);

    /// Invoked after the discovery pass with its totals.
    fn modules_registered(&self, summary: &OutcomeSummary);

    /// Invoked after the gateway accepted the login.
    fn login_succeeded(&self, info: &BotInfo);

    /// Invoked when any startup stage fails.
    fn startup_failed(&self, error: &StartupError);
}

impl<T> StartupReporter for Arc<T>
where
    T: StartupReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn data_retrieved(&self, name: &str, loaded: bool) {
        (**self).data_retrieved(name, loaded);
    }

    fn modules_registered(&self, summary: &OutcomeSummary) {
        (**self).modules_registered(summary);
    }

    fn login_succeeded(&self, info: &BotInfo) {
        (**self).login_succeeded(info);
    }

    fn startup_failed(&self, error: &StartupError) {
        (**self).startup_failed(error);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredStartupReporter;

impl StructuredStartupReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl StartupReporter for StructuredStartupReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: "herald::startup",
            event = "bootstrap_starting",
            "starting bot bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: "herald::startup",
            event = "bootstrap_succeeded",
            root = %config.root_directory(),
            log_filter = %config.log_filter(),
            log_format = %config.log_format(),
            "bot bootstrap completed"
        );
    }

    fn data_retrieved(&self, name: &str, loaded: bool) {
        tracing::info!(
            target: "herald::startup",
            event = "data_retrieved",
            name,
            loaded,
            "bot data retrieved"
        );
    }

    fn modules_registered(&self, summary: &OutcomeSummary) {
        tracing::info!(
            target: "herald::startup",
            event = "modules_registered",
            success = summary.success,
            fail = summary.fail,
            error = summary.error,
            "{summary}"
        );
    }

    fn login_succeeded(&self, info: &BotInfo) {
        tracing::info!(
            target: "herald::startup",
            event = "login_succeeded",
            client_id = %info.client_id,
            "logged in"
        );
    }

    fn startup_failed(&self, error: &StartupError) {
        tracing::error!(
            target: "herald::startup",
            event = "startup_failed",
            error = %error,
            "bot startup failed"
        );
    }
}
