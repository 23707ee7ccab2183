//! Application root for Herald bots.
//!
//! The crate ties the module engine in [`herald_modules`] to a running bot.
//! [`bootstrap_with`] loads configuration through [`herald_config`],
//! initialises structured telemetry and catalogues the bot directory.
//! [`Startup::prepare`] then reads the bot data files, runs module discovery
//! and attaches the core listeners, yielding a [`Session`] that can log in
//! through any [`Gateway`].
//!
//! Lifecycle events are reported to a [`StartupReporter`] so operators can
//! see which stage failed; [`StructuredStartupReporter`] writes them as
//! `tracing` events under the `herald::startup` target.

mod bootstrap;
mod bot;
mod data;
mod error;
mod gateway;
mod reporter;
mod startup;
mod telemetry;

pub use bootstrap::{
    ConfigLoader, Launch, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use bot::{Bot, DispatchError};
pub use data::{BotInfo, BotStyle, BotVars, INFO_FILE, STYLE_FILE, VARS_FILE};
pub use error::StartupError;
pub use gateway::{Gateway, GatewayError, LocalGateway};
pub use reporter::{StartupReporter, StructuredStartupReporter};
pub use startup::{Session, Startup};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
