//! Module discovery and dispatch registration for Herald bots.
//!
//! A bot is assembled from small JSON module files that live under a root
//! directory. Each file declares either a **command** (resolved by name when
//! an interaction arrives) or an **event** listener (invoked whenever the
//! client emits the named event). This crate turns a set of such files into
//! live dispatch-table entries and a structured outcome log.
//!
//! # Architecture
//!
//! The [`Discovery`] loop drives the pipeline one path at a time:
//!
//! 1. a [`PathCatalog`] supplies the candidate paths, filtered to those
//!    containing the `commands` or `events` namespace marker;
//! 2. a [`ModuleLoader`] turns each path into the value the file exports;
//! 3. [`classify`] decides whether the export is a command, an event, or
//!    unrecognised, binding declared handlers through a [`HandlerResolver`];
//! 4. the module validates itself and, when valid, the [`Registrar`] installs
//!    it into the [`Registry`] or attaches it to an [`EventEmitter`];
//! 5. every path produces exactly one [`OutcomeRecord`], and the full ordered
//!    set is handed to an [`OutcomeSink`] once the loop finishes.
//!
//! # Example
//!
//! ```
//! use herald_modules::{CommandData, CommandModule, InteractionSurfaces, Registry};
//!
//! let data = CommandData::named("ping").with_types(InteractionSurfaces::chat_input());
//! let command: CommandModule<()> = CommandModule::new(data, None);
//! assert!(!command.is_valid(), "a command without a handler is rejected");
//!
//! let registry: Registry<()> = Registry::new();
//! assert!(registry.is_empty());
//! ```

pub mod catalog;
pub mod classify;
pub mod command;
pub mod discovery;
pub mod emitter;
pub mod error;
pub mod event;
pub mod handlers;
pub mod interaction;
pub mod loader;
pub mod outcome;
pub mod registry;

#[cfg(test)]
mod tests;

pub use self::catalog::{DirectoryCatalog, ModulePath, PathCatalog};
pub use self::classify::{ClassifiedModule, classify};
pub use self::command::{
    CommandData, CommandModule, CommandType, ContextMenuKind, Deployment, InteractionSurfaces,
};
pub use self::discovery::Discovery;
pub use self::emitter::{ClientEvent, EventBus, EventEmitter, Listener};
pub use self::error::{ClassificationError, HandlerError, ModuleError, ValidationError};
pub use self::event::{EventData, EventModule};
pub use self::handlers::{
    CommandHandler, DeclaredHandlers, EventHandler, HandlerCatalog, HandlerResolver,
};
pub use self::interaction::Interaction;
pub use self::loader::{JsonModuleLoader, ModuleLoader};
pub use self::outcome::{
    ModuleKind, OutcomeRecord, OutcomeRecorder, OutcomeSink, OutcomeSummary, RecordState,
    TracingOutcomeSink, render_table,
};
pub use self::registry::{Registrar, Registry};
