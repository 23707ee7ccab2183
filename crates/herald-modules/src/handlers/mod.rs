//! Handler binding for declared module handlers.
//!
//! Module files name their handler by identifier; the callable itself is
//! supplied by the application through a [`HandlerResolver`]. Binding happens
//! during classification, so a module whose identifier is unknown reaches
//! validation without a handler and is rejected there.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::HandlerError;
use crate::interaction::Interaction;

/// Callable executed when an interaction resolves to a command.
pub type CommandHandler<C> =
    Arc<dyn Fn(&C, &Interaction) -> Result<(), HandlerError> + Send + Sync>;

/// Callable executed when the client emits an event.
///
/// The handler receives the owning application context followed by the
/// event-specific arguments.
pub type EventHandler<C> = Arc<dyn Fn(&C, &[Value]) -> Result<(), HandlerError> + Send + Sync>;

/// Resolves handler identifiers declared by module files.
pub trait HandlerResolver<C> {
    /// Returns the command handler registered under `id`.
    fn command(&self, id: &str) -> Option<CommandHandler<C>>;

    /// Returns the event handler registered under `id`.
    fn event(&self, id: &str) -> Option<EventHandler<C>>;
}

/// In-memory handler table populated by the application.
///
/// # Example
///
/// ```
/// use herald_modules::{HandlerCatalog, HandlerResolver};
///
/// let handlers: HandlerCatalog<()> = HandlerCatalog::new()
///     .with_command("ping", |_bot, _interaction| Ok(()))
///     .with_event("log-ready", |_bot, _args| Ok(()));
///
/// assert!(handlers.command("ping").is_some());
/// assert!(handlers.event("ping").is_none());
/// ```
pub struct HandlerCatalog<C> {
    commands: HashMap<String, CommandHandler<C>>,
    events: HashMap<String, EventHandler<C>>,
}

impl<C> HandlerCatalog<C> {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            events: HashMap::new(),
        }
    }

    /// Registers a command handler, replacing any handler with the same id.
    pub fn insert_command<F>(&mut self, id: impl Into<String>, handler: F)
    where
        F: Fn(&C, &Interaction) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.commands.insert(id.into(), Arc::new(handler));
    }

    /// Registers an event handler, replacing any handler with the same id.
    pub fn insert_event<F>(&mut self, id: impl Into<String>, handler: F)
    where
        F: Fn(&C, &[Value]) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.events.insert(id.into(), Arc::new(handler));
    }

    /// Builder form of [`Self::insert_command`].
    #[must_use]
    pub fn with_command<F>(mut self, id: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&C, &Interaction) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.insert_command(id, handler);
        self
    }

    /// Builder form of [`Self::insert_event`].
    #[must_use]
    pub fn with_event<F>(mut self, id: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&C, &[Value]) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.insert_event(id, handler);
        self
    }
}

impl<C> Default for HandlerCatalog<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for HandlerCatalog<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut commands: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        let mut events: Vec<&str> = self.events.keys().map(String::as_str).collect();
        commands.sort_unstable();
        events.sort_unstable();
        f.debug_struct("HandlerCatalog")
            .field("commands", &commands)
            .field("events", &events)
            .finish()
    }
}

impl<C> HandlerResolver<C> for HandlerCatalog<C> {
    fn command(&self, id: &str) -> Option<CommandHandler<C>> {
        self.commands.get(id).cloned()
    }

    fn event(&self, id: &str) -> Option<EventHandler<C>> {
        self.events.get(id).cloned()
    }
}

/// Resolver that binds a no-op handler to every declared identifier.
///
/// Used to check module files without the application code that normally
/// supplies the handlers: a module still fails validation when it declares
/// no handler at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclaredHandlers;

impl<C: 'static> HandlerResolver<C> for DeclaredHandlers {
    fn command(&self, _id: &str) -> Option<CommandHandler<C>> {
        Some(Arc::new(accept_interaction::<C>))
    }

    fn event(&self, _id: &str) -> Option<EventHandler<C>> {
        Some(Arc::new(accept_event::<C>))
    }
}

fn accept_interaction<C>(_: &C, _: &Interaction) -> Result<(), HandlerError> {
    Ok(())
}

fn accept_event<C>(_: &C, _: &[Value]) -> Result<(), HandlerError> {
    Ok(())
}
