//! Command table and the registrar that wires validated modules into it.
//!
//! Commands are keyed by name. A command enabled for both chat input and a
//! context menu is inserted twice under the same key: the context-menu entry
//! is written last and replaces the chat-input entry. Event modules are never
//! stored here; they become listeners on an [`EventEmitter`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::command::{CommandModule, CommandType};
use crate::emitter::{EventEmitter, Listener};
use crate::event::EventModule;

/// Name-keyed table of registered commands.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use herald_modules::{
///     CommandData, CommandModule, CommandType, Interaction, InteractionSurfaces, Registry,
/// };
///
/// let ping = CommandModule::new(
///     CommandData::named("ping").with_types(InteractionSurfaces::chat_input()),
///     Some(Arc::new(|_: &(), _: &Interaction| Ok(()))),
/// );
///
/// let mut registry = Registry::new();
/// registry.register_command(&ping);
///
/// assert_eq!(
///     registry.get("ping").and_then(CommandModule::command_type),
///     Some(CommandType::ChatInput)
/// );
/// ```
pub struct Registry<C> {
    commands: HashMap<String, CommandModule<C>>,
}

impl<C> Registry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Inserts `command` once per enabled surface, tagging each entry with
    /// the matching [`CommandType`].
    pub fn register_command(&mut self, command: &CommandModule<C>) {
        let Some(name) = command.name() else {
            warn!(
                target: "herald_modules::registry",
                "refusing to register a command without a name"
            );
            return;
        };
        let key = name.to_owned();
        let surfaces = command.data().types();

        if surfaces.chat_input_enabled() {
            let mut entry = command.clone();
            entry.set_command_type(CommandType::ChatInput);
            self.commands.insert(key.clone(), entry);
        }
        if let Some(kind) = surfaces.context_menu_kind() {
            let mut entry = command.clone();
            entry.set_command_type(kind.command_type());
            self.commands.insert(key, entry);
        }
    }

    /// Returns the command registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandModule<C>> {
        self.commands.get(name)
    }

    /// Whether a command is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Number of registered command names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when no command is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered command names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.names())
            .finish()
    }
}

/// Writes validated modules into a registry and an event emitter.
pub struct Registrar<'a, C, E> {
    registry: &'a mut Registry<C>,
    emitter: &'a mut E,
}

impl<'a, C, E> Registrar<'a, C, E>
where
    E: EventEmitter<C>,
{
    /// Borrows the command table and the emitter for the duration of a pass.
    #[must_use]
    pub const fn new(registry: &'a mut Registry<C>, emitter: &'a mut E) -> Self {
        Self { registry, emitter }
    }

    /// Registers `command` in the command table.
    pub fn register_command(&mut self, command: &CommandModule<C>) {
        self.registry.register_command(command);
    }

    /// Attaches a listener for `event` that forwards the application context
    /// and event arguments to the module handler.
    ///
    /// Every call adds a new listener, even for an event already listened to.
    pub fn register_event(&mut self, event: &EventModule<C>) {
        let (Some(client_event), Some(handler)) = (event.event(), event.handler()) else {
            warn!(
                target: "herald_modules::registry",
                name = event.name().unwrap_or_default(),
                "refusing to register an event without a known name and a bound handler"
            );
            return;
        };
        let listener: Listener<C> = Arc::clone(handler);
        self.emitter.on(client_event, listener);
    }
}

impl<C, E> fmt::Debug for Registrar<'_, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registrar")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
