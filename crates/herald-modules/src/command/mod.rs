//! Command modules: named handlers reachable from interaction surfaces.
//!
//! A command declares which surfaces it is reachable from (chat input, a
//! context menu, or both) and where it is deployed. The registry tags each
//! registered command with the concrete [`CommandType`] it answers to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HandlerError, ValidationError};
use crate::handlers::CommandHandler;
use crate::interaction::Interaction;
use crate::outcome::ModuleKind;

/// Application command type identifiers understood by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    /// Slash command typed into the chat input.
    ChatInput,
    /// Context-menu entry on a user.
    User,
    /// Context-menu entry on a message.
    Message,
}

impl CommandType {
    /// Returns the numeric identifier used on the wire.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::ChatInput => 1,
            Self::User => 2,
            Self::Message => 3,
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChatInput => "chat_input",
            Self::User => "user",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context-menu surfaces a command can appear on.
///
/// Each kind maps to its own [`CommandType`]: `User` to 2 and `Message` to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMenuKind {
    /// Menu shown on a user.
    User,
    /// Menu shown on a message.
    Message,
}

impl ContextMenuKind {
    /// Command type a command registered for this menu answers to.
    #[must_use]
    pub const fn command_type(self) -> CommandType {
        match self {
            Self::User => CommandType::User,
            Self::Message => CommandType::Message,
        }
    }
}

/// Where a command is deployed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deployment {
    /// Available in every guild and in direct messages.
    #[default]
    Global,
    /// Restricted to the bot's home guild.
    Guild,
    /// Restricted to the development guild.
    Dev,
}

impl Deployment {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Guild => "guild",
            Self::Dev => "dev",
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Surfaces a command is reachable from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionSurfaces {
    #[serde(default)]
    chat_input: bool,
    #[serde(default)]
    context_menu: Option<ContextMenuKind>,
}

impl InteractionSurfaces {
    /// Chat input only.
    #[must_use]
    pub const fn chat_input() -> Self {
        Self {
            chat_input: true,
            context_menu: None,
        }
    }

    /// A context menu only.
    #[must_use]
    pub const fn context_menu(kind: ContextMenuKind) -> Self {
        Self {
            chat_input: false,
            context_menu: Some(kind),
        }
    }

    /// Adds a context menu to the current surfaces.
    #[must_use]
    pub const fn with_context_menu(mut self, kind: ContextMenuKind) -> Self {
        self.context_menu = Some(kind);
        self
    }

    /// Whether the chat-input surface is enabled.
    #[must_use]
    pub const fn chat_input_enabled(&self) -> bool {
        self.chat_input
    }

    /// The context menu the command appears on, if any.
    #[must_use]
    pub const fn context_menu_kind(&self) -> Option<ContextMenuKind> {
        self.context_menu
    }

    /// Whether at least one surface is enabled.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.chat_input || self.context_menu.is_some()
    }
}

/// Declarative part of a command module, as written in the module file.
///
/// # Example
///
/// ```
/// use herald_modules::{CommandData, Deployment, InteractionSurfaces};
///
/// let data: CommandData = serde_json::from_str(r#"{
///     "name": "ping",
///     "types": { "chat_input": true },
///     "handler": "ping"
/// }"#)?;
///
/// assert_eq!(data.name(), Some("ping"));
/// assert_eq!(data.types(), InteractionSurfaces::chat_input());
/// assert_eq!(data.deployment(), Deployment::Global);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandData {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    types: InteractionSurfaces,
    #[serde(default)]
    deployment: Deployment,
    #[serde(default)]
    handler: Option<String>,
    #[serde(skip)]
    command_type: Option<CommandType>,
}

impl CommandData {
    /// Creates command data with a name and no surfaces.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the interaction surfaces.
    #[must_use]
    pub const fn with_types(mut self, types: InteractionSurfaces) -> Self {
        self.types = types;
        self
    }

    /// Sets the deployment scope.
    #[must_use]
    pub const fn with_deployment(mut self, deployment: Deployment) -> Self {
        self.deployment = deployment;
        self
    }

    /// Declares the handler identifier.
    #[must_use]
    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the declared name when it is not blank.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the interaction surfaces.
    #[must_use]
    pub const fn types(&self) -> InteractionSurfaces {
        self.types
    }

    /// Returns the deployment scope.
    #[must_use]
    pub const fn deployment(&self) -> Deployment {
        self.deployment
    }

    /// Returns the declared handler identifier.
    #[must_use]
    pub fn handler(&self) -> Option<&str> {
        self.handler.as_deref()
    }

    /// Returns the surface tag assigned at registration.
    #[must_use]
    pub const fn command_type(&self) -> Option<CommandType> {
        self.command_type
    }
}

/// A command bound to its handler.
pub struct CommandModule<C> {
    data: CommandData,
    handler: Option<CommandHandler<C>>,
}

impl<C> CommandModule<C> {
    /// Combines declarative data with the bound handler, if any.
    #[must_use]
    pub const fn new(data: CommandData, handler: Option<CommandHandler<C>>) -> Self {
        Self { data, handler }
    }

    /// Returns the declarative data.
    #[must_use]
    pub const fn data(&self) -> &CommandData {
        &self.data
    }

    /// Returns the declared name when it is not blank.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.data.name()
    }

    /// Returns the deployment scope.
    #[must_use]
    pub const fn deployment(&self) -> Deployment {
        self.data.deployment
    }

    /// Returns the surface tag assigned at registration.
    #[must_use]
    pub const fn command_type(&self) -> Option<CommandType> {
        self.data.command_type
    }

    /// Returns the bound handler.
    #[must_use]
    pub const fn handler(&self) -> Option<&CommandHandler<C>> {
        self.handler.as_ref()
    }

    pub(crate) const fn set_command_type(&mut self, command_type: CommandType) {
        self.data.command_type = Some(command_type);
    }

    /// Checks the properties required for registration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: a missing name, no
    /// enabled surface, or no bound handler.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let Some(name) = self.name() else {
            return Err(ValidationError::MissingName {
                kind: ModuleKind::Command,
            });
        };
        if !self.data.types.any() {
            return Err(ValidationError::NoInteractionSurface {
                name: name.to_owned(),
            });
        }
        if self.handler.is_none() {
            return Err(match self.data.handler() {
                Some(handler) => ValidationError::UnboundHandler {
                    handler: handler.to_owned(),
                },
                None => ValidationError::MissingHandler {
                    kind: ModuleKind::Command,
                    name: name.to_owned(),
                },
            });
        }
        Ok(())
    }

    /// Returns `true` when [`Self::validate`] succeeds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Runs the bound handler.
    ///
    /// # Errors
    ///
    /// Returns the handler's error, or a [`HandlerError`] when no handler is
    /// bound.
    pub fn execute(&self, context: &C, interaction: &Interaction) -> Result<(), HandlerError> {
        match &self.handler {
            Some(handler) => handler(context, interaction),
            None => Err(HandlerError::new(format!(
                "command '{}' has no bound handler",
                interaction.command_name()
            ))),
        }
    }
}

impl<C> Clone for CommandModule<C> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<C> fmt::Debug for CommandModule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandModule")
            .field("data", &self.data)
            .field("handler_bound", &self.handler.is_some())
            .finish()
    }
}
