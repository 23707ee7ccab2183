//! Incoming interaction payloads resolved against the command table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::CommandType;

/// A user-initiated interaction targeting a registered command.
///
/// Interactions arrive as the first argument of the `interactionCreate`
/// client event and deserialise from JSON:
///
/// ```
/// use herald_modules::{CommandType, Interaction};
/// use serde_json::json;
///
/// let interaction: Interaction = serde_json::from_value(json!({
///     "command_name": "ping",
///     "user_id": "42"
/// }))?;
/// assert_eq!(interaction.command_name(), "ping");
/// assert_eq!(interaction.command_type(), CommandType::ChatInput);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    command_name: String,
    #[serde(default = "default_command_type")]
    command_type: CommandType,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    guild_id: Option<String>,
    #[serde(default)]
    options: Value,
}

const fn default_command_type() -> CommandType {
    CommandType::ChatInput
}

impl Interaction {
    /// Creates a chat-input interaction for `command_name` with no options.
    #[must_use]
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            command_type: CommandType::ChatInput,
            user_id: None,
            guild_id: None,
            options: Value::Null,
        }
    }

    /// Overrides the interaction surface.
    #[must_use]
    pub const fn with_command_type(mut self, command_type: CommandType) -> Self {
        self.command_type = command_type;
        self
    }

    /// Sets the invoking user.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Attaches option values supplied by the user.
    #[must_use]
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    /// Name of the command being invoked.
    #[must_use]
    pub const fn command_name(&self) -> &str {
        self.command_name.as_str()
    }

    /// Surface the interaction was raised from.
    #[must_use]
    pub const fn command_type(&self) -> CommandType {
        self.command_type
    }

    /// Identifier of the invoking user, if known.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Guild the interaction was raised in, if any.
    #[must_use]
    pub fn guild_id(&self) -> Option<&str> {
        self.guild_id.as_deref()
    }

    /// Option values supplied with the interaction.
    #[must_use]
    pub const fn options(&self) -> &Value {
        &self.options
    }
}
