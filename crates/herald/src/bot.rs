//! The application root handed to every handler.

use herald_modules::{HandlerError, Interaction, Registry};
use thiserror::Error;
use tracing::debug;

use crate::data::{BotInfo, BotStyle, BotVars};

/// Errors raised while dispatching an interaction to its command.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// No command is registered under the interaction's name.
    #[error("no command named '{name}' is registered")]
    UnknownCommand {
        /// Name carried by the interaction.
        name: String,
    },
    /// The command handler failed.
    #[error("command '{name}' failed: {source}")]
    Handler {
        /// Command that was executed.
        name: String,
        /// Error returned by the handler.
        #[source]
        source: HandlerError,
    },
}

/// A running bot: its data files and its command table.
#[derive(Debug)]
pub struct Bot {
    info: BotInfo,
    vars: BotVars,
    style: Option<BotStyle>,
    registry: Registry<Self>,
}

impl Bot {
    /// Creates a bot with an empty command table.
    #[must_use]
    pub fn new(info: BotInfo, vars: BotVars, style: Option<BotStyle>) -> Self {
        Self {
            info,
            vars,
            style,
            registry: Registry::new(),
        }
    }

    /// Identity of the bot account.
    #[must_use]
    pub const fn info(&self) -> &BotInfo {
        &self.info
    }

    /// Shared variables.
    #[must_use]
    pub const fn vars(&self) -> &BotVars {
        &self.vars
    }

    /// Presentation settings, when a style file was supplied.
    #[must_use]
    pub const fn style(&self) -> Option<&BotStyle> {
        self.style.as_ref()
    }

    /// Registered commands.
    #[must_use]
    pub const fn registry(&self) -> &Registry<Self> {
        &self.registry
    }

    pub(crate) const fn registry_mut(&mut self) -> &mut Registry<Self> {
        &mut self.registry
    }

    /// Resolves `interaction` to its command and runs the command handler.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownCommand`] when the name is not
    /// registered and [`DispatchError::Handler`] when the handler fails.
    pub fn dispatch(&self, interaction: &Interaction) -> Result<(), DispatchError> {
        let name = interaction.command_name();
        let Some(command) = self.registry.get(name) else {
            return Err(DispatchError::UnknownCommand {
                name: name.to_owned(),
            });
        };
        debug!(
            target: "herald::dispatch",
            command = name,
            registered_type = ?command.command_type(),
            interaction_type = %interaction.command_type(),
            "dispatching interaction"
        );
        command
            .execute(self, interaction)
            .map_err(|source| DispatchError::Handler {
                name: name.to_owned(),
                source,
            })
    }
}
