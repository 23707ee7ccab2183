//! Event modules: listeners attached to a named client event.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::emitter::ClientEvent;
use crate::error::{HandlerError, ValidationError};
use crate::handlers::EventHandler;
use crate::outcome::ModuleKind;

/// Declarative part of an event module, as written in the module file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    handler: Option<String>,
}

impl EventData {
    /// Creates event data for the named event.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            handler: None,
        }
    }

    /// Declares the handler identifier.
    #[must_use]
    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    /// Returns the declared event name when it is not blank.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }

    /// Returns the declared handler identifier.
    #[must_use]
    pub fn handler(&self) -> Option<&str> {
        self.handler.as_deref()
    }
}

/// An event listener bound to its handler.
pub struct EventModule<C> {
    data: EventData,
    handler: Option<EventHandler<C>>,
}

impl<C> EventModule<C> {
    /// Combines declarative data with the bound handler, if any.
    #[must_use]
    pub const fn new(data: EventData, handler: Option<EventHandler<C>>) -> Self {
        Self { data, handler }
    }

    /// Returns the declarative data.
    #[must_use]
    pub const fn data(&self) -> &EventData {
        &self.data
    }

    /// Returns the declared event name when it is not blank.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.data.name()
    }

    /// Returns the client event this module listens to, if recognised.
    #[must_use]
    pub fn event(&self) -> Option<ClientEvent> {
        self.name().and_then(|name| name.parse().ok())
    }

    /// Returns the bound handler.
    #[must_use]
    pub const fn handler(&self) -> Option<&EventHandler<C>> {
        self.handler.as_ref()
    }

    /// Checks the properties required for registration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: a missing name, a name
    /// that is not a client event, or no bound handler.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let Some(name) = self.name() else {
            return Err(ValidationError::MissingName {
                kind: ModuleKind::Event,
            });
        };
        if self.event().is_none() {
            return Err(ValidationError::UnknownEvent {
                name: name.to_owned(),
            });
        }
        if self.handler.is_none() {
            return Err(match self.data.handler() {
                Some(handler) => ValidationError::UnboundHandler {
                    handler: handler.to_owned(),
                },
                None => ValidationError::MissingHandler {
                    kind: ModuleKind::Event,
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

    /// Runs the bound handler with the application context and event
    /// arguments.
    ///
    /// # Errors
    ///
    /// Returns the handler's error, or a [`HandlerError`] when no handler is
    /// bound.
    pub fn execute(&self, context: &C, args: &[Value]) -> Result<(), HandlerError> {
        match &self.handler {
            Some(handler) => handler(context, args),
            None => Err(HandlerError::new(format!(
                "event '{}' has no bound handler",
                self.name().unwrap_or_default()
            ))),
        }
    }
}

impl<C> Clone for EventModule<C> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<C> fmt::Debug for EventModule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventModule")
            .field("data", &self.data)
            .field("handler_bound", &self.handler.is_some())
            .finish()
    }
}
