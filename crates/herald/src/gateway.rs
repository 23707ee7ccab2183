//! Connection boundary between the bot and the remote chat service.

use std::future::Future;

use herald_modules::{ClientEvent, EventBus, EventEmitter, HandlerError, Listener};
use serde_json::Value;
use thiserror::Error;

use crate::bot::Bot;

/// Errors reported by a gateway connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The service refused the credential.
    #[error("the gateway rejected the login: {reason}")]
    Rejected {
        /// Reason reported by the service.
        reason: String,
    },
    /// The connection was already established.
    #[error("the gateway is already logged in")]
    AlreadyLoggedIn,
}

/// A client connection that raises [`ClientEvent`]s.
///
/// Module listeners and the core listeners attach through
/// [`EventEmitter::on`]; the connection raises events with [`Gateway::emit`].
pub trait Gateway: EventEmitter<Bot> {
    /// Authenticates the connection.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] when the service refuses the login.
    fn login(&mut self, token: &str) -> impl Future<Output = Result<(), GatewayError>>;

    /// Invokes every listener attached to `event`.
    ///
    /// # Errors
    ///
    /// Returns the first listener failure.
    fn emit(&self, bot: &Bot, event: ClientEvent, args: &[Value]) -> Result<usize, HandlerError>;
}

/// Gateway that never leaves the process.
///
/// Login succeeds for any non-blank token; events are raised by the caller.
/// The checker binary and the tests use it in place of a network connection.
#[derive(Debug, Default)]
pub struct LocalGateway {
    bus: EventBus<Bot>,
    logged_in: bool,
}

impl LocalGateway {
    /// Creates a gateway with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`Gateway::login`] has succeeded.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Number of listeners attached to `event`.
    #[must_use]
    pub fn listener_count(&self, event: ClientEvent) -> usize {
        self.bus.listener_count(event)
    }
}

impl EventEmitter<Bot> for LocalGateway {
    fn on(&mut self, event: ClientEvent, listener: Listener<Bot>) {
        self.bus.on(event, listener);
    }
}

impl Gateway for LocalGateway {
    async fn login(&mut self, token: &str) -> Result<(), GatewayError> {
        if self.logged_in {
            return Err(GatewayError::AlreadyLoggedIn);
        }
        if token.trim().is_empty() {
            return Err(GatewayError::Rejected {
                reason: String::from("the token is blank"),
            });
        }
        self.logged_in = true;
        Ok(())
    }

    fn emit(&self, bot: &Bot, event: ClientEvent, args: &[Value]) -> Result<usize, HandlerError> {
        self.bus.emit(bot, event, args)
    }
}
