//! Client events and the emitter boundary event modules attach to.
//!
//! Gateways own an emitter and raise [`ClientEvent`]s on it; the registrar
//! only ever calls [`EventEmitter::on`]. [`EventBus`] is the in-process
//! emitter gateways embed: an append-only listener list per event.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::HandlerError;
use crate::handlers::EventHandler;

/// Events raised by the client connection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, Display, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum ClientEvent {
    /// The client finished logging in.
    Ready,
    /// A user invoked a command.
    InteractionCreate,
    /// A message was posted.
    MessageCreate,
    /// A message was edited.
    MessageUpdate,
    /// A message was deleted.
    MessageDelete,
    /// The client joined a guild.
    GuildCreate,
    /// The client left a guild.
    GuildDelete,
    /// A member joined a guild.
    GuildMemberAdd,
    /// A member left a guild.
    GuildMemberRemove,
    /// A member's roles or nickname changed.
    GuildMemberUpdate,
    /// A channel was created.
    ChannelCreate,
    /// A channel was deleted.
    ChannelDelete,
    /// A channel was changed.
    ChannelUpdate,
    /// A user started typing.
    TypingStart,
    /// A member joined, left, or moved between voice channels.
    VoiceStateUpdate,
    /// A member's presence changed.
    PresenceUpdate,
}

impl ClientEvent {
    /// Returns the wire name of the event.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Listener invoked when an event fires.
pub type Listener<C> = EventHandler<C>;

/// Target that event listeners attach to.
pub trait EventEmitter<C> {
    /// Appends a listener for `event`. Existing listeners are kept.
    fn on(&mut self, event: ClientEvent, listener: Listener<C>);
}

/// In-process event emitter.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use herald_modules::{ClientEvent, EventBus, EventEmitter};
///
/// let mut bus: EventBus<()> = EventBus::new();
/// bus.on(ClientEvent::Ready, Arc::new(|_: &(), _: &[serde_json::Value]| Ok(())));
///
/// let invoked = bus.emit(&(), ClientEvent::Ready, &[]).expect("listeners succeed");
/// assert_eq!(invoked, 1);
/// ```
pub struct EventBus<C> {
    listeners: HashMap<ClientEvent, Vec<Listener<C>>>,
}

impl<C> EventBus<C> {
    /// Creates an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Invokes every listener for `event` in registration order.
    ///
    /// Returns the number of listeners invoked.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first listener error.
    pub fn emit(
        &self,
        context: &C,
        event: ClientEvent,
        args: &[Value],
    ) -> Result<usize, HandlerError> {
        let Some(listeners) = self.listeners.get(&event) else {
            tracing::trace!(
                target: "herald_modules::emitter",
                event = %event,
                "event has no listeners"
            );
            return Ok(0);
        };
        for listener in listeners {
            listener(context, args)?;
        }
        Ok(listeners.len())
    }

    /// Number of listeners attached to `event`.
    #[must_use]
    pub fn listener_count(&self, event: ClientEvent) -> usize {
        self.listeners.get(&event).map_or(0, Vec::len)
    }

    /// Returns `true` when no listener is attached to any event.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(Vec::is_empty)
    }
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventEmitter<C> for EventBus<C> {
    fn on(&mut self, event: ClientEvent, listener: Listener<C>) {
        self.listeners.entry(event).or_default().push(listener);
    }
}

impl<C> fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(&'static str, usize)> = self
            .listeners
            .iter()
            .map(|(event, listeners)| (event.as_str(), listeners.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventBus")
            .field("listeners", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests;
