//! Error types raised while discovering and running modules.
//!
//! Only [`ModuleError`] escapes the discovery loop: it describes an
//! infrastructure failure that aborts startup. Classification and validation
//! problems are contained and end up in an outcome record instead. I/O errors
//! are wrapped in `Arc` to satisfy the `result_large_err` Clippy lint.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::outcome::ModuleKind;

/// Infrastructure failures that propagate out of the engine.
#[derive(Debug, Clone, Error)]
pub enum ModuleError {
    /// A file requested by name is not present in the catalog.
    #[error("could not find {name}")]
    NotFound {
        /// Name that was looked up.
        name: String,
    },

    /// A module file could not be read from disk.
    #[error("failed to read module file '{path}': {source}")]
    Io {
        /// Path being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

/// Reasons a loaded export is not recognised as a module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    /// The file exported nothing usable.
    #[error("the export was empty")]
    Empty,

    /// The export exists but has no recognisable module shape.
    #[error("unrecognised export: {reason}")]
    Unrecognized {
        /// Description of the mismatch.
        reason: String,
        /// Name the export declared, when one could be read.
        declared_name: Option<String>,
    },
}

impl ClassificationError {
    pub(crate) fn unrecognized(reason: impl Into<String>) -> Self {
        Self::Unrecognized {
            reason: reason.into(),
            declared_name: None,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>, declared_name: Option<String>) -> Self {
        Self::Unrecognized {
            reason: reason.into(),
            declared_name,
        }
    }

    /// Name the rejected export declared, if it carried a usable one.
    #[must_use]
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Unrecognized { declared_name, .. } => declared_name.as_deref(),
        }
    }
}

/// A required property of a classified module is missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The module declares no name, or only whitespace.
    #[error("the {kind} name is missing")]
    MissingName {
        /// Kind of the rejected module.
        kind: ModuleKind,
    },

    /// A command enables neither the chat-input nor the context-menu surface.
    #[error("command '{name}' enables neither chat input nor a context menu")]
    NoInteractionSurface {
        /// Command name.
        name: String,
    },

    /// An event module names an event the client never emits.
    #[error("'{name}' is not a recognised client event")]
    UnknownEvent {
        /// Declared event name.
        name: String,
    },

    /// The module declares no handler at all.
    #[error("{kind} '{name}' declares no handler")]
    MissingHandler {
        /// Kind of the rejected module.
        kind: ModuleKind,
        /// Module name.
        name: String,
    },

    /// The declared handler identifier is not known to the resolver.
    #[error("handler '{handler}' is not registered")]
    UnboundHandler {
        /// Declared handler identifier.
        handler: String,
    },
}

/// Failure reported by a command or event handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Creates a handler error with a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure description.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}
