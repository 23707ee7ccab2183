//! Structural classification of loaded exports.
//!
//! An export is a command when its top-level object carries exactly a
//! `command` member and an event when it carries exactly an `event` member.
//! Declared handler identifiers are bound through a [`HandlerResolver`] while
//! the module is built; an unknown identifier leaves the handler unbound for
//! the validator to report.

use serde_json::{Map, Value};

use crate::command::{CommandData, CommandModule};
use crate::error::ClassificationError;
use crate::event::{EventData, EventModule};
use crate::handlers::HandlerResolver;
use crate::outcome::ModuleKind;

const COMMAND_MEMBER: &str = "command";
const EVENT_MEMBER: &str = "event";

/// A loaded export recognised as one of the two module variants.
#[derive(Debug, Clone)]
pub enum ClassifiedModule<C> {
    /// A command module.
    Command(CommandModule<C>),
    /// An event module.
    Event(EventModule<C>),
}

impl<C> ClassifiedModule<C> {
    /// Kind of the classified module.
    #[must_use]
    pub const fn kind(&self) -> ModuleKind {
        match self {
            Self::Command(_) => ModuleKind::Command,
            Self::Event(_) => ModuleKind::Event,
        }
    }

    /// Name declared by the module, when present and not blank.
    #[must_use]
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            Self::Command(command) => command.name(),
            Self::Event(event) => event.name(),
        }
    }
}

/// Classifies a loaded export.
///
/// # Errors
///
/// Returns [`ClassificationError::Empty`] when nothing was exported and
/// [`ClassificationError::Unrecognized`] when the export has no recognisable
/// module shape.
///
/// # Example
///
/// ```
/// use herald_modules::{ClassifiedModule, DeclaredHandlers, ModuleKind, classify};
/// use serde_json::json;
///
/// let export = json!({ "event": { "name": "ready", "handler": "log-ready" } });
/// let module = classify::<(), _>(Some(export), &DeclaredHandlers)?;
///
/// assert_eq!(module.kind(), ModuleKind::Event);
/// assert!(matches!(module, ClassifiedModule::Event(event) if event.is_valid()));
/// # Ok::<(), herald_modules::ClassificationError>(())
/// ```
pub fn classify<C, R>(
    export: Option<Value>,
    resolver: &R,
) -> Result<ClassifiedModule<C>, ClassificationError>
where
    R: HandlerResolver<C> + ?Sized,
{
    let Some(export) = export else {
        return Err(ClassificationError::Empty);
    };
    let Value::Object(mut members) = export else {
        return Err(ClassificationError::unrecognized(format!(
            "expected an object, found {}",
            describe(&export)
        )));
    };
    if members.is_empty() {
        return Err(ClassificationError::Empty);
    }

    match (members.remove(COMMAND_MEMBER), members.remove(EVENT_MEMBER)) {
        (Some(body), None) => command(body, resolver).map(ClassifiedModule::Command),
        (None, Some(body)) => event(body, resolver).map(ClassifiedModule::Event),
        (Some(_), Some(_)) => Err(ClassificationError::unrecognized(
            "the export declares both a command and an event",
        )),
        (None, None) => Err(ClassificationError::unrecognized(format!(
            "expected a 'command' or 'event' member, found {}",
            member_list(&members)
        ))),
    }
}

fn command<C, R>(body: Value, resolver: &R) -> Result<CommandModule<C>, ClassificationError>
where
    R: HandlerResolver<C> + ?Sized,
{
    let declared_name = body_name(&body);
    let data: CommandData = serde_json::from_value(body).map_err(|error| {
        ClassificationError::malformed(format!("malformed command: {error}"), declared_name)
    })?;
    let handler = data.handler().and_then(|id| resolver.command(id));
    Ok(CommandModule::new(data, handler))
}

fn event<C, R>(body: Value, resolver: &R) -> Result<EventModule<C>, ClassificationError>
where
    R: HandlerResolver<C> + ?Sized,
{
    let declared_name = body_name(&body);
    let data: EventData = serde_json::from_value(body).map_err(|error| {
        ClassificationError::malformed(format!("malformed event: {error}"), declared_name)
    })?;
    let handler = data.handler().and_then(|id| resolver.event(id));
    Ok(EventModule::new(data, handler))
}

/// Non-blank `name` string of a module body, read before deserialisation.
fn body_name(body: &Value) -> Option<String> {
    body.get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn member_list(members: &Map<String, Value>) -> String {
    let names: Vec<String> = members.keys().map(|key| format!("'{key}'")).collect();
    names.join(", ")
}

#[cfg(test)]
mod tests;
