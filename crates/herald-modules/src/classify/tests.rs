//! Unit tests for export classification.

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::command::{CommandType, ContextMenuKind, Deployment, InteractionSurfaces};
use crate::handlers::{DeclaredHandlers, HandlerCatalog};

#[fixture]
fn handlers() -> HandlerCatalog<()> {
    HandlerCatalog::new()
        .with_command("ping", |_: &(), _| Ok(()))
        .with_event("log-ready", |_: &(), _| Ok(()))
}

#[rstest]
fn command_export_binds_its_handler(handlers: HandlerCatalog<()>) {
    let export = json!({
        "command": {
            "name": "ping",
            "description": "Replies with pong",
            "types": { "chat_input": true, "context_menu": "message" },
            "deployment": "guild",
            "handler": "ping"
        }
    });

    let ClassifiedModule::Command(command) = classify(Some(export), &handlers).expect("classify")
    else {
        panic!("expected a command");
    };

    assert_eq!(command.name(), Some("ping"));
    assert_eq!(command.deployment(), Deployment::Guild);
    assert_eq!(
        command.data().types(),
        InteractionSurfaces::chat_input().with_context_menu(ContextMenuKind::Message)
    );
    assert_eq!(command.command_type(), None::<CommandType>);
    assert!(command.handler().is_some());
    assert!(command.is_valid());
}

#[rstest]
fn event_export_binds_its_handler(handlers: HandlerCatalog<()>) {
    let export = json!({ "event": { "name": "ready", "handler": "log-ready" } });

    let module = classify(Some(export), &handlers).expect("classify");

    assert_eq!(module.kind(), ModuleKind::Event);
    assert_eq!(module.declared_name(), Some("ready"));
    assert!(matches!(module, ClassifiedModule::Event(event) if event.handler().is_some()));
}

#[rstest]
fn unknown_handler_identifier_is_left_unbound(handlers: HandlerCatalog<()>) {
    let export = json!({
        "command": { "name": "ban", "types": { "chat_input": true }, "handler": "ban" }
    });

    let ClassifiedModule::Command(command) = classify(Some(export), &handlers).expect("classify")
    else {
        panic!("expected a command");
    };

    assert!(command.handler().is_none());
    assert!(!command.is_valid());
}

#[test]
fn nameless_modules_are_still_classified() {
    let module = classify::<(), _>(Some(json!({ "command": {} })), &DeclaredHandlers)
        .expect("classify");
    assert_eq!(module.kind(), ModuleKind::Command);
    assert_eq!(module.declared_name(), None);
}

#[rstest]
#[case::nothing(None)]
#[case::empty_object(Some(json!({})))]
fn empty_exports_are_reported_as_empty(#[case] export: Option<Value>) {
    let err = classify::<(), _>(export, &DeclaredHandlers).expect_err("empty export");
    assert_eq!(err, ClassificationError::Empty);
}

#[rstest]
#[case::array(json!([1, 2]), "expected an object, found an array")]
#[case::string(json!("ping"), "expected an object, found a string")]
#[case::null(json!(null), "expected an object, found null")]
#[case::both(
    json!({ "command": { "name": "a" }, "event": { "name": "ready" } }),
    "the export declares both a command and an event"
)]
#[case::neither(
    json!({ "name": "ping", "handler": "ping" }),
    "expected a 'command' or 'event' member, found 'handler', 'name'"
)]
fn unrecognised_shapes_are_rejected(#[case] export: Value, #[case] reason: &str) {
    let err = classify::<(), _>(Some(export), &DeclaredHandlers).expect_err("unrecognised");
    assert_eq!(err, ClassificationError::unrecognized(reason));
}

#[rstest]
#[case::command_body(json!({ "command": "ping" }), "malformed command")]
#[case::event_name(json!({ "event": { "name": 7 } }), "malformed event")]
fn malformed_bodies_are_unrecognised(#[case] export: Value, #[case] prefix: &str) {
    let err = classify::<(), _>(Some(export), &DeclaredHandlers).expect_err("malformed");
    let matched = matches!(
        &err,
        ClassificationError::Unrecognized { reason, .. } if reason.starts_with(prefix)
    );
    assert!(matched, "unexpected error: {err}");
    assert!(err.declared_name().is_none());
}

#[rstest]
#[case::command_types(
    json!({ "command": { "name": "ping", "types": "x" } }),
    "ping"
)]
#[case::event_handler(json!({ "event": { "name": " ready ", "handler": 3 } }), "ready")]
fn malformed_bodies_keep_their_declared_name(#[case] export: Value, #[case] expected: &str) {
    let err = classify::<(), _>(Some(export), &DeclaredHandlers).expect_err("malformed");
    assert_eq!(err.declared_name(), Some(expected));
}
