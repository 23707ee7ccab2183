//! Unit tests for client events and the in-process emitter.

use std::sync::{Arc, Mutex};

use rstest::rstest;

use super::*;

fn recording(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Listener<()> {
    let log = Arc::clone(log);
    Arc::new(move |_: &(), args: &[Value]| {
        log.lock()
            .expect("log mutex poisoned")
            .push(format!("{tag}:{}", args.len()));
        Ok(())
    })
}

#[rstest]
#[case::ready(ClientEvent::Ready, "ready")]
#[case::interaction(ClientEvent::InteractionCreate, "interactionCreate")]
#[case::voice(ClientEvent::VoiceStateUpdate, "voiceStateUpdate")]
fn event_wire_names(#[case] event: ClientEvent, #[case] expected: &str) {
    assert_eq!(event.as_str(), expected);
    assert_eq!(event.to_string(), expected);
    assert_eq!(expected.parse::<ClientEvent>().expect("parse"), event);
}

#[test]
fn unknown_event_name_does_not_parse() {
    assert!("shardReconnecting".parse::<ClientEvent>().is_err());
}

#[test]
fn emit_invokes_listeners_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut bus = EventBus::new();
    bus.on(ClientEvent::MessageCreate, recording(&log, "first"));
    bus.on(ClientEvent::MessageCreate, recording(&log, "second"));
    bus.on(ClientEvent::Ready, recording(&log, "other"));

    let invoked = bus
        .emit(&(), ClientEvent::MessageCreate, &[Value::Null])
        .expect("emit");

    assert_eq!(invoked, 2);
    assert_eq!(
        *log.lock().expect("log mutex poisoned"),
        vec![String::from("first:1"), String::from("second:1")]
    );
}

#[test]
fn emit_without_listeners_invokes_nothing() {
    let bus: EventBus<()> = EventBus::new();
    assert!(bus.is_empty());
    assert_eq!(bus.emit(&(), ClientEvent::Ready, &[]).expect("emit"), 0);
}

#[test]
fn emit_stops_at_first_failing_listener() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut bus = EventBus::new();
    bus.on(
        ClientEvent::Ready,
        Arc::new(|_: &(), _: &[Value]| Err(HandlerError::new("boom"))),
    );
    bus.on(ClientEvent::Ready, recording(&log, "after"));

    let err = bus
        .emit(&(), ClientEvent::Ready, &[])
        .expect_err("first listener fails");

    assert_eq!(err.message(), "boom");
    assert!(log.lock().expect("log mutex poisoned").is_empty());
}

#[test]
fn listener_count_tracks_appends() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut bus = EventBus::new();
    for _ in 0..3 {
        bus.on(ClientEvent::GuildCreate, recording(&log, "guild"));
    }
    assert_eq!(bus.listener_count(ClientEvent::GuildCreate), 3);
    assert_eq!(bus.listener_count(ClientEvent::GuildDelete), 0);
    assert!(!bus.is_empty());
}
