//! Crate-level integration and BDD tests.


use std::fs;

use camino::Utf8PathBuf;
use serde_json::json;

use crate::catalog::DirectoryCatalog;
use crate::discovery::Discovery;
use crate::emitter::{ClientEvent, EventBus};
use crate::handlers::DeclaredHandlers;
use crate::loader::JsonModuleLoader;
use crate::outcome::{RecordState, TracingOutcomeSink};
use crate::registry::Registry;

#[test]
fn end_to_end_discovery_over_a_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
    fs::create_dir_all(root.join("modules/commands")).expect("commands dir");
    fs::create_dir_all(root.join("modules/events")).expect("events dir");
    fs::write(
        root.join("modules/commands/inspect.json"),
        json!({ "command": {
            "name": "inspect",
            "types": { "chat_input": true, "context_menu": "user" },
            "deployment": "dev",
            "handler": "inspect"
        }})
        .to_string(),
    )
    .expect("write command");
    fs::write(
        root.join("modules/events/join.json"),
        json!({ "event": { "name": "guildMemberAdd", "handler": "welcome" } }).to_string(),
    )
    .expect("write event");
    fs::write(root.join("modules/events/empty.json"), "").expect("write empty");

    let catalog = DirectoryCatalog::scan(&[root]).expect("scan");
    let loader = JsonModuleLoader::new();
    let discovery = Discovery::new(&catalog, &loader, &DeclaredHandlers, &TracingOutcomeSink);
    let mut registry: Registry<()> = Registry::new();
    let mut bus = EventBus::new();

    let records = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(discovery.register_all(&mut registry, &mut bus))
        .expect("discovery")
        .expect("path set present");

    let states: Vec<(&str, RecordState)> = records
        .iter()
        .map(|record| (record.name(), record.state()))
        .collect();
    assert_eq!(
        states,
        vec![
            ("inspect", RecordState::Success),
            ("events/empty.json", RecordState::Error),
            ("guildMemberAdd", RecordState::Success),
        ]
    );
    assert_eq!(registry.names(), vec!["inspect"]);
    assert_eq!(bus.listener_count(ClientEvent::GuildMemberAdd), 1);
}
