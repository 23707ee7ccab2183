//! Test harness utilities for the bot startup suites.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use camino::{Utf8Path, Utf8PathBuf};
use herald_config::Config;
use herald_modules::{
    ClientEvent, DirectoryCatalog, HandlerCatalog, HandlerError, JsonModuleLoader,
    OutcomeSummary, TracingOutcomeSink,
};
use ortho_config::OrthoError;
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::bootstrap::ConfigLoader;
use crate::bot::Bot;
use crate::data::BotInfo;
use crate::error::StartupError;
use crate::gateway::LocalGateway;
use crate::reporter::StartupReporter;
use crate::startup::{Session, Startup};

/// Runs `future` to completion on a current-thread runtime.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("failed to build test runtime")
        .block_on(future)
}

// ---------------------------------------------------------------------------
// Bot directory
// ---------------------------------------------------------------------------

/// Temporary bot directory with helpers for writing data and module files.
pub struct BotTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl BotTree {
    /// Creates an empty directory.
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temporary bot directory");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temporary bot directory was not valid UTF-8");
        Self { _dir: dir, root }
    }

    /// Creates a directory holding the `info`, `vars` and `style` files.
    pub fn with_data() -> Self {
        let tree = Self::empty();
        tree.write_json(
            "info.json",
            &json!({ "client_id": "1001", "guild_id": "2002", "owner_ids": ["42"] }),
        );
        tree.write_json("vars.json", &json!({ "prefix": "!", "retries": 3 }));
        tree.write_json(
            "style.json",
            &json!({ "primary_color": "#5865f2", "footer": "herald" }),
        );
        tree
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directory");
        }
        fs::write(&path, contents).expect("failed to write bot file");
    }

    pub fn write_json(&self, relative: &str, value: &Value) {
        self.write(relative, &value.to_string());
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.root.join(relative)).expect("failed to remove bot file");
    }

    /// Adds a chat input command module bound to `handler`.
    pub fn add_command(&self, name: &str, handler: &str) {
        self.write_json(
            &format!("modules/commands/{name}.json"),
            &json!({ "command": {
                "name": name,
                "types": { "chat_input": true },
                "handler": handler
            }}),
        );
    }

    /// Adds an event module for `event` in `modules/events/{file}.json`.
    pub fn add_event(&self, event: &str, file: &str, handler: &str) {
        self.write_json(
            &format!("modules/events/{file}.json"),
            &json!({ "event": { "name": event, "handler": handler } }),
        );
    }

    pub fn catalog(&self) -> DirectoryCatalog {
        DirectoryCatalog::scan(&[self.root.clone()]).expect("failed to scan bot directory")
    }

    /// Configuration rooted at this directory.
    pub fn config(&self) -> Config {
        Config {
            root_directory: self.root.clone(),
            ..Config::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Handler catalog whose `ping` command and `greet` event count invocations.
pub struct CountingHandlers {
    pub catalog: HandlerCatalog<Bot>,
    pings: Arc<AtomicUsize>,
    greetings: Arc<AtomicUsize>,
}

impl CountingHandlers {
    pub fn new() -> Self {
        let pings = Arc::new(AtomicUsize::new(0));
        let greetings = Arc::new(AtomicUsize::new(0));
        let ping_counter = Arc::clone(&pings);
        let greet_counter = Arc::clone(&greetings);
        let catalog = HandlerCatalog::new()
            .with_command("ping", move |_: &Bot, _| {
                ping_counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .with_command("explode", |_: &Bot, _| Err(HandlerError::new("boom")))
            .with_event("greet", move |_: &Bot, _| {
                greet_counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        Self {
            catalog,
            pings,
            greetings,
        }
    }

    pub fn pings(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    pub fn greetings(&self) -> usize {
        self.greetings.load(Ordering::SeqCst)
    }
}

/// Prepares a session over `tree` with the given handlers.
pub fn prepare(
    tree: &BotTree,
    handlers: &CountingHandlers,
    reporter: Arc<RecordingStartupReporter>,
) -> Result<Session<LocalGateway>, StartupError> {
    let catalog = tree.catalog();
    let loader = JsonModuleLoader::new();
    let startup = Startup::new(
        &catalog,
        &loader,
        &handlers.catalog,
        &TracingOutcomeSink,
        reporter,
    );
    block_on(startup.prepare(LocalGateway::new()))
}

/// Interaction payload for `command`.
pub fn interaction(command: &str) -> Value {
    json!({ "command_name": command, "user_id": "42" })
}

// ---------------------------------------------------------------------------
// Configuration loaders
// ---------------------------------------------------------------------------

/// Loader rooted at a temporary bot directory.
pub struct TestConfigLoader {
    pub tree: BotTree,
}

impl TestConfigLoader {
    pub fn new() -> Self {
        Self {
            tree: BotTree::with_data(),
        }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.tree.config())
    }
}

/// Loader that fails by passing an unknown log format on the command line.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("herald"),
            OsString::from("--log-format"),
            OsString::from("loud"),
        ];
        Config::load_from_iter(args)
    }
}

// ---------------------------------------------------------------------------
// Reporter
// ---------------------------------------------------------------------------

/// Records startup events for assertions.
#[derive(Default)]
pub struct RecordingStartupReporter {
    events: Mutex<Vec<StartupEvent>>,
}

impl RecordingStartupReporter {
    /// Captures a copy of the recorded events.
    pub fn events(&self) -> Vec<StartupEvent> {
        self.events
            .lock()
            .expect("startup reporter mutex poisoned")
            .clone()
    }

    pub fn failed(&self) -> bool {
        self.events()
            .iter()
            .any(|event| matches!(event, StartupEvent::StartupFailed(_)))
    }

    fn record(&self, event: StartupEvent) {
        self.events
            .lock()
            .expect("startup reporter mutex poisoned")
            .push(event);
    }
}

impl StartupReporter for RecordingStartupReporter {
    fn bootstrap_starting(&self) {
        self.record(StartupEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(StartupEvent::BootstrapSucceeded);
    }

    fn data_retrieved(&self, name: &str, loaded: bool) {
        self.record(StartupEvent::DataRetrieved {
            name: name.to_owned(),
            loaded,
        });
    }

    fn modules_registered(&self, summary: &OutcomeSummary) {
        self.record(StartupEvent::ModulesRegistered(*summary));
    }

    fn login_succeeded(&self, info: &BotInfo) {
        self.record(StartupEvent::LoginSucceeded(info.client_id.clone()));
    }

    fn startup_failed(&self, error: &StartupError) {
        self.record(StartupEvent::StartupFailed(error.to_string()));
    }
}

/// Structured startup events tracked during tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupEvent {
    /// Bootstrap started.
    BootstrapStarting,
    /// Bootstrap completed successfully.
    BootstrapSucceeded,
    /// A data file was looked up.
    DataRetrieved { name: String, loaded: bool },
    /// Discovery finished with these totals.
    ModulesRegistered(OutcomeSummary),
    /// Login succeeded for the client id.
    LoginSucceeded(String),
    /// A stage failed with an error description.
    StartupFailed(String),
}

// ---------------------------------------------------------------------------
// Behaviour world
// ---------------------------------------------------------------------------

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    pub tree: BotTree,
    pub handlers: CountingHandlers,
    pub reporter: Arc<RecordingStartupReporter>,
    pub session: Option<Session<LocalGateway>>,
    pub error: Option<StartupError>,
    pub emitted: Option<Result<usize, HandlerError>>,
    pub login_result: Option<Result<(), StartupError>>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            tree: BotTree::with_data(),
            handlers: CountingHandlers::new(),
            reporter: Arc::new(RecordingStartupReporter::default()),
            session: None,
            error: None,
            emitted: None,
            login_result: None,
        }
    }

    pub fn prepare(&mut self) {
        match prepare(&self.tree, &self.handlers, Arc::clone(&self.reporter)) {
            Ok(session) => self.session = Some(session),
            Err(error) => self.error = Some(error),
        }
    }

    pub fn session(&self) -> &Session<LocalGateway> {
        self.session.as_ref().expect("bot has not been prepared")
    }

    pub fn emit_interaction(&mut self, command: &str) {
        let result = self
            .session()
            .emit(ClientEvent::InteractionCreate, &[interaction(command)]);
        self.emitted = Some(result);
    }

    pub fn login(&mut self, token: &str) {
        let session = self.session.as_mut().expect("bot has not been prepared");
        self.login_result = Some(block_on(session.login(Some(token))));
    }
}

/// Default test world fixture.
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
