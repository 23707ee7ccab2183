//! The discovery pass: load, classify, validate and register every module
//! file the catalog knows about.
//!
//! Paths are processed one at a time in catalog order. Each path yields
//! exactly one [`OutcomeRecord`]; the aggregate is handed to the
//! [`OutcomeSink`] once, after the last path. Only a [`ModuleError`] from the
//! loader aborts the pass.

use camino::Utf8Path;
use tracing::debug;

use crate::catalog::{ModulePath, PathCatalog};
use crate::classify::{ClassifiedModule, classify};
use crate::command::{CommandModule, Deployment};
use crate::emitter::EventEmitter;
use crate::error::ModuleError;
use crate::event::EventModule;
use crate::handlers::HandlerResolver;
use crate::loader::ModuleLoader;
use crate::outcome::{ModuleKind, OutcomeRecord, OutcomeRecorder, OutcomeSink};
use crate::registry::{Registrar, Registry};

/// Path substring selecting command module files.
pub const COMMANDS_MARKER: &str = "commands";

/// Path substring selecting event module files.
pub const EVENTS_MARKER: &str = "events";

/// Path substring after which the fallback module name begins.
pub const MODULES_SEGMENT: &str = "modules";

/// Whether `path` lies in a command or event namespace.
///
/// The match is a plain substring test, so `commandsets/a.json` also counts.
#[must_use]
pub fn is_module_path(path: &str) -> bool {
    path.contains(COMMANDS_MARKER) || path.contains(EVENTS_MARKER)
}

/// Name used for a module that declares none.
///
/// Takes the part of the path after the first `modules` with leading
/// separators removed, falling back to the file stem.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use herald_modules::discovery::fallback_name;
///
/// assert_eq!(
///     fallback_name(Utf8Path::new("bot/modules/commands/ping.json")),
///     "commands/ping.json"
/// );
/// assert_eq!(fallback_name(Utf8Path::new("bot/commands/ping.json")), "ping");
/// ```
#[must_use]
pub fn fallback_name(path: &Utf8Path) -> String {
    path.as_str()
        .split_once(MODULES_SEGMENT)
        .map(|(_, rest)| rest.trim_start_matches(['/', '\\']))
        .filter(|rest| !rest.is_empty())
        .or_else(|| path.file_stem())
        .unwrap_or_else(|| path.as_str())
        .to_owned()
}

fn derive_name(declared: Option<&str>, path: &Utf8Path) -> String {
    declared.map_or_else(|| fallback_name(path), str::to_owned)
}

/// One discovery pass over a catalog.
///
/// # Example
///
/// ```
/// use herald_modules::{
///     DeclaredHandlers, DirectoryCatalog, Discovery, EventBus, JsonModuleLoader, Registry,
///     TracingOutcomeSink,
/// };
///
/// # tokio::runtime::Builder::new_current_thread().build()?.block_on(async {
/// let catalog = DirectoryCatalog::from_paths(Vec::new());
/// let loader = JsonModuleLoader::new();
/// let discovery = Discovery::new(&catalog, &loader, &DeclaredHandlers, &TracingOutcomeSink);
///
/// let mut registry: Registry<()> = Registry::new();
/// let mut bus = EventBus::new();
/// let records = discovery.register_all(&mut registry, &mut bus).await?;
///
/// assert_eq!(records, Some(Vec::new()));
/// # Ok::<(), herald_modules::ModuleError>(())
/// # })?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Discovery<'a, L, C> {
    catalog: &'a dyn PathCatalog,
    loader: &'a L,
    resolver: &'a dyn HandlerResolver<C>,
    sink: &'a dyn OutcomeSink,
}

impl<'a, L, C> Discovery<'a, L, C>
where
    L: ModuleLoader,
{
    /// Assembles a pass from its collaborators.
    #[must_use]
    pub const fn new(
        catalog: &'a dyn PathCatalog,
        loader: &'a L,
        resolver: &'a dyn HandlerResolver<C>,
        sink: &'a dyn OutcomeSink,
    ) -> Self {
        Self {
            catalog,
            loader,
            resolver,
            sink,
        }
    }

    /// Registers every valid module and returns the records emitted to the
    /// sink.
    ///
    /// Returns `Ok(None)` without emitting anything when the catalog has no
    /// path set.
    ///
    /// # Errors
    ///
    /// Returns the first [`ModuleError`] raised while loading a file. Records
    /// collected before the failure are not emitted.
    pub async fn register_all<E>(
        &self,
        registry: &mut Registry<C>,
        emitter: &mut E,
    ) -> Result<Option<Vec<OutcomeRecord>>, ModuleError>
    where
        E: EventEmitter<C>,
    {
        let Some(paths) = self.catalog.all_paths() else {
            debug!(
                target: "herald_modules::discovery",
                "catalog has no path set; nothing to register"
            );
            return Ok(None);
        };

        let mut registrar = Registrar::new(registry, emitter);
        let mut recorder = OutcomeRecorder::new();
        for path in paths
            .iter()
            .filter(|path| is_module_path(path.full_path().as_str()))
        {
            let record = self.process(path, &mut registrar).await?;
            debug!(
                target: "herald_modules::discovery",
                path = %path.full_path(),
                name = record.name(),
                state = %record.state(),
                "processed module file"
            );
            recorder.add(record);
        }
        Ok(Some(recorder.emit(self.sink)))
    }

    async fn process<E>(
        &self,
        path: &ModulePath,
        registrar: &mut Registrar<'_, C, E>,
    ) -> Result<OutcomeRecord, ModuleError>
    where
        E: EventEmitter<C>,
    {
        let export = self.loader.import_file(path.full_path()).await?;
        let record = match classify(export, self.resolver) {
            Ok(ClassifiedModule::Command(command)) => {
                register_command(&command, path.full_path(), registrar)
            }
            Ok(ClassifiedModule::Event(event)) => {
                register_event(&event, path.full_path(), registrar)
            }
            Err(error) => OutcomeRecord::error(
                derive_name(error.declared_name(), path.full_path()),
                format!("the file was empty or not exported correctly ({error})"),
            ),
        };
        Ok(record)
    }
}

fn register_command<C, E>(
    command: &CommandModule<C>,
    path: &Utf8Path,
    registrar: &mut Registrar<'_, C, E>,
) -> OutcomeRecord
where
    E: EventEmitter<C>,
{
    let name = derive_name(command.name(), path);
    let deployment = command.deployment();
    match command.validate() {
        Ok(()) => {
            registrar.register_command(command);
            OutcomeRecord::success(name, ModuleKind::Command, deployment)
        }
        Err(error) => OutcomeRecord::fail(
            name,
            ModuleKind::Command,
            deployment,
            format!("the command is invalid: {error}"),
        ),
    }
}

fn register_event<C, E>(
    event: &EventModule<C>,
    path: &Utf8Path,
    registrar: &mut Registrar<'_, C, E>,
) -> OutcomeRecord
where
    E: EventEmitter<C>,
{
    let name = derive_name(event.name(), path);
    match event.validate() {
        Ok(()) => {
            registrar.register_event(event);
            OutcomeRecord::success(name, ModuleKind::Event, Deployment::Global)
        }
        Err(error) => OutcomeRecord::fail(
            name,
            ModuleKind::Event,
            Deployment::Global,
            format!("the event is invalid: {error}"),
        ),
    }
}

impl<L, C> std::fmt::Debug for Discovery<'_, L, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Discovery").finish_non_exhaustive()
    }
}
