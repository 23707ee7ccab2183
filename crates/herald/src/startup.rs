//! Startup sequence: bot data, module discovery, core events and login.
//!
//! [`Startup::prepare`] reads the `info`, `vars` and `style` data files,
//! builds the [`Bot`], runs the discovery pass against the gateway, and
//! attaches the core `ready` and `interactionCreate` listeners. The returned
//! [`Session`] is ready to log in.

use std::sync::Arc;

use herald_modules::{
    ClientEvent, Discovery, EventEmitter, HandlerError, HandlerResolver, Interaction, ModuleError,
    ModuleLoader, OutcomeRecord, OutcomeSink, OutcomeSummary, PathCatalog,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::bot::Bot;
use crate::data::{BotInfo, BotStyle, BotVars, INFO_FILE, STYLE_FILE, VARS_FILE};
use crate::error::StartupError;
use crate::gateway::Gateway;
use crate::reporter::StartupReporter;

/// Collaborators of one startup.
pub struct Startup<'a, L> {
    catalog: &'a dyn PathCatalog,
    loader: &'a L,
    resolver: &'a dyn HandlerResolver<Bot>,
    sink: &'a dyn OutcomeSink,
    reporter: Arc<dyn StartupReporter>,
}

impl<'a, L> Startup<'a, L>
where
    L: ModuleLoader,
{
    /// Assembles a startup from its collaborators.
    #[must_use]
    pub const fn new(
        catalog: &'a dyn PathCatalog,
        loader: &'a L,
        resolver: &'a dyn HandlerResolver<Bot>,
        sink: &'a dyn OutcomeSink,
        reporter: Arc<dyn StartupReporter>,
    ) -> Self {
        Self {
            catalog,
            loader,
            resolver,
            sink,
            reporter,
        }
    }

    /// Builds the bot and wires every module into `gateway`.
    ///
    /// # Errors
    ///
    /// Returns a [`StartupError`] when a data file is missing, unreadable or
    /// malformed, or when discovery hits an infrastructure failure. Invalid
    /// modules do not fail startup; they appear in the session records.
    pub async fn prepare<G>(&self, mut gateway: G) -> Result<Session<G>, StartupError>
    where
        G: Gateway,
    {
        match self.assemble(&mut gateway).await {
            Ok((bot, records)) => {
                self.reporter
                    .modules_registered(&OutcomeSummary::of(&records));
                Ok(Session {
                    bot,
                    gateway,
                    records,
                    reporter: Arc::clone(&self.reporter),
                })
            }
            Err(error) => {
                self.reporter.startup_failed(&error);
                Err(error)
            }
        }
    }

    async fn assemble<G>(&self, gateway: &mut G) -> Result<(Bot, Vec<OutcomeRecord>), StartupError>
    where
        G: Gateway,
    {
        let info: BotInfo = self.retrieve(INFO_FILE).await?.unwrap_or_default();
        let vars: BotVars = self.retrieve(VARS_FILE).await?.unwrap_or_default();
        let style: Option<BotStyle> = self.retrieve(STYLE_FILE).await?;
        let mut bot = Bot::new(info, vars, style);

        let discovery = Discovery::new(self.catalog, self.loader, self.resolver, self.sink);
        let records = discovery
            .register_all(bot.registry_mut(), gateway)
            .await
            .map_err(|source| StartupError::Discovery { source })?
            .unwrap_or_default();

        attach_core_events(gateway);
        Ok((bot, records))
    }

    /// Loads the data file `name`; `Ok(None)` keeps the caller's default.
    async fn retrieve<T>(&self, name: &str) -> Result<Option<T>, StartupError>
    where
        T: DeserializeOwned,
    {
        let path = self
            .catalog
            .find_by_name(name)
            .ok_or_else(|| StartupError::MissingData {
                source: ModuleError::NotFound {
                    name: name.to_owned(),
                },
            })?;
        let export = self
            .loader
            .import_file(path.full_path())
            .await
            .map_err(|source| StartupError::LoadData {
                name: name.to_owned(),
                source,
            })?;
        self.reporter.data_retrieved(name, export.is_some());
        export
            .map(serde_json::from_value)
            .transpose()
            .map_err(|source| StartupError::InvalidData {
                name: name.to_owned(),
                source,
            })
    }
}

impl<L> std::fmt::Debug for Startup<'_, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Startup").finish_non_exhaustive()
    }
}

fn attach_core_events<G>(gateway: &mut G)
where
    G: EventEmitter<Bot>,
{
    gateway.on(ClientEvent::Ready, Arc::new(log_ready));
    gateway.on(ClientEvent::InteractionCreate, Arc::new(dispatch_interaction));
}

fn log_ready(bot: &Bot, _args: &[Value]) -> Result<(), HandlerError> {
    info!(
        target: "herald::startup",
        client_id = %bot.info().client_id,
        commands = bot.registry().len(),
        "client is ready"
    );
    Ok(())
}

fn dispatch_interaction(bot: &Bot, args: &[Value]) -> Result<(), HandlerError> {
    let payload = args
        .first()
        .ok_or_else(|| HandlerError::new("interactionCreate carried no payload"))?;
    let interaction = Interaction::deserialize(payload)
        .map_err(|error| HandlerError::new(format!("malformed interaction: {error}")))?;
    debug!(
        target: "herald::startup",
        command = interaction.command_name(),
        "interaction received"
    );
    bot.dispatch(&interaction)
        .map_err(|error| HandlerError::new(error.to_string()))
}

/// A prepared bot bound to its gateway.
pub struct Session<G> {
    bot: Bot,
    gateway: G,
    records: Vec<OutcomeRecord>,
    reporter: Arc<dyn StartupReporter>,
}

impl<G> Session<G>
where
    G: Gateway,
{
    /// The prepared bot.
    #[must_use]
    pub const fn bot(&self) -> &Bot {
        &self.bot
    }

    /// The gateway the modules were attached to.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Outcome records of the discovery pass, in discovery order.
    #[must_use]
    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    /// Totals of the discovery pass.
    #[must_use]
    pub fn summary(&self) -> OutcomeSummary {
        OutcomeSummary::of(&self.records)
    }

    /// Logs in with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError::MissingToken`] when no non-blank token is
    /// supplied and [`StartupError::Login`] when the gateway refuses it.
    pub async fn login(&mut self, token: Option<&str>) -> Result<(), StartupError> {
        let outcome = match token.filter(|secret| !secret.trim().is_empty()) {
            Some(secret) => self
                .gateway
                .login(secret)
                .await
                .map_err(|source| StartupError::Login { source }),
            None => Err(StartupError::MissingToken),
        };
        match &outcome {
            Ok(()) => self.reporter.login_succeeded(self.bot.info()),
            Err(error) => self.reporter.startup_failed(error),
        }
        outcome
    }

    /// Raises `event` on the gateway with the bot as context.
    ///
    /// # Errors
    ///
    /// Returns the first listener failure.
    pub fn emit(&self, event: ClientEvent, args: &[Value]) -> Result<usize, HandlerError> {
        self.gateway.emit(&self.bot, event, args)
    }
}

impl<G> std::fmt::Debug for Session<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("bot", &self.bot)
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}
