//! `herald` checks a bot directory: it loads the data files, runs module
//! discovery, prints the outcome table and exits non-zero when anything
//! failed.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use herald::{
    LocalGateway, Startup, StartupError, StartupReporter, StructuredStartupReporter,
    SystemConfigLoader, bootstrap_with,
};
use herald_modules::{
    DeclaredHandlers, JsonModuleLoader, OutcomeRecord, RecordState, TracingOutcomeSink,
    render_table,
};

fn main() -> ExitCode {
    let reporter: Arc<dyn StartupReporter> = Arc::new(StructuredStartupReporter::new());
    match check(&reporter) {
        Ok(records) => report(&records),
        Err(error) => {
            // Nothing more can be reported when stderr is closed.
            writeln!(io::stderr().lock(), "herald: {error}").unwrap_or_default();
            ExitCode::FAILURE
        }
    }
}

fn check(reporter: &Arc<dyn StartupReporter>) -> Result<Vec<OutcomeRecord>, StartupError> {
    let launch = bootstrap_with(&SystemConfigLoader, reporter.as_ref())?;
    let loader = JsonModuleLoader::new();
    let startup = Startup::new(
        launch.catalog(),
        &loader,
        &DeclaredHandlers,
        &TracingOutcomeSink,
        Arc::clone(reporter),
    );
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|source| StartupError::Runtime {
            source: Arc::new(source),
        })?;
    let session = runtime.block_on(startup.prepare(LocalGateway::new()))?;
    Ok(session.records().to_vec())
}

fn report(records: &[OutcomeRecord]) -> ExitCode {
    let table = render_table(records);
    if writeln!(io::stdout().lock(), "{table}").is_err() {
        return ExitCode::FAILURE;
    }
    if records
        .iter()
        .all(|record| record.state() == RecordState::Success)
    {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
