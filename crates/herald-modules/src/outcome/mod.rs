//! Outcome records describing what happened to every discovered file.
//!
//! The [`OutcomeRecorder`] collects one [`OutcomeRecord`] per discovered path
//! in discovery order. [`OutcomeRecorder::emit`] consumes the recorder, so the
//! aggregate reaches the [`OutcomeSink`] exactly once and never piecemeal.

use std::fmt;
use std::iter;

use serde::Serialize;

use crate::command::Deployment;

/// Kind of module a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    /// A command module.
    Command,
    /// An event module.
    Event,
}

impl ModuleKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    /// The module was registered.
    Success,
    /// The module was recognised but failed validation.
    Fail,
    /// The file did not export a recognisable module.
    Error,
}

impl RecordState {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Fail => "fail",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic entry for one discovered file.
///
/// `message` is present exactly when the state is not [`RecordState::Success`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeRecord {
    name: String,
    kind: Option<ModuleKind>,
    deployment: Option<Deployment>,
    state: RecordState,
    message: Option<String>,
}

impl OutcomeRecord {
    /// Records a registered module.
    #[must_use]
    pub fn success(name: impl Into<String>, kind: ModuleKind, deployment: Deployment) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            deployment: Some(deployment),
            state: RecordState::Success,
            message: None,
        }
    }

    /// Records a recognised module that failed validation.
    #[must_use]
    pub fn fail(
        name: impl Into<String>,
        kind: ModuleKind,
        deployment: Deployment,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            deployment: Some(deployment),
            state: RecordState::Fail,
            message: Some(message.into()),
        }
    }

    /// Records a file that did not export a recognisable module.
    #[must_use]
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            deployment: None,
            state: RecordState::Error,
            message: Some(message.into()),
        }
    }

    /// Best-effort module name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Module kind, unset for unrecognised files.
    #[must_use]
    pub const fn kind(&self) -> Option<ModuleKind> {
        self.kind
    }

    /// Deployment scope, unset for unrecognised files.
    #[must_use]
    pub const fn deployment(&self) -> Option<Deployment> {
        self.deployment
    }

    /// Registration result.
    #[must_use]
    pub const fn state(&self) -> RecordState {
        self.state
    }

    /// Explanation for a non-success state.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Per-state totals of a record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeSummary {
    /// Registered modules.
    pub success: usize,
    /// Modules that failed validation.
    pub fail: usize,
    /// Files without a recognisable module.
    pub error: usize,
}

impl OutcomeSummary {
    /// Tallies `records`.
    #[must_use]
    pub fn of(records: &[OutcomeRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            match record.state() {
                RecordState::Success => summary.success += 1,
                RecordState::Fail => summary.fail += 1,
                RecordState::Error => summary.error += 1,
            }
            summary
        })
    }

    /// Total number of records.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.success + self.fail + self.error
    }

    /// Returns `true` when every record succeeded.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.fail == 0 && self.error == 0
    }
}

impl fmt::Display for OutcomeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} modules: {} registered, {} failed, {} errored",
            self.total(),
            self.success,
            self.fail,
            self.error
        )
    }
}

/// Logging boundary receiving the full record set once per discovery pass.
pub trait OutcomeSink {
    /// Renders the ordered record set.
    fn emit(&self, records: &[OutcomeRecord]);
}

/// Sink that reports every record through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingOutcomeSink;

impl OutcomeSink for TracingOutcomeSink {
    fn emit(&self, records: &[OutcomeRecord]) {
        for record in records {
            let kind = record.kind().map_or("-", ModuleKind::as_str);
            let deployment = record.deployment().map_or("-", Deployment::as_str);
            match record.state() {
                RecordState::Success => tracing::info!(
                    target: "herald_modules::outcome",
                    name = record.name(),
                    kind,
                    deployment,
                    state = %record.state(),
                    "module registered"
                ),
                RecordState::Fail | RecordState::Error => tracing::warn!(
                    target: "herald_modules::outcome",
                    name = record.name(),
                    kind,
                    deployment,
                    state = %record.state(),
                    message = record.message().unwrap_or_default(),
                    "module skipped"
                ),
            }
        }
        let summary = OutcomeSummary::of(records);
        tracing::info!(
            target: "herald_modules::outcome",
            success = summary.success,
            fail = summary.fail,
            error = summary.error,
            "{summary}"
        );
    }
}

/// Accumulates records in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeRecorder {
    records: Vec<OutcomeRecord>,
}

impl OutcomeRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a record.
    pub fn add(&mut self, record: OutcomeRecord) {
        self.records.push(record);
    }

    /// Records collected so far, in insertion order.
    #[must_use]
    pub fn records(&self) -> &[OutcomeRecord] {
        &self.records
    }

    /// Number of records collected.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Per-state totals of the collected records.
    #[must_use]
    pub fn summary(&self) -> OutcomeSummary {
        OutcomeSummary::of(&self.records)
    }

    /// Hands the full record set to `sink` and returns it.
    #[must_use]
    pub fn emit(self, sink: &dyn OutcomeSink) -> Vec<OutcomeRecord> {
        sink.emit(&self.records);
        self.records
    }
}

const TABLE_HEADERS: [&str; 5] = ["NAME", "KIND", "DEPLOYMENT", "STATE", "MESSAGE"];

/// Renders records as a fixed-width text table, one row per record.
///
/// # Example
///
/// ```
/// use herald_modules::{Deployment, ModuleKind, OutcomeRecord, render_table};
///
/// let table = render_table(&[OutcomeRecord::success(
///     "ping",
///     ModuleKind::Command,
///     Deployment::Global,
/// )]);
/// assert!(table.lines().nth(2).is_some_and(|row| row.starts_with("ping")));
/// ```
#[must_use]
pub fn render_table(records: &[OutcomeRecord]) -> String {
    let rows: Vec<[&str; 5]> = records
        .iter()
        .map(|record| {
            [
                record.name(),
                record.kind().map_or("-", ModuleKind::as_str),
                record.deployment().map_or("-", Deployment::as_str),
                record.state().as_str(),
                record.message().unwrap_or(""),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS, &widths);
    let rule = widths.map(|width| "-".repeat(width));
    push_row(&mut out, &rule.each_ref().map(String::as_str), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[&str; 5], widths: &[usize; 5]) {
    let mut line = String::new();
    for (cell, width) in cells.iter().zip(widths) {
        line.push_str(cell);
        let padding = width.saturating_sub(cell.chars().count()) + 2;
        line.extend(iter::repeat_n(' ', padding));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
