//! Key session runner
//!
//! Owns one accumulator for the lifetime of a command and renders its
//! state in the configured output format.

use keypad_calculator::core::history::HistoryEntry;
use keypad_calculator::core::{Accumulator, Phase};
use keypad_calculator::keypad::KeypadAction;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::config::{CliConfig, OutputFormat};
use crate::error::CliResult;

/// Rendered state of a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Numeric display value
    pub display: f64,
    /// Display value as text
    pub display_text: String,
    /// Pending expression
    pub expression: String,
    /// Input phase
    pub phase: Phase,
    /// History, newest first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
}

/// A calculator session fed from key strings
#[derive(Debug)]
pub struct Session {
    acc: Accumulator,
    format: OutputFormat,
}

impl Session {
    /// Creates a session from the effective configuration
    #[must_use]
    pub fn new(config: &CliConfig) -> Self {
        Self {
            acc: Accumulator::with_config(&config.calculator),
            format: config.format,
        }
    }

    /// The session's accumulator
    #[must_use]
    pub fn accumulator(&self) -> &Accumulator {
        &self.acc
    }

    /// Presses every key of `keys`, stopping at the first rejection.
    ///
    /// An unknown key rejects the whole string before anything is pressed.
    pub fn press(&mut self, keys: &str) -> CliResult<()> {
        let actions = KeypadAction::parse_keys(keys)?;
        for action in actions {
            action.apply(&mut self.acc)?;
        }
        Ok(())
    }

    /// Current state as a report
    #[must_use]
    pub fn report(&self, with_history: bool) -> Report {
        let snapshot = self.acc.snapshot();
        Report {
            display: snapshot.display,
            display_text: snapshot.display_text,
            expression: snapshot.expression,
            phase: snapshot.phase,
            history: with_history.then(|| self.acc.history().iter_rev().cloned().collect()),
        }
    }

    /// Renders the current state in the session's format
    pub fn render(&self, with_history: bool) -> CliResult<String> {
        let report = self.report(with_history);
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(&report)?),
            OutputFormat::Text => Ok(render_text(&report)),
        }
    }
}

fn render_text(report: &Report) -> String {
    let mut out = report.display_text.clone();
    if let Some(history) = &report.history {
        if !report.expression.is_empty() {
            out.push_str(&format!("\nexpression: {}", report.expression));
        }
        for entry in history {
            out.push_str(&format!("\n  {}", entry.display()));
        }
    }
    out
}

/// Runs `keypad press`
pub fn run_press(config: &CliConfig, keys: &[String], with_history: bool) -> CliResult<String> {
    let mut session = Session::new(config);
    for chunk in keys {
        session.press(chunk)?;
    }
    info!(keys = %keys.join(" "), "keys pressed");
    session.render(with_history)
}

/// Runs `keypad repl` over arbitrary streams.
///
/// Rejected lines are reported on `err` and the session continues; the
/// count of rejected lines is returned. `quit` or `exit` ends the session.
pub fn run_repl<R, W, E>(
    config: &CliConfig,
    input: R,
    out: &mut W,
    err: &mut E,
    with_history: bool,
) -> CliResult<usize>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut session = Session::new(config);
    let mut rejected = 0;

    for line in input.lines() {
        let line = line?;
        let keys = line.trim();
        if keys.is_empty() {
            continue;
        }
        if matches!(keys, "quit" | "exit") {
            break;
        }

        if let Err(e) = session.press(keys) {
            warn!(line = keys, error = %e, "line rejected");
            writeln!(err, "Error: {e}")?;
            rejected += 1;
        }
        writeln!(out, "{}", session.render(with_history)?)?;
    }

    info!(rejected, "session ended");
    Ok(rejected)
}
