//! Sequential execution of translated commands.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::command::Command;
use crate::session::{DeviceSession, Reply, RunError};

/// A command that failed on the device. Earlier commands stay applied.
#[derive(Debug, Error)]
#[error("command `{command}` failed after {completed} successful command(s): {source}")]
pub struct ExecuteError {
    pub command: String,
    /// Commands that ran successfully before this one.
    pub completed: usize,
    #[source]
    pub source: RunError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    /// Rendered commands sent to the device, in order.
    pub executed: Vec<String>,
    /// Sentinel lines that were not sent.
    pub skipped: Vec<String>,
}

/// Run `commands` one after another, stopping at the first failure.
///
/// Sentinel commands are skipped with a warning. No retry and no rollback.
pub fn execute<S: DeviceSession + ?Sized>(
    session: &mut S,
    commands: &[Command],
) -> Result<ExecutionReport, ExecuteError> {
    let mut report = ExecutionReport::default();
    for cmd in commands {
        let rendered = cmd.to_string();
        let Some(api) = cmd.as_exec() else {
            warn!(command = %rendered, "skipping unsupported mapping");
            report.skipped.push(rendered);
            continue;
        };

        info!(command = %rendered, "executing");
        session
            .run(&api.api_words())
            .map_err(|source| ExecuteError {
                command: rendered.clone(),
                completed: report.executed.len(),
                source,
            })?;
        report.executed.push(rendered);
    }
    Ok(report)
}

/// Run the executable commands and return each reply, skipping sentinels.
pub fn query<S: DeviceSession + ?Sized>(
    session: &mut S,
    commands: &[Command],
) -> Result<Vec<Reply>, ExecuteError> {
    let mut replies = Vec::new();
    for api in commands.iter().filter_map(Command::as_exec) {
        let reply = session.run(&api.api_words()).map_err(|source| ExecuteError {
            command: api.to_string(),
            completed: replies.len(),
            source,
        })?;
        replies.push(reply);
    }
    Ok(replies)
}
