use colored::Colorize;
use serde::Serialize;

use crate::command::Command;
use crate::execute::ExecutionReport;
use crate::verify::{FieldCheck, Outcome, VerificationOutcome};

/// JSON shape of one translated `<rpc>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationReport {
    pub message_id: Option<String>,
    pub commands: Vec<String>,
    pub unsupported: usize,
}

impl TranslationReport {
    pub fn new(message_id: Option<String>, commands: &[Command]) -> Self {
        Self {
            message_id,
            commands: commands.iter().map(ToString::to_string).collect(),
            unsupported: commands.iter().filter(|c| c.is_unsupported()).count(),
        }
    }
}

/// JSON shape of an `apply` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub rpcs: Vec<AppliedRpc>,
    pub verification: Option<VerificationOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRpc {
    pub message_id: Option<String>,
    pub execution: ExecutionReport,
}

/// One command per line; sentinels highlighted.
pub fn render_commands(commands: &[Command]) -> String {
    commands
        .iter()
        .map(|cmd| {
            let line = cmd.to_string();
            if cmd.is_unsupported() {
                line.yellow().to_string()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_execution(report: &ExecutionReport) -> String {
    let mut out = Vec::new();
    for line in &report.executed {
        out.push(format!("{} {line}", "ok".green()));
    }
    for line in &report.skipped {
        out.push(format!("{} {line}", "skip".yellow()));
    }
    out.push(
        format!(
            "executed={} skipped={}",
            report.executed.len(),
            report.skipped.len()
        )
        .cyan()
        .to_string(),
    );
    out.join("\n")
}

pub fn render_checks(checks: &[FieldCheck]) -> String {
    let mut out = Vec::new();
    for check in checks {
        let actual = check.actual.as_deref().unwrap_or("<absent>");
        let line = format!(
            "{} ({}) expected={} actual={}",
            check.field, check.device_field, check.expected, actual
        );
        out.push(match check.outcome {
            Outcome::Match => format!("{} {line}", "MATCH".green()),
            Outcome::Mismatch => format!("{} {line}", "MISMATCH".red()),
            Outcome::Missing => format!("{} {line}", "MISSING".red()),
        });
    }
    out.join("\n")
}

pub fn render_verification(outcome: &VerificationOutcome) -> String {
    match outcome {
        VerificationOutcome::Skipped => "verification skipped: nothing to read back"
            .yellow()
            .to_string(),
        VerificationOutcome::Checked(checks) => {
            let failed = outcome.failures().count();
            let summary = format!("checked={} failed={failed}", checks.len()).cyan();
            format!("{}\n{summary}", render_checks(checks))
        }
    }
}
