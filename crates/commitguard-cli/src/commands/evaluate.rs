//! Single-commit evaluation

use crate::commands::read_input;
use crate::error::{CliError, CliResult};
use crate::output::{self, print_error, print_info, print_success, print_warning, OutputFormat};
use clap::Args;
use commitguard::{AuditRecord, CommitFacts, CommitGuardEngine};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Commit facts JSON document (`-` or absent reads stdin)
    #[arg(conflicts_with = "message")]
    pub input: Option<PathBuf>,

    /// Evaluate this commit message instead of a facts document
    #[arg(short, long)]
    pub message: Option<String>,

    /// Changed file path, repeatable (with --message)
    #[arg(short = 'f', long = "file", requires = "message")]
    pub files: Vec<String>,

    /// Unified diff to include (with --message)
    #[arg(long, requires = "message")]
    pub diff: Option<PathBuf>,

    /// Commit identifier (with --message)
    #[arg(long, default_value = "WORKTREE")]
    pub sha: String,

    /// Print the full audit record instead of the decision
    #[arg(long)]
    pub audit: bool,
}

impl EvaluateArgs {
    fn facts(&self) -> CliResult<CommitFacts> {
        match &self.message {
            Some(message) => {
                let diff = match &self.diff {
                    Some(path) => std::fs::read_to_string(path)?,
                    None => String::new(),
                };
                Ok(CommitFacts::new(self.sha.clone(), message.clone())
                    .with_files(self.files.iter().cloned())
                    .with_diff(diff))
            }
            None => {
                let json = read_input(self.input.as_deref())?;
                CommitFacts::from_json(&json)
                    .map_err(|e| CliError::InvalidInput(e.to_string()))
            }
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct FieldRow {
    field: &'static str,
    value: String,
}

fn summary_rows(record: &AuditRecord) -> Vec<FieldRow> {
    let report = &record.report;
    let template = report
        .classification
        .template_id()
        .unwrap_or("-")
        .to_string();
    let row = |field, value: String| FieldRow { field, value };

    vec![
        row("sha", record.sha.clone()),
        row(
            "decision",
            if record.was_allowed() { "ALLOWED" } else { "DENIED" }.to_string(),
        ),
        row("basis", format!("{:?}", report.decision.basis)),
        row("domain", record.decision.domain.clone()),
        row("confidence", format!("{:.2}", record.decision.confidence)),
        row("template", template),
        row(
            "risk",
            format!("{} ({})", record.decision.risk_score, record.decision.risk_level),
        ),
        row("deployment", format!("{:?}", record.deployment_strategy)),
    ]
}

fn join(items: &std::collections::BTreeSet<String>) -> String {
    items.iter().cloned().collect::<Vec<_>>().join(", ")
}

fn print_table(record: &AuditRecord) -> CliResult<()> {
    output::print_output(summary_rows(record), OutputFormat::Table)?;

    let decision = &record.decision;
    for reason in &decision.deny_reasons {
        print_error(reason);
    }
    if !decision.required_metadata_fields.is_empty() {
        print_info(&format!(
            "required metadata: {}",
            join(&decision.required_metadata_fields)
        ));
    }
    if !decision.reviewers.is_empty() {
        print_info(&format!("reviewers: {}", join(&decision.reviewers)));
    }
    for advisory in &record.advisories {
        print_warning(advisory);
    }
    if decision.allowed {
        print_success("commit allowed");
    }
    Ok(())
}

/// Evaluate one commit and print the outcome. Returns whether it was allowed.
pub fn execute(
    args: EvaluateArgs,
    engine: &CommitGuardEngine,
    format: OutputFormat,
) -> CliResult<bool> {
    let facts = args.facts()?;
    let record = engine.evaluate_with_audit(&facts)?;

    match (format, args.audit) {
        (OutputFormat::Table, false) => print_table(&record)?,
        (_, true) => output::print_single(&record, format)?,
        (_, false) => output::print_single(&record.decision, format)?,
    }

    Ok(record.was_allowed())
}
