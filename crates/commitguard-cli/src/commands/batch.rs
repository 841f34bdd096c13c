//! Batch evaluation over a JSON Lines stream of commit facts

use crate::commands::read_input;
use crate::error::{CliError, CliResult};
use crate::output::{self, print_error, print_success, print_warning, OutputFormat};
use clap::Args;
use commitguard::{AuditRecord, BatchSummary, CommitFacts, CommitGuardEngine, DEFAULT_CONCURRENCY};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// JSON Lines file, one commit facts document per line (`-` or absent reads stdin)
    pub input: Option<PathBuf>,

    /// Maximum evaluations in flight
    #[arg(short = 'j', long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
}

#[derive(Debug, Serialize, Tabled)]
struct BatchRow {
    sha: String,
    allowed: bool,
    domain: String,
    risk: String,
    reasons: usize,
}

impl From<&AuditRecord> for BatchRow {
    fn from(record: &AuditRecord) -> Self {
        Self {
            sha: record.sha.clone(),
            allowed: record.was_allowed(),
            domain: record.decision.domain.clone(),
            risk: format!("{} ({})", record.decision.risk_score, record.decision.risk_level),
            reasons: record.decision.deny_reasons.len(),
        }
    }
}

/// Parse JSON Lines input, skipping blank lines. Line numbers are 1-based.
pub fn parse_lines(input: &str) -> CliResult<Vec<CommitFacts>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map_err(|e| CliError::InvalidInput(format!("line {}: {e}", index + 1)))
        })
        .collect()
}

/// Evaluate every commit and print one result per commit in input order.
/// Returns whether all commits were allowed.
pub async fn execute(
    args: BatchArgs,
    engine: &CommitGuardEngine,
    format: OutputFormat,
) -> CliResult<bool> {
    let commits = parse_lines(&read_input(args.input.as_deref())?)?;
    let results = engine.evaluate_batch(commits, args.concurrency).await;
    let summary = BatchSummary::from_results(&results);

    let mut records = Vec::with_capacity(results.len());
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => print_error(&format!("commit #{}: {e}", index + 1)),
        }
    }

    match format {
        OutputFormat::Table => {
            output::print_output(records.iter().map(BatchRow::from).collect(), format)?;
            let line = format!(
                "{} evaluated: {} allowed, {} denied, {} failed",
                summary.total, summary.allowed, summary.denied, summary.failed
            );
            if summary.allowed == summary.total {
                print_success(&line);
            } else {
                print_warning(&line);
            }
        }
        OutputFormat::Json => {
            for record in &records {
                println!("{}", serde_json::to_string(record)?);
            }
        }
        OutputFormat::Yaml => output::print_single(&records, format)?,
    }

    Ok(summary.allowed == summary.total)
}
