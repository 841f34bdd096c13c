//! Policy rule listing

use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use commitguard::CommitGuardEngine;
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Serialize, Tabled)]
struct RuleRow {
    order: usize,
    id: String,
    name: String,
    description: String,
}

/// List the rules in evaluation order
pub fn execute(engine: &CommitGuardEngine, format: OutputFormat) -> CliResult<()> {
    let rows = engine
        .evaluator()
        .rules()
        .enumerate()
        .map(|(index, rule)| RuleRow {
            order: index + 1,
            id: rule.id().to_string(),
            name: rule.name().to_string(),
            description: rule.description().to_string(),
        })
        .collect();
    output::print_output(rows, format)
}
