//! CommitGuard CLI - commit compliance checks from the terminal or CI
//!
//! - Evaluate a single commit (facts document or inline message)
//! - Evaluate a JSON Lines batch of commits
//! - Inspect and validate the engine configuration
//! - List the policy rules in evaluation order
//!
//! Exit status is 0 when every evaluated commit is allowed, 1 when any commit
//! is denied and 2 when the command itself fails.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use commands::{batch, config, evaluate, rules};
use commitguard::CommitGuardEngine;
use error::CliResult;

/// CommitGuard CLI application
#[derive(Parser)]
#[command(name = "commitguard")]
#[command(about = "CommitGuard - commit compliance risk and policy engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (YAML); built-in tables when absent
    #[arg(short, long, env = "COMMITGUARD_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table", global = true)]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single commit
    #[command(alias = "check")]
    Evaluate(evaluate::EvaluateArgs),

    /// Evaluate a JSON Lines stream of commits
    Batch(batch::BatchArgs),

    /// Inspect the engine configuration
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// List policy rules in evaluation order
    Rules,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output::print_error(&e.to_string());
            std::process::exit(2);
        }
    }
}

/// Execute the command. `Ok(false)` means at least one commit was denied.
async fn run(cli: Cli) -> CliResult<bool> {
    let config_path = cli.config.as_deref();
    debug!(config = ?config_path, format = ?cli.output, "Starting command");
    match cli.command {
        Commands::Config { command } => {
            config::execute(command, config_path, cli.output)?;
            Ok(true)
        }
        Commands::Evaluate(args) => {
            let engine = CommitGuardEngine::load(config_path)?;
            evaluate::execute(args, &engine, cli.output)
        }
        Commands::Batch(args) => {
            let engine = CommitGuardEngine::load(config_path)?;
            batch::execute(args, &engine, cli.output).await
        }
        Commands::Rules => {
            rules::execute(&CommitGuardEngine::load(config_path)?, cli.output)?;
            Ok(true)
        }
    }
}
