//! Configuration inspection commands

use crate::error::CliResult;
use crate::output::{self, print_success, OutputFormat};
use clap::Subcommand;
use commitguard::EngineConfig;
use std::path::Path;

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration (defaults merged with the config file)
    Show,

    /// Validate and compile the configuration
    Check,
}

pub fn execute(
    command: ConfigCommands,
    path: Option<&Path>,
    format: OutputFormat,
) -> CliResult<()> {
    let config = EngineConfig::load(path)?;

    match command {
        ConfigCommands::Show => output::print_single(&config, format),
        ConfigCommands::Check => {
            let compiled = config.compile()?;
            let source = path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in defaults".to_string());
            print_success(&format!(
                "configuration valid: {source} (digest {})",
                compiled.digest()
            ));
            Ok(())
        }
    }
}
