//! CLI command implementations

pub mod batch;
pub mod config;
pub mod evaluate;
pub mod rules;

use crate::error::CliResult;
use std::io::Read;
use std::path::Path;

/// Read a document from a file, or from stdin when the path is absent or `-`.
pub fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
