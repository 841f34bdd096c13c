//! Batch evaluation
//!
//! A parallel map over the pure evaluation function: each commit is evaluated
//! on the blocking pool, at most `concurrency` at a time, and results come
//! back in input order.

use commitguard_types::CommitFacts;
use futures::stream::{self, StreamExt};
use tracing::info;

use crate::engine::CommitGuardEngine;
use crate::error::{EngineError, Result};
use crate::report::AuditRecord;

/// Default number of evaluations in flight.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Summary of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub allowed: usize,
    pub denied: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[Result<AuditRecord>]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result {
                Ok(record) if record.was_allowed() => summary.allowed += 1,
                Ok(_) => summary.denied += 1,
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }
}

impl CommitGuardEngine {
    /// Evaluate many commits concurrently, one result per commit, in order.
    ///
    /// A failure for one commit (malformed facts) does not affect the others.
    pub async fn evaluate_batch(
        &self,
        commits: Vec<CommitFacts>,
        concurrency: usize,
    ) -> Vec<Result<AuditRecord>> {
        let concurrency = concurrency.max(1);
        let total = commits.len();

        let results: Vec<Result<AuditRecord>> = stream::iter(commits)
            .map(|facts| {
                let engine = self.clone();
                async move {
                    tokio::task::spawn_blocking(move || engine.evaluate_with_audit(&facts))
                        .await
                        .map_err(|e| EngineError::Task(e.to_string()))?
                }
            })
            .buffered(concurrency)
            .collect()
            .await;

        let summary = BatchSummary::from_results(&results);
        info!(
            total,
            allowed = summary.allowed,
            denied = summary.denied,
            failed = summary.failed,
            concurrency,
            "Batch evaluation complete"
        );

        results
    }
}
