//! One-way synchronization engine
//!
//! Walks the remote tree depth-first, in listing order, and pulls every
//! readable, non-ignored file whose local copy is missing or differs. The
//! first fatal error (listing, local directory creation, pull) stops the
//! whole run; files pulled before that point stay on disk.

mod actions;
mod executor;
mod orchestrator;
mod reporting;

#[cfg(test)]
mod integration_tests;

use std::collections::HashMap;

pub use actions::{FileAction, SkipReason, SyncActionResolver};
pub use executor::PullExecutor;
pub use orchestrator::SyncEngine;
pub use reporting::SyncReporter;

/// Synchronization result with statistics
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    /// Remote directories listed
    pub directories: usize,
    /// Files pulled (or that would be pulled in a dry run)
    pub pulled: usize,
    /// Entries skipped
    pub skipped: usize,
    /// Skip reasons with counts
    pub skip_reasons: HashMap<String, usize>,
    /// Non-fatal anomalies
    pub warnings: Vec<String>,
}

impl SyncResult {
    /// Record a skipped entry
    pub fn record_skip(&mut self, reason: SkipReason) {
        self.skipped += 1;
        *self.skip_reasons.entry(reason.to_string()).or_insert(0) += 1;
    }

    /// Record a non-fatal anomaly
    pub fn record_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Total transfers performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.pulled
    }

    /// Whether the run finished without anomalies
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.warnings.is_empty()
    }
}
