//! Run lifecycle management.
//!
//! The Runs primitive provides run creation, listing, lifecycle transitions
//! and usage accounting. Every method delegates to the shared tracker.
//!
//! # Example
//!
//! ```
//! use runplane::prelude::*;
//!
//! let rp = Runplane::new();
//! let run = rp.runs.create("payments-api", "codex:gpt-5")?;
//! rp.runs.claim(&run)?;
//! rp.runs.start(&run)?;
//! rp.runs.record_usage(&run, 12_890, Usd::from_cents(91))?;
//! rp.runs.complete(&run)?;
//! assert_eq!(rp.runs.get(&run)?.status, RunStatus::Completed);
//! # Ok::<(), runplane::Error>(())
//! ```

use crate::error::Result;
use crate::types::{Aggregate, RunFilter, RunId, RunSnapshot, RunStatus, Usd};
use runplane_engine::Tracker;
use std::sync::Arc;

/// Run lifecycle operations.
///
/// Access via `rp.runs`.
#[derive(Debug, Clone)]
pub struct Runs {
    tracker: Arc<Tracker>,
}

impl Runs {
    pub(crate) fn new(tracker: Arc<Tracker>) -> Self {
        Self { tracker }
    }

    // =========================================================================
    // Creation and reads
    // =========================================================================

    /// Create a new run in `queued`.
    pub fn create(&self, repo: &str, agent: &str) -> Result<RunId> {
        Ok(self.tracker.create_run(repo, agent)?)
    }

    /// Get a snapshot of a run.
    pub fn get(&self, run: &RunId) -> Result<RunSnapshot> {
        Ok(self.tracker.get_run(run)?)
    }

    /// List runs, most recently updated first.
    ///
    /// # Arguments
    ///
    /// * `filter` - Restrict to matching runs (None for all)
    /// * `limit` - Maximum runs to return (None for the configured default)
    ///
    /// # Example
    ///
    /// ```
    /// # use runplane::prelude::*;
    /// # let rp = Runplane::new();
    /// // Runs parked on an approval gate
    /// let gated = rp.runs.list(Some(&RunFilter::new().status(RunStatus::WaitingApproval)), None);
    /// assert!(gated.is_empty());
    /// ```
    pub fn list(&self, filter: Option<&RunFilter>, limit: Option<usize>) -> Vec<RunSnapshot> {
        self.tracker.list_runs(filter, limit)
    }

    /// Check if a run exists.
    pub fn exists(&self, run: &RunId) -> bool {
        self.tracker.contains(run)
    }

    /// Check if a run exists and has not finished.
    pub fn is_active(&self, run: &RunId) -> bool {
        self.tracker
            .get_run(run)
            .map(|snap| snap.status.is_active())
            .unwrap_or(false)
    }

    /// Number of runs.
    pub fn count(&self) -> usize {
        self.tracker.run_count()
    }

    /// Token, cost and failure totals.
    pub fn aggregate(&self, filter: Option<&RunFilter>) -> Aggregate {
        self.tracker.aggregate(filter)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Move a run to `to`, validated against the state machine.
    pub fn transition(&self, run: &RunId, to: RunStatus, reason: Option<&str>) -> Result<RunSnapshot> {
        Ok(self.tracker.transition(run, to, reason)?)
    }

    /// A worker takes a queued (or retry-scheduled) run.
    pub fn claim(&self, run: &RunId) -> Result<RunSnapshot> {
        self.transition(run, RunStatus::Claimed, None)
    }

    /// The claiming worker begins execution.
    pub fn start(&self, run: &RunId) -> Result<RunSnapshot> {
        self.transition(run, RunStatus::Running, None)
    }

    /// Park a running run on a policy gate.
    pub fn request_approval(&self, run: &RunId, policy: &str) -> Result<RunSnapshot> {
        self.transition(run, RunStatus::WaitingApproval, Some(policy))
    }

    /// Approval granted: resume execution.
    pub fn approve(&self, run: &RunId) -> Result<RunSnapshot> {
        self.transition(run, RunStatus::Running, Some("approved"))
    }

    /// Approval denied: cancel the run.
    pub fn deny(&self, run: &RunId) -> Result<RunSnapshot> {
        self.transition(run, RunStatus::Canceled, Some("approval denied"))
    }

    /// Normal finish.
    pub fn complete(&self, run: &RunId) -> Result<RunSnapshot> {
        self.transition(run, RunStatus::Completed, None)
    }

    /// Unrecoverable error; `error` is kept on the run.
    pub fn fail(&self, run: &RunId, error: &str) -> Result<RunSnapshot> {
        self.transition(run, RunStatus::Failed, Some(error))
    }

    /// Recoverable error; the run waits to be re-claimed.
    pub fn schedule_retry(&self, run: &RunId, reason: &str) -> Result<RunSnapshot> {
        self.transition(run, RunStatus::RetryScheduled, Some(reason))
    }

    /// Operator cancel.
    pub fn cancel(&self, run: &RunId, reason: Option<&str>) -> Result<RunSnapshot> {
        self.transition(run, RunStatus::Canceled, reason)
    }

    // =========================================================================
    // Usage
    // =========================================================================

    /// Add token and cost usage to an in-flight run.
    pub fn record_usage(&self, run: &RunId, tokens: i64, cost: Usd) -> Result<RunSnapshot> {
        Ok(self.tracker.record_usage(run, tokens, cost)?)
    }
}
