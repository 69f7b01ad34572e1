//! Run lifecycle tracker
//!
//! The tracker is the sole mutator of run and timeline state.
//!
//! ## Operations
//!
//! | Operation | Event appended | Errors |
//! |-----------|----------------|--------|
//! | `create_run` | `run.created` | `InvalidInput` |
//! | `transition` | `run.<to>` | `RunNotFound`, `InvalidTransition` |
//! | `record_usage` | none | `RunNotFound`, `InvalidDelta`, `TerminalRun` |
//! | `append_event` | the given event | `RunNotFound`, `InvalidInput` |
//! | `get_run`, `list_events` | none | `RunNotFound` |
//! | `list_runs`, `recent_events`, `aggregate`, `overview` | none | none |
//!
//! ## Atomicity
//!
//! Every mutation validates first and writes second, under the run's own
//! lock. A rejected operation returns before anything is written, so state
//! is never partially updated and no event is appended.
//!
//! Mutations also hold the store epoch shared. Multi-run reads take it
//! exclusively while copying, so they see every run as of the same instant.

use crate::clock::{Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::query::{Aggregate, Overview, RunFilter};
use crate::store::{RunRecord, RunStore};
use runplane_core::{
    EventKind, RunId, RunSnapshot, RunStatus, Timestamp, TimelineEvent, TrackerError,
    TrackerResult, Usd,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authoritative store of runs and their timelines
#[derive(Debug)]
pub struct Tracker {
    store: RunStore,
    clock: Arc<dyn Clock>,
    config: TrackerConfig,
}

impl Tracker {
    /// Tracker with default config and the system clock
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default(), Arc::new(SystemClock))
    }

    /// Tracker with explicit config and clock
    pub fn with_config(config: TrackerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RunStore::new(),
            clock,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Number of runs ever created
    pub fn run_count(&self) -> usize {
        self.store.len()
    }

    /// Check if a run exists
    pub fn contains(&self, run: &RunId) -> bool {
        self.store.contains(run)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a run in `queued` with zero usage
    pub fn create_run(&self, repo: &str, agent: &str) -> TrackerResult<RunId> {
        let repo = repo.trim();
        let agent = agent.trim();
        if repo.is_empty() {
            return Err(TrackerError::InvalidInput("repo must not be empty".into()));
        }
        if agent.is_empty() {
            return Err(TrackerError::InvalidInput("agent must not be empty".into()));
        }

        let now = self.clock.now();
        let run_id = RunId::new();
        let mut record = RunRecord::new(
            self.store.next_run_seq(),
            RunSnapshot {
                id: run_id,
                repo: repo.to_string(),
                agent: agent.to_string(),
                status: RunStatus::Queued,
                tokens: 0,
                cost_usd: Usd::ZERO,
                created_at: now,
                updated_at: now,
                started_at: None,
                ended_at: None,
                attempts: 0,
                error: None,
            },
        );
        record.append(
            self.store.next_event_id(),
            EventKind::Run,
            "run.created".to_string(),
            now,
        );
        {
            let _epoch = self.store.mutation();
            self.store.insert(record);
        }

        info!(run_id = %run_id, repo, agent, "run created");
        Ok(run_id)
    }

    /// Move a run along one edge of the state machine
    ///
    /// A non-empty `reason` is appended to the event label, and for
    /// transitions into `failed` it is kept as the run's error.
    pub fn transition(
        &self,
        run: &RunId,
        to: RunStatus,
        reason: Option<&str>,
    ) -> TrackerResult<RunSnapshot> {
        let handle = self.handle(run)?;
        let _epoch = self.store.mutation();
        let mut record = handle.lock();

        let from = record.run.status;
        if !from.can_transition_to(to) {
            warn!(run_id = %run, %from, %to, "rejected transition");
            return Err(TrackerError::InvalidTransition {
                run_id: *run,
                from,
                to,
            });
        }

        let now = self.clock.now();
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| self.truncate(r));

        let state = &mut record.run;
        state.status = to;
        state.updated_at = now;
        match to {
            RunStatus::Claimed => state.attempts = state.attempts.saturating_add(1),
            RunStatus::Running if state.started_at.is_none() => state.started_at = Some(now),
            _ => {}
        }
        if to.is_terminal() {
            state.ended_at = Some(now);
        }
        if to == RunStatus::Failed {
            state.error = reason.clone();
        }

        let label = match &reason {
            Some(reason) => self.truncate(&format!("run.{} ({})", to, reason)),
            None => format!("run.{}", to),
        };
        let id = self.store.next_event_id();
        record.append(id, EventKind::Run, label, now);

        if to.is_terminal() {
            info!(run_id = %run, %from, %to, "run finished");
        } else {
            debug!(run_id = %run, %from, %to, "run transitioned");
        }
        Ok(record.run.clone())
    }

    /// Add token and cost usage to a run
    ///
    /// Negative deltas are rejected before the run's status is consulted. A
    /// zero delta leaves the run untouched, `updated_at` included.
    pub fn record_usage(&self, run: &RunId, tokens: i64, cost: Usd) -> TrackerResult<RunSnapshot> {
        let invalid = || TrackerError::InvalidDelta {
            run_id: *run,
            tokens,
            cost,
        };
        if tokens < 0 || cost.is_negative() {
            warn!(run_id = %run, tokens, cost = %cost, "rejected negative usage delta");
            return Err(invalid());
        }

        let handle = self.handle(run)?;
        let _epoch = self.store.mutation();
        let mut record = handle.lock();

        let status = record.run.status;
        if status.is_terminal() {
            warn!(run_id = %run, %status, "rejected usage on terminal run");
            return Err(TrackerError::TerminalRun {
                run_id: *run,
                status,
            });
        }

        let new_tokens = record
            .run
            .tokens
            .checked_add(tokens as u64)
            .ok_or_else(invalid)?;
        let new_cost = record.run.cost_usd.checked_add(cost).ok_or_else(invalid)?;
        if tokens == 0 && cost == Usd::ZERO {
            return Ok(record.run.clone());
        }

        let state = &mut record.run;
        state.tokens = new_tokens;
        state.cost_usd = new_cost;
        state.updated_at = self.clock.now();

        debug!(run_id = %run, tokens, cost = %cost, "usage recorded");
        Ok(record.run.clone())
    }

    /// Append an annotation without changing status
    ///
    /// Allowed on terminal runs: artifacts and system notices may arrive
    /// after a run has finished.
    pub fn append_event(
        &self,
        run: &RunId,
        kind: EventKind,
        label: &str,
    ) -> TrackerResult<TimelineEvent> {
        let label = label.trim();
        if label.is_empty() {
            return Err(TrackerError::InvalidInput("event label must not be empty".into()));
        }

        let handle = self.handle(run)?;
        let _epoch = self.store.mutation();
        let mut record = handle.lock();
        let id = self.store.next_event_id();
        let event = record.append(id, kind, self.truncate(label), self.clock.now());

        debug!(run_id = %run, event_id = %event.id, %kind, "event appended");
        Ok(event)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Read-only copy of a run
    pub fn get_run(&self, run: &RunId) -> TrackerResult<RunSnapshot> {
        let handle = self.handle(run)?;
        let record = handle.lock();
        Ok(record.run.clone())
    }

    /// A run's timeline in (timestamp, insertion) order
    ///
    /// With `since`, only events at or after the cutoff are returned.
    pub fn list_events(
        &self,
        run: &RunId,
        since: Option<Timestamp>,
    ) -> TrackerResult<Vec<TimelineEvent>> {
        let handle = self.handle(run)?;
        let record = handle.lock();
        Ok(record.ordered_events(since))
    }

    /// Runs matching `filter`, most recently updated first
    ///
    /// Ties on `updated_at` go to the most recently created run. `limit`
    /// defaults to `default_list_limit`.
    pub fn list_runs(&self, filter: Option<&RunFilter>, limit: Option<usize>) -> Vec<RunSnapshot> {
        let limit = limit.unwrap_or(self.config.default_list_limit);
        let mut rows: Vec<(u64, RunSnapshot)> = Vec::new();
        self.store.for_each_record(|record| {
            if filter.map_or(true, |f| f.matches(&record.run)) {
                rows.push((record.seq, record.run.clone()));
            }
        });
        newest_runs(rows, limit)
    }

    /// Newest events across every run
    ///
    /// `limit` defaults to `recent_events_limit`.
    pub fn recent_events(&self, limit: Option<usize>) -> Vec<TimelineEvent> {
        let limit = limit.unwrap_or(self.config.recent_events_limit);
        let mut events: Vec<TimelineEvent> = Vec::new();
        self.store
            .for_each_record(|record| events.extend(record.events.iter().cloned()));
        newest_events(events, limit)
    }

    /// Token, cost and failure totals over runs matching `filter`
    pub fn aggregate(&self, filter: Option<&RunFilter>) -> Aggregate {
        let mut aggregate = Aggregate::default();
        self.store.for_each_record(|record| {
            if filter.map_or(true, |f| f.matches(&record.run)) {
                aggregate.accumulate(&record.run);
            }
        });
        aggregate
    }

    /// Totals, run queue and recent timeline from a single scan
    ///
    /// Totals cover every run; `limit` (default `default_list_limit`) only
    /// cuts the run queue.
    pub fn overview(&self, limit: Option<usize>) -> Overview {
        let limit = limit.unwrap_or(self.config.default_list_limit);
        let mut rows: Vec<(u64, RunSnapshot)> = Vec::new();
        let mut events: Vec<TimelineEvent> = Vec::new();
        self.store.for_each_record(|record| {
            rows.push((record.seq, record.run.clone()));
            events.extend(record.events.iter().cloned());
        });

        Overview {
            totals: Aggregate::from_runs(rows.iter().map(|(_, run)| run)),
            runs: newest_runs(rows, limit),
            timeline: newest_events(events, self.config.recent_events_limit),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn handle(&self, run: &RunId) -> TrackerResult<crate::store::RunHandle> {
        self.store
            .handle(run)
            .ok_or(TrackerError::RunNotFound { run_id: *run })
    }

    fn truncate(&self, text: &str) -> String {
        match text.char_indices().nth(self.config.max_label_len) {
            Some((cut, _)) => text[..cut].to_string(),
            None => text.to_string(),
        }
    }
}

/// Most recently updated first, ties to the most recently created
fn newest_runs(mut rows: Vec<(u64, RunSnapshot)>, limit: usize) -> Vec<RunSnapshot> {
    rows.sort_by(|(seq_a, a), (seq_b, b)| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| seq_b.cmp(seq_a))
    });
    rows.into_iter().take(limit).map(|(_, run)| run).collect()
}

fn newest_events(mut events: Vec<TimelineEvent>, limit: usize) -> Vec<TimelineEvent> {
    events.sort_by(|a, b| b.order_key().cmp(&a.order_key()));
    events.truncate(limit);
    events
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}
