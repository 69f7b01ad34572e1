//! Run timelines.
//!
//! Append-only: events can be added and read, never changed or removed.

use crate::error::Result;
use crate::types::{EventKind, RunId, TimelineEvent, Timestamp};
use runplane_engine::Tracker;
use std::sync::Arc;

/// Timeline operations.
///
/// Access via `rp.events`.
#[derive(Debug, Clone)]
pub struct Events {
    tracker: Arc<Tracker>,
}

impl Events {
    pub(crate) fn new(tracker: Arc<Tracker>) -> Self {
        Self { tracker }
    }

    /// Append an annotation to a run's timeline without changing its status.
    ///
    /// # Example
    ///
    /// ```
    /// # use runplane::prelude::*;
    /// # let rp = Runplane::new();
    /// let run = rp.runs.create("infra-iac", "claude:sonnet")?;
    /// rp.events.append(&run, EventKind::Policy, "policy.evaluated -> require_approval")?;
    /// # Ok::<(), runplane::Error>(())
    /// ```
    pub fn append(&self, run: &RunId, kind: EventKind, label: &str) -> Result<TimelineEvent> {
        Ok(self.tracker.append_event(run, kind, label)?)
    }

    /// A run's timeline, oldest first, optionally from `since` onwards.
    pub fn list(&self, run: &RunId, since: Option<Timestamp>) -> Result<Vec<TimelineEvent>> {
        Ok(self.tracker.list_events(run, since)?)
    }

    /// Newest events across all runs.
    pub fn recent(&self, limit: Option<usize>) -> Vec<TimelineEvent> {
        self.tracker.recent_events(limit)
    }
}
