//! Run snapshot type
//!
//! A [`RunSnapshot`] is an owned, read-only copy of a run's state. Callers
//! never hold references into tracker-owned storage; every read hands out a
//! fresh snapshot.

use crate::status::RunStatus;
use crate::types::{RunId, Timestamp};
use crate::usage::Usd;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Read-only copy of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    /// Run ID
    pub id: RunId,
    /// Target repository
    pub repo: String,
    /// Executing agent, e.g. `codex:gpt-5`
    pub agent: String,
    /// Current status
    pub status: RunStatus,
    /// Accumulated tokens
    pub tokens: u64,
    /// Accumulated cost
    pub cost_usd: Usd,
    /// When the run was created
    pub created_at: Timestamp,
    /// Last mutation (transition or usage)
    pub updated_at: Timestamp,
    /// First entry into `running`
    pub started_at: Option<Timestamp>,
    /// Entry into a terminal status
    pub ended_at: Option<Timestamp>,
    /// Number of times a worker has claimed the run
    pub attempts: u32,
    /// Reason given for the transition into `failed`
    pub error: Option<String>,
}

impl RunSnapshot {
    /// Check if the run has finished
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Wall time between first start and the terminal transition
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => Some(end.saturating_duration_since(start)),
            _ => None,
        }
    }
}
