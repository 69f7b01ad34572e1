//! Timeline event types
//!
//! Events are immutable records in an append-only log. Each event includes:
//! - A process-wide monotonically increasing id (also the insertion order)
//! - The id of the run it describes
//! - A kind for categorization
//! - A human-readable label
//! - The timestamp at which it was appended

use crate::error::TrackerError;
use crate::types::{EventId, RunId, Timestamp};
use serde::{Deserialize, Serialize};

/// Category of a timeline event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Lifecycle changes (creation and status transitions)
    Run,
    /// Policy evaluations and approval decisions
    Policy,
    /// Artifacts recorded by the agent
    Artifact,
    /// Infrastructure and adapter notices
    System,
}

impl EventKind {
    /// Every kind
    pub const ALL: [EventKind; 4] = [
        EventKind::Run,
        EventKind::Policy,
        EventKind::Artifact,
        EventKind::System,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Run => "run",
            EventKind::Policy => "policy",
            EventKind::Artifact => "artifact",
            EventKind::System => "system",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TrackerError::UnknownEventKind(s.to_string()))
    }
}

/// An event in a run's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Event id (auto-assigned, globally monotonic)
    pub id: EventId,
    /// The run this event describes
    pub run_id: RunId,
    /// Event category
    pub kind: EventKind,
    /// Human-readable label, e.g. `run.claimed` or `policy.evaluated -> require_approval`
    pub label: String,
    /// When the event was appended
    pub at: Timestamp,
}

impl TimelineEvent {
    /// Timeline ordering key: timestamp, ties broken by insertion order
    pub fn order_key(&self) -> (Timestamp, EventId) {
        (self.at, self.id)
    }
}
