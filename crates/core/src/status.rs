//! Run lifecycle status
//!
//! ## Canonical State Transition Table
//!
//! ```text
//! From State        → Valid Transitions
//! ─────────────────────────────────────────────────────────────────────
//! queued            → claimed | canceled
//! claimed           → running | canceled
//! running           → waiting_approval | completed | failed | retry_scheduled | canceled
//! waiting_approval  → running | canceled | failed
//! retry_scheduled   → claimed | failed | canceled
//! completed         → (TERMINAL)
//! failed            → (TERMINAL)
//! canceled          → (TERMINAL)
//! ```
//!
//! **Invariants:**
//! - No resurrection: terminal statuses accept no transitions
//! - No self-loops: a run cannot transition into the status it already has
//! - Approval gates resume into `running`; retries re-enter through `claimed`

use crate::error::TrackerError;
use serde::{Deserialize, Serialize};

/// Status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Waiting for a worker
    Queued,
    /// Taken by a worker, not yet executing
    Claimed,
    /// Executing
    Running,
    /// Paused on a policy gate until approved
    WaitingApproval,
    /// Hit a recoverable error; waiting for backoff and re-claim
    RetryScheduled,
    /// Finished normally
    Completed,
    /// Finished with an unrecoverable error
    Failed,
    /// Stopped by an operator
    Canceled,
}

impl RunStatus {
    /// Every status, in lifecycle order
    pub const ALL: [RunStatus; 8] = [
        RunStatus::Queued,
        RunStatus::Claimed,
        RunStatus::Running,
        RunStatus::WaitingApproval,
        RunStatus::RetryScheduled,
        RunStatus::Completed,
        RunStatus::Failed,
        RunStatus::Canceled,
    ];

    /// Statuses reachable in one step from `self`
    pub fn allowed_transitions(&self) -> &'static [RunStatus] {
        use RunStatus::*;
        match self {
            Queued => &[Claimed, Canceled],
            Claimed => &[Running, Canceled],
            Running => &[WaitingApproval, Completed, Failed, RetryScheduled, Canceled],
            WaitingApproval => &[Running, Canceled, Failed],
            RetryScheduled => &[Claimed, Failed, Canceled],
            Completed | Failed | Canceled => &[],
        }
    }

    /// Check whether `self -> to` is an edge of the state machine
    ///
    /// # Examples
    ///
    /// ```
    /// use runplane_core::RunStatus;
    ///
    /// assert!(RunStatus::Queued.can_transition_to(RunStatus::Claimed));
    /// assert!(!RunStatus::Claimed.can_transition_to(RunStatus::Completed));
    /// ```
    pub fn can_transition_to(&self, to: RunStatus) -> bool {
        self.allowed_transitions().contains(&to)
    }

    /// Terminal statuses accept no further transitions or usage
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Canceled
        )
    }

    /// Check if the run is still in flight
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Check if run ended in failure
    pub fn is_failure(&self) -> bool {
        matches!(self, RunStatus::Failed)
    }

    /// Get string representation (the wire name)
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::Claimed => "claimed",
            RunStatus::Running => "running",
            RunStatus::WaitingApproval => "waiting_approval",
            RunStatus::RetryScheduled => "retry_scheduled",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Canceled => "canceled",
        }
    }

    /// Visual indicator class for presentation layers
    ///
    /// Exhaustive on purpose: there is no fallback class.
    pub fn badge_class(&self) -> &'static str {
        match self {
            RunStatus::Queued => "s-queued",
            RunStatus::Claimed => "s-claimed",
            RunStatus::Running => "s-running",
            RunStatus::WaitingApproval => "s-waiting",
            RunStatus::RetryScheduled => "s-retry",
            RunStatus::Completed => "s-completed",
            RunStatus::Failed => "s-failed",
            RunStatus::Canceled => "s-canceled",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RunStatus {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RunStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TrackerError::UnknownStatus(s.to_string()))
    }
}
