//! Tracker error types
//!
//! ## Error Codes (Canonical)
//!
//! These codes are what wire surfaces report and must not change:
//!
//! | Code | Description |
//! |------|-------------|
//! | RunNotFound | Run does not exist |
//! | InvalidTransition | Status edge not in the state machine |
//! | InvalidDelta | Negative or overflowing usage delta |
//! | TerminalRun | Mutation attempted on a finished run |
//! | UnknownStatus | Status name not recognized |
//! | UnknownEventKind | Event kind not recognized |
//! | InvalidInput | Malformed argument |
//! | Config | Configuration could not be parsed |
//!
//! Every error is recoverable by the caller. A failed operation leaves
//! tracker state unchanged.

use crate::status::RunStatus;
use crate::types::RunId;
use crate::usage::Usd;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by tracker operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// Unknown run id
    #[error("run not found: {run_id}")]
    RunNotFound {
        /// The run that was looked up
        run_id: RunId,
    },

    /// Disallowed status edge
    #[error("invalid transition for run {run_id}: {from} -> {to}")]
    InvalidTransition {
        /// The run
        run_id: RunId,
        /// Status at the time of the request
        from: RunStatus,
        /// Requested status
        to: RunStatus,
    },

    /// Negative (or overflowing) usage delta
    #[error("invalid usage delta for run {run_id}: tokens {tokens}, cost {cost}")]
    InvalidDelta {
        /// The run
        run_id: RunId,
        /// Requested token delta
        tokens: i64,
        /// Requested cost delta
        cost: Usd,
    },

    /// Mutation attempted on a finished run
    #[error("run {run_id} is terminal ({status})")]
    TerminalRun {
        /// The run
        run_id: RunId,
        /// Its terminal status
        status: RunStatus,
    },

    /// Status name not recognized
    #[error("unknown run status: {0:?}")]
    UnknownStatus(String),

    /// Event kind not recognized
    #[error("unknown event kind: {0:?}")]
    UnknownEventKind(String),

    /// Malformed argument
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be parsed
    #[error("config error: {0}")]
    Config(String),
}

/// Result type for tracker operations
pub type TrackerResult<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// Get the canonical error code
    pub fn error_code(&self) -> &'static str {
        match self {
            TrackerError::RunNotFound { .. } => "RunNotFound",
            TrackerError::InvalidTransition { .. } => "InvalidTransition",
            TrackerError::InvalidDelta { .. } => "InvalidDelta",
            TrackerError::TerminalRun { .. } => "TerminalRun",
            TrackerError::UnknownStatus(_) => "UnknownStatus",
            TrackerError::UnknownEventKind(_) => "UnknownEventKind",
            TrackerError::InvalidInput(_) => "InvalidInput",
            TrackerError::Config(_) => "Config",
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrackerError::RunNotFound { .. })
    }

    /// The run the error concerns, if any
    pub fn run_id(&self) -> Option<RunId> {
        match self {
            TrackerError::RunNotFound { run_id }
            | TrackerError::InvalidTransition { run_id, .. }
            | TrackerError::InvalidDelta { run_id, .. }
            | TrackerError::TerminalRun { run_id, .. } => Some(*run_id),
            _ => None,
        }
    }

    /// Convert to the wire representation
    pub fn to_wire(&self) -> WireError {
        WireError {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

/// Wire error representation for JSON encoding
///
/// ```json
/// {
///   "code": "InvalidTransition",
///   "message": "invalid transition for run 5f0c...: claimed -> completed"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireError {
    /// The canonical error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}
