//! Unified error types for Runplane.
//!
//! This module provides a clean error type that wraps tracker errors and
//! presents a consistent interface to users.

use runplane_core::{RunId, RunStatus, TrackerError, Usd, WireError};
use thiserror::Error;

/// All Runplane errors.
///
/// This is the canonical error type for all facade operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Run id not known to the tracker
    #[error("run not found: {0}")]
    RunNotFound(RunId),

    /// Status edge not allowed by the state machine
    #[error("invalid transition for run {run_id}: {from} -> {to}")]
    InvalidTransition {
        /// The run
        run_id: RunId,
        /// Status at the time of the request
        from: RunStatus,
        /// Requested status
        to: RunStatus,
    },

    /// Negative or overflowing usage delta
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

    /// Status name outside the lifecycle
    #[error("unknown run status: {0:?}")]
    UnknownStatus(String),

    /// Event kind name outside the taxonomy
    #[error("unknown event kind: {0:?}")]
    UnknownEventKind(String),

    /// Malformed input (ids, amounts, labels, command syntax)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be parsed or validated
    #[error("config error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for Runplane operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Canonical error code, stable across releases
    pub fn code(&self) -> &'static str {
        match self {
            Error::RunNotFound(_) => "RunNotFound",
            Error::InvalidTransition { .. } => "InvalidTransition",
            Error::InvalidDelta { .. } => "InvalidDelta",
            Error::TerminalRun { .. } => "TerminalRun",
            Error::UnknownStatus(_) => "UnknownStatus",
            Error::UnknownEventKind(_) => "UnknownEventKind",
            Error::InvalidInput(_) => "InvalidInput",
            Error::Config(_) => "Config",
            Error::Io(_) => "Io",
            Error::Serialization(_) => "Serialization",
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::RunNotFound(_))
    }

    /// Check if the state machine rejected the request.
    ///
    /// Covers both disallowed edges and mutations of finished runs.
    pub fn is_rejected_by_lifecycle(&self) -> bool {
        matches!(self, Error::InvalidTransition { .. } | Error::TerminalRun { .. })
    }

    /// Code and message, for JSON surfaces
    pub fn to_wire(&self) -> WireError {
        WireError {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

// Convert from tracker errors
impl From<TrackerError> for Error {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::RunNotFound { run_id } => Error::RunNotFound(run_id),
            TrackerError::InvalidTransition { run_id, from, to } => {
                Error::InvalidTransition { run_id, from, to }
            }
            TrackerError::InvalidDelta {
                run_id,
                tokens,
                cost,
            } => Error::InvalidDelta {
                run_id,
                tokens,
                cost,
            },
            TrackerError::TerminalRun { run_id, status } => Error::TerminalRun { run_id, status },
            TrackerError::UnknownStatus(status) => Error::UnknownStatus(status),
            TrackerError::UnknownEventKind(kind) => Error::UnknownEventKind(kind),
            TrackerError::InvalidInput(msg) => Error::InvalidInput(msg),
            TrackerError::Config(msg) => Error::Config(msg),
        }
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
