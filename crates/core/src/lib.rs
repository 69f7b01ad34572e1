//! Core types for Runplane
//!
//! This crate defines the canonical data structures shared by the tracker
//! engine, the facade and the CLI:
//! - [`RunId`], [`EventId`], [`Timestamp`]: identity and time
//! - [`RunStatus`]: the run lifecycle state machine
//! - [`TimelineEvent`], [`EventKind`]: append-only run history
//! - [`RunSnapshot`]: read-only copy of a run
//! - [`Usd`]: fixed-point currency
//! - [`TrackerError`]: canonical error vocabulary
//!
//! Nothing in here locks, allocates ids from shared state, or performs I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod run_types;
pub mod status;
pub mod types;
pub mod usage;

pub use error::{TrackerError, TrackerResult, WireError};
pub use event::{EventKind, TimelineEvent};
pub use run_types::RunSnapshot;
pub use status::RunStatus;
pub use types::{EventId, RunId, Timestamp};
pub use usage::{Usd, UsdTotal};
