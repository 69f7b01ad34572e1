//! # Runplane
//!
//! Run lifecycle tracker for multi-agent orchestration control planes.
//!
//! Runplane keeps the authoritative state of agent runs: a status state
//! machine with approval gating and retries, an append-only timeline per run,
//! token and cost accounting, and aggregate queries for dashboards.
//!
//! ## Quick Start
//!
//! ```
//! use runplane::prelude::*;
//!
//! let rp = Runplane::new();
//!
//! let run = rp.runs.create("payments-api", "codex:gpt-5")?;
//! rp.runs.claim(&run)?;
//!
//! // claimed -> completed is not an edge of the state machine
//! assert!(rp.runs.complete(&run).unwrap_err().is_rejected_by_lifecycle());
//!
//! rp.runs.start(&run)?;
//! rp.runs.record_usage(&run, 12_890, Usd::from_cents(91))?;
//! rp.events.append(&run, EventKind::Artifact, "artifact.recorded (summary)")?;
//! rp.runs.complete(&run)?;
//!
//! let totals = rp.aggregate();
//! assert_eq!(totals.total_tokens, 12_890);
//! # Ok::<(), runplane::Error>(())
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//! queued → claimed → running → completed
//!    │        │       │  ↑ ↓
//!    │        │       │  waiting_approval → failed | canceled
//!    │        │       ├→ retry_scheduled → claimed | failed | canceled
//!    │        │       └→ failed | canceled
//!    └────────┴→ canceled
//! ```
//!
//! ## Primitives
//!
//! - [`Runs`] - Run lifecycle, listing and usage
//! - [`Events`] - Append-only run timelines

#![warn(missing_docs)]

mod dashboard;
mod error;
mod primitives;
mod runplane;
mod types;

pub mod format;
pub mod prelude;

// Re-export main entry points
pub use crate::runplane::{Runplane, RunplaneBuilder};
pub use dashboard::{Dashboard, Metrics, RunRow};
pub use error::{Error, Result};

// Re-export primitives
pub use primitives::{Events, Runs};

// Re-export types
pub use types::*;
