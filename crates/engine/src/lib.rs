//! Run lifecycle tracker engine
//!
//! This crate owns the authoritative state of every run and its timeline:
//! - [`Tracker`]: lifecycle operations with state machine enforcement, over a
//!   sharded map of runs with one mutex per run
//! - [`RunFilter`] / [`Aggregate`] / [`Overview`]: read-only queries over the
//!   run set
//! - [`Clock`]: time source, swappable for deterministic tests
//! - [`TrackerConfig`]: tunables, loadable from TOML

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod config;
pub mod query;
pub(crate) mod store;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TrackerConfig;
pub use query::{Aggregate, Overview, RunFilter};
pub use tracker::Tracker;
