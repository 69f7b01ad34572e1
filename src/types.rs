//! Public types for the Runplane API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Identity and time
pub use runplane_core::{EventId, RunId, Timestamp};

// Runs
pub use runplane_core::{RunSnapshot, RunStatus};

// Timeline
pub use runplane_core::{EventKind, TimelineEvent};

// Errors on the wire
pub use runplane_core::WireError;

// Money
pub use runplane_core::{Usd, UsdTotal};

// Queries
pub use runplane_engine::{Aggregate, RunFilter};

// Configuration and time sources
pub use runplane_engine::{Clock, ManualClock, SystemClock, TrackerConfig};
