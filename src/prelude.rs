//! Convenient imports for Runplane.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```
//! use runplane::prelude::*;
//!
//! let rp = Runplane::new();
//! let run = rp.runs.create("frontend-web", "gemini:2.5-pro")?;
//! # Ok::<(), runplane::Error>(())
//! ```

// Main entry point
pub use crate::runplane::{Runplane, RunplaneBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Primitives
pub use crate::primitives::{Events, Runs};

// Core types
pub use crate::types::{
    EventKind, RunId, RunSnapshot, RunStatus, TimelineEvent, Timestamp, Usd, UsdTotal,
};

// Queries
pub use crate::types::{Aggregate, RunFilter};

// Configuration and time
pub use crate::types::{Clock, ManualClock, TrackerConfig};

// Presentation
pub use crate::dashboard::Dashboard;
