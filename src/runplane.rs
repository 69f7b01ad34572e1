//! Main entry point for Runplane.
//!
//! This module provides the `Runplane` struct, the primary handle for all
//! tracker operations.

use crate::dashboard::Dashboard;
use crate::error::{Error, Result};
use crate::primitives::{Events, Runs};
use crate::types::{Aggregate, Clock, SystemClock, TrackerConfig};
use runplane_engine::Tracker;
use std::path::Path;
use std::sync::Arc;

/// A run lifecycle tracker.
///
/// This is the main entry point. Create one with [`Runplane::new`] or
/// [`Runplane::builder`]. Clones share the same underlying tracker, so a
/// handle can be given to every worker thread.
///
/// # Example
///
/// ```
/// use runplane::prelude::*;
///
/// let rp = Runplane::new();
///
/// let run = rp.runs.create("infra-iac", "claude:sonnet")?;
/// rp.runs.claim(&run)?;
/// rp.runs.start(&run)?;
/// rp.runs.request_approval(&run, "require_approval")?;
/// rp.runs.approve(&run)?;
///
/// let timeline = rp.events.list(&run, None)?;
/// assert_eq!(timeline.len(), 5);
/// # Ok::<(), runplane::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Runplane {
    /// The underlying tracker
    pub(crate) inner: Arc<Tracker>,

    /// Run lifecycle management
    pub runs: Runs,

    /// Run timelines
    pub events: Events,
}

impl Runplane {
    /// Create a tracker with default settings and the system clock.
    pub fn new() -> Self {
        Self::from_tracker(Arc::new(Tracker::new()))
    }

    /// Create a builder for tracker configuration.
    ///
    /// # Example
    ///
    /// ```
    /// # use runplane::prelude::*;
    /// let rp = Runplane::builder()
    ///     .config_toml("recent_events_limit = 10")?
    ///     .build()?;
    /// assert_eq!(rp.config().recent_events_limit, 10);
    /// # Ok::<(), runplane::Error>(())
    /// ```
    pub fn builder() -> RunplaneBuilder {
        RunplaneBuilder::new()
    }

    /// Active configuration.
    pub fn config(&self) -> &TrackerConfig {
        self.inner.config()
    }

    /// Token, cost and failure totals over every run.
    pub fn aggregate(&self) -> Aggregate {
        self.inner.aggregate(None)
    }

    /// Presentation snapshot: totals, the newest runs and the recent timeline.
    ///
    /// `limit` caps the run rows (None for the configured default).
    pub fn dashboard(&self, limit: Option<usize>) -> Dashboard {
        Dashboard::capture(&self.inner, limit)
    }

    /// Direct access to the engine tracker.
    pub fn tracker(&self) -> &Arc<Tracker> {
        &self.inner
    }

    fn from_tracker(tracker: Arc<Tracker>) -> Self {
        Self {
            runs: Runs::new(tracker.clone()),
            events: Events::new(tracker.clone()),
            inner: tracker,
        }
    }
}

impl Default for Runplane {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for tracker configuration.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use runplane::prelude::*;
///
/// // Deterministic clock for tests and replays
/// let clock = Arc::new(ManualClock::new(Timestamp::from_secs(1_700_000_000)));
/// let rp = Runplane::builder().clock(clock.clone()).build()?;
///
/// let run = rp.runs.create("payments-api", "codex:gpt-5")?;
/// assert_eq!(rp.runs.get(&run)?.created_at, clock.now());
/// # Ok::<(), runplane::Error>(())
/// ```
#[derive(Debug)]
pub struct RunplaneBuilder {
    config: TrackerConfig,
    clock: Option<Arc<dyn Clock>>,
}

impl RunplaneBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
            clock: None,
        }
    }

    /// Use `config` as is.
    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse configuration from a TOML document.
    pub fn config_toml(mut self, raw: &str) -> Result<Self> {
        self.config = TrackerConfig::from_toml_str(raw)?;
        Ok(self)
    }

    /// Load configuration from a TOML file.
    pub fn config_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        self.config_toml(&raw)
    }

    /// Use `clock` instead of the system clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the configuration and create the tracker.
    pub fn build(self) -> Result<Runplane> {
        self.config.validate().map_err(Error::from)?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        tracing::debug!(config = ?self.config, "building tracker");
        Ok(Runplane::from_tracker(Arc::new(Tracker::with_config(
            self.config,
            clock,
        ))))
    }
}

impl Default for RunplaneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
