//! Tracker configuration
//!
//! ```toml
//! # runplane.toml
//! default_list_limit = 200
//! recent_events_limit = 50
//! max_label_len = 512
//! ```
//!
//! Every key is optional. Unknown keys are rejected so that typos surface.

use runplane_core::{TrackerError, TrackerResult};
use serde::{Deserialize, Serialize};

/// Tunables for a [`Tracker`](crate::Tracker)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Rows returned by `list_runs` when the caller gives no limit
    pub default_list_limit: usize,
    /// Events returned by `recent_events` when the caller gives no limit
    pub recent_events_limit: usize,
    /// Labels and transition reasons longer than this many chars are truncated
    pub max_label_len: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            default_list_limit: 200,
            recent_events_limit: 50,
            max_label_len: 512,
        }
    }
}

impl TrackerConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> TrackerResult<Self> {
        let config: TrackerConfig =
            toml::from_str(raw).map_err(|e| TrackerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the tracker useless
    pub fn validate(&self) -> TrackerResult<()> {
        if self.default_list_limit == 0 {
            return Err(TrackerError::Config(
                "default_list_limit must be greater than zero".into(),
            ));
        }
        if self.recent_events_limit == 0 {
            return Err(TrackerError::Config(
                "recent_events_limit must be greater than zero".into(),
            ));
        }
        if self.max_label_len == 0 {
            return Err(TrackerError::Config(
                "max_label_len must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
