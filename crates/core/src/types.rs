//! Identity and time types
//!
//! This module defines the fundamental types used throughout the system:
//! - [`RunId`]: Unique identifier for agent runs
//! - [`EventId`]: Process-wide sequence number of a timeline event
//! - [`Timestamp`]: Microseconds since the Unix epoch

use crate::error::TrackerError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;
use uuid::Uuid;

/// Unique identifier for a run (one agent execution against a repository)
///
/// RunId is opaque to callers and immutable after creation. It is used in:
/// - Tracker lookups
/// - Timeline events (as a reference to the owning run)
/// - Wire payloads (rendered as a hyphenated UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Create a new random RunId using UUID v4
    ///
    /// # Examples
    ///
    /// ```
    /// use runplane_core::RunId;
    ///
    /// let id1 = RunId::new();
    /// let id2 = RunId::new();
    /// assert_ne!(id1, id2); // Each RunId is unique
    /// ```
    pub fn new() -> Self {
        RunId(Uuid::new_v4())
    }

    /// Create RunId from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        RunId(Uuid::from_bytes(bytes))
    }

    /// Get raw bytes representation
    ///
    /// # Examples
    ///
    /// ```
    /// use runplane_core::RunId;
    ///
    /// let id = RunId::new();
    /// let id2 = RunId::from_bytes(*id.as_bytes());
    /// assert_eq!(id, id2);
    /// ```
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(RunId)
            .map_err(|_| TrackerError::InvalidInput(format!("malformed run id: {:?}", s)))
    }
}

/// Identifier of a timeline event
///
/// Event ids are allocated from a single monotonically increasing sequence,
/// so they also record global insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    /// Wrap a raw sequence number
    pub const fn new(sequence: u64) -> Self {
        EventId(sequence)
    }

    /// The raw sequence number
    pub const fn sequence(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "evt{}", self.0)
    }
}

/// Wall-clock instant, microseconds since the Unix epoch
///
/// Serialized as an RFC 3339 string (`2026-02-18T10:34:00Z`), which is the
/// shape presentation layers consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The Unix epoch
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Create from microseconds since epoch
    pub const fn from_micros(micros: u64) -> Self {
        Timestamp(micros)
    }

    /// Create from milliseconds since epoch
    pub const fn from_millis(millis: u64) -> Self {
        Timestamp(millis.saturating_mul(1000))
    }

    /// Create from whole seconds since epoch
    pub const fn from_secs(secs: u64) -> Self {
        Timestamp(secs.saturating_mul(1_000_000))
    }

    /// Microseconds since epoch
    pub const fn as_micros(&self) -> u64 {
        self.0
    }

    /// Convert a chrono UTC datetime; instants before the epoch clamp to it.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.timestamp_micros().max(0) as u64)
    }

    /// Convert to a chrono UTC datetime
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.0)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_micros)
    }

    /// Parse an RFC 3339 string such as `2026-02-18T10:34:00Z`
    ///
    /// # Examples
    ///
    /// ```
    /// use runplane_core::Timestamp;
    ///
    /// let ts = Timestamp::parse_rfc3339("1970-01-01T00:00:01Z").unwrap();
    /// assert_eq!(ts, Timestamp::from_secs(1));
    /// ```
    pub fn parse_rfc3339(s: &str) -> Result<Self, TrackerError> {
        DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| Timestamp::from_datetime(dt.with_timezone(&Utc)))
            .map_err(|e| TrackerError::InvalidInput(format!("malformed timestamp {:?}: {}", s, e)))
    }

    /// Time elapsed since `earlier`, zero if `earlier` is later
    pub fn saturating_duration_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }

    /// Timestamp advanced by `duration`
    pub fn saturating_add(&self, duration: Duration) -> Self {
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        Timestamp(self.0.saturating_add(micros))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => write!(f, "@{}us", self.0),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse_rfc3339(&raw).map_err(serde::de::Error::custom)
    }
}
