//! Sharded run storage
//!
//! DashMap keyed by RunId, one mutex per run.
//!
//! # Design
//!
//! - DashMap: sharded, readers only touch the shard holding the run
//! - `Arc<Mutex<RunRecord>>` per run: all mutation of a run is serialized on
//!   its own lock, and the map guard is released before that lock is taken
//! - Different runs never contend beyond the brief map shard access
//! - Store-wide epoch `RwLock<()>`: mutations hold it shared, scans hold it
//!   exclusively, so a scan copies every run as of one instant
//!
//! # Thread Safety
//!
//! - `handle()`: clones the run's `Arc` out of the map, then drops the map guard
//! - `insert()`: locks only the target map shard
//! - `mutation()`: shared epoch guard, taken before any run lock
//! - `for_each_record()`: exclusive epoch, then each run lock in turn. No
//!   mutation can be between its validation and its write while the scan runs

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use runplane_core::{EventId, EventKind, RunId, RunSnapshot, Timestamp, TimelineEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A run's state plus its append-only timeline
#[derive(Debug)]
pub(crate) struct RunRecord {
    /// Creation order within the store
    pub(crate) seq: u64,
    /// Current state
    pub(crate) run: RunSnapshot,
    /// Timeline, in insertion order
    pub(crate) events: Vec<TimelineEvent>,
}

impl RunRecord {
    pub(crate) fn new(seq: u64, run: RunSnapshot) -> Self {
        Self {
            seq,
            run,
            events: Vec::new(),
        }
    }

    /// Append an event to this run's timeline
    ///
    /// The caller holds the run's lock, so ids allocated here increase in
    /// insertion order within the run.
    pub(crate) fn append(
        &mut self,
        id: EventId,
        kind: EventKind,
        label: String,
        at: Timestamp,
    ) -> TimelineEvent {
        let event = TimelineEvent {
            id,
            run_id: self.run.id,
            kind,
            label,
            at,
        };
        self.events.push(event.clone());
        event
    }

    /// Timeline sorted by (timestamp, insertion order)
    pub(crate) fn ordered_events(&self, since: Option<Timestamp>) -> Vec<TimelineEvent> {
        let mut events: Vec<TimelineEvent> = self
            .events
            .iter()
            .filter(|e| since.map_or(true, |cutoff| e.at >= cutoff))
            .cloned()
            .collect();
        events.sort_by_key(TimelineEvent::order_key);
        events
    }
}

/// Shared handle to one run's record
pub(crate) type RunHandle = Arc<Mutex<RunRecord>>;

/// Sharded store of runs
pub(crate) struct RunStore {
    runs: DashMap<RunId, RunHandle>,
    epoch: RwLock<()>,
    next_event: AtomicU64,
    next_run_seq: AtomicU64,
}

impl RunStore {
    /// Create an empty store
    pub(crate) fn new() -> Self {
        Self {
            runs: DashMap::new(),
            epoch: RwLock::new(()),
            next_event: AtomicU64::new(1),
            next_run_seq: AtomicU64::new(0),
        }
    }

    /// Allocate the next event id
    #[inline]
    pub(crate) fn next_event_id(&self) -> EventId {
        EventId::new(self.next_event.fetch_add(1, Ordering::SeqCst))
    }

    /// Allocate the next creation sequence number
    #[inline]
    pub(crate) fn next_run_seq(&self) -> u64 {
        self.next_run_seq.fetch_add(1, Ordering::SeqCst)
    }

    /// Insert a freshly created run
    pub(crate) fn insert(&self, record: RunRecord) -> RunHandle {
        let run_id = record.run.id;
        let handle = Arc::new(Mutex::new(record));
        self.runs.insert(run_id, Arc::clone(&handle));
        handle
    }

    /// Look up a run's handle
    #[inline]
    pub(crate) fn handle(&self, run_id: &RunId) -> Option<RunHandle> {
        self.runs.get(run_id).map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a run exists
    pub(crate) fn contains(&self, run_id: &RunId) -> bool {
        self.runs.contains_key(run_id)
    }

    /// Number of runs
    pub(crate) fn len(&self) -> usize {
        self.runs.len()
    }

    /// Shared epoch guard, held for the whole of one mutation
    #[inline]
    pub(crate) fn mutation(&self) -> RwLockReadGuard<'_, ()> {
        self.epoch.read()
    }

    /// Visit every run as of one instant
    ///
    /// Holds the epoch exclusively while visiting, so keep the visitor to
    /// copying. Handles are collected first so no map shard guard is held
    /// while a run lock is taken.
    pub(crate) fn for_each_record(&self, mut visit: impl FnMut(&RunRecord)) {
        let _epoch = self.epoch.write();
        let handles: Vec<RunHandle> = self
            .runs
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        for handle in handles {
            let record = handle.lock();
            visit(&record);
        }
    }
}

impl std::fmt::Debug for RunStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunStore")
            .field("runs", &self.runs.len())
            .field("next_event", &self.next_event.load(Ordering::Relaxed))
            .finish()
    }
}
