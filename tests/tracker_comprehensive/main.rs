//! Tracker Comprehensive Test Suite
//!
//! Exercises the public `Runplane` facade end to end: the status state
//! machine, usage accounting, timelines, aggregates, concurrent access and
//! the dashboard snapshot.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test tracker_comprehensive
//!
//! # Run lifecycle tests only
//! cargo test --test tracker_comprehensive lifecycle::
//! ```

use std::sync::Arc;
use std::time::Duration;

use runplane::prelude::*;

pub mod events;
pub mod lifecycle;
pub mod usage;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// 2025-01-01T00:00:00Z
pub const START: u64 = 1_735_689_600;

/// Create a tracker driven by a manual clock
pub fn create_runplane_with_clock() -> (Runplane, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Timestamp::from_secs(START)));
    let rp = Runplane::builder()
        .clock(clock.clone())
        .build()
        .expect("Failed to build tracker");
    (rp, clock)
}

/// Create a tracker driven by a manual clock, discarding the clock handle
pub fn create_runplane() -> Runplane {
    create_runplane_with_clock().0
}

/// Advance the manual clock by `ms` milliseconds
pub fn tick(clock: &ManualClock, ms: u64) {
    clock.advance(Duration::from_millis(ms));
}

/// Create a run and move it to `running`
pub fn running_run(rp: &Runplane, repo: &str, agent: &str) -> RunId {
    let run = rp.runs.create(repo, agent).expect("create");
    rp.runs.claim(&run).expect("claim");
    rp.runs.start(&run).expect("start");
    run
}

/// Apply each transition in order, panicking on the first rejection
pub fn drive(rp: &Runplane, run: &RunId, path: &[RunStatus]) {
    for to in path {
        rp.runs
            .transition(run, *to, None)
            .unwrap_or_else(|e| panic!("transition to {} failed: {}", to, e));
    }
}

/// Shortest path from `queued` to `target`
pub fn path_to(target: RunStatus) -> Vec<RunStatus> {
    use RunStatus::*;
    match target {
        Queued => vec![],
        Claimed => vec![Claimed],
        Running => vec![Claimed, Running],
        WaitingApproval => vec![Claimed, Running, WaitingApproval],
        RetryScheduled => vec![Claimed, Running, RetryScheduled],
        Completed => vec![Claimed, Running, Completed],
        Failed => vec![Claimed, Running, Failed],
        Canceled => vec![Canceled],
    }
}
