//! Lifecycle Tests
//!
//! State machine edges, rejected transitions and terminal immutability.

use crate::*;
use proptest::prelude::*;

// =============================================================================
// Walkthrough
// =============================================================================

#[test]
fn test_create_claim_run_complete() {
    let rp = create_runplane();

    let run = rp.runs.create("payments-api", "codex:gpt-5").unwrap();
    let snapshot = rp.runs.get(&run).unwrap();
    assert_eq!(snapshot.status, RunStatus::Queued);
    assert_eq!(snapshot.tokens, 0);
    assert_eq!(snapshot.cost_usd, Usd::ZERO);
    assert_eq!(snapshot.cost_usd.to_string(), "0.00");

    rp.runs.claim(&run).unwrap();

    let err = rp.runs.complete(&run).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidTransition {
            from: RunStatus::Claimed,
            to: RunStatus::Completed,
            ..
        }
    ));
    assert_eq!(rp.runs.get(&run).unwrap().status, RunStatus::Claimed);

    rp.runs.start(&run).unwrap();
    let done = rp.runs.complete(&run).unwrap();
    assert_eq!(done.status, RunStatus::Completed);
    assert!(done.is_terminal());
}

#[test]
fn test_every_table_edge_is_accepted() {
    for from in RunStatus::ALL {
        for &to in from.allowed_transitions() {
            let rp = create_runplane();
            let run = rp.runs.create("infra-iac", "claude:sonnet").unwrap();
            drive(&rp, &run, &path_to(from));
            let snapshot = rp.runs.transition(&run, to, None).unwrap();
            assert_eq!(snapshot.status, to, "{} -> {}", from, to);
        }
    }
}

#[test]
fn test_every_non_edge_is_rejected_without_change() {
    for from in RunStatus::ALL {
        for to in RunStatus::ALL {
            if from.can_transition_to(to) {
                continue;
            }
            let rp = create_runplane();
            let run = rp.runs.create("infra-iac", "claude:sonnet").unwrap();
            drive(&rp, &run, &path_to(from));
            let before = rp.runs.get(&run).unwrap();
            let timeline = rp.events.list(&run, None).unwrap();

            let err = rp.runs.transition(&run, to, None).unwrap_err();
            assert_eq!(err.code(), "InvalidTransition", "{} -> {}", from, to);
            assert_eq!(rp.runs.get(&run).unwrap(), before);
            assert_eq!(rp.events.list(&run, None).unwrap(), timeline);
        }
    }
}

#[test]
fn test_unknown_run() {
    let rp = create_runplane();
    let ghost = RunId::new();
    assert!(rp.runs.claim(&ghost).unwrap_err().is_not_found());
    assert!(rp.runs.get(&ghost).unwrap_err().is_not_found());
    assert!(!rp.runs.exists(&ghost));
}

#[test]
fn test_exists_through_to_terminal() {
    let rp = create_runplane();
    let run = rp.runs.create("payments-api", "codex:gpt-5").unwrap();
    assert!(rp.runs.exists(&run));
    rp.runs.cancel(&run, None).unwrap();
    assert!(rp.runs.exists(&run));
    assert!(!rp.runs.is_active(&run));
}

#[test]
fn test_create_rejects_blank_names() {
    let rp = create_runplane();
    assert_eq!(rp.runs.create("", "codex:gpt-5").unwrap_err().code(), "InvalidInput");
    assert_eq!(rp.runs.create("payments-api", "  ").unwrap_err().code(), "InvalidInput");
    assert_eq!(rp.runs.count(), 0);
}

// =============================================================================
// Approval gate and retries
// =============================================================================

#[test]
fn test_approval_gate_round_trip() {
    let (rp, clock) = create_runplane_with_clock();
    let run = running_run(&rp, "infra-iac", "claude:sonnet");
    let started = rp.runs.get(&run).unwrap().started_at;

    tick(&clock, 500);
    rp.runs.request_approval(&run, "require_approval").unwrap();
    assert!(rp.runs.is_active(&run));

    tick(&clock, 500);
    let resumed = rp.runs.approve(&run).unwrap();
    assert_eq!(resumed.status, RunStatus::Running);
    // Resuming does not restart the clock
    assert_eq!(resumed.started_at, started);
}

#[test]
fn test_denied_approval_cancels() {
    let rp = create_runplane();
    let run = running_run(&rp, "infra-iac", "claude:sonnet");
    rp.runs.request_approval(&run, "require_approval").unwrap();
    let denied = rp.runs.deny(&run).unwrap();
    assert_eq!(denied.status, RunStatus::Canceled);
    assert!(denied.ended_at.is_some());
}

#[test]
fn test_retry_counts_attempts() {
    let rp = create_runplane();
    let run = running_run(&rp, "frontend-web", "gemini:2.5-pro");
    assert_eq!(rp.runs.get(&run).unwrap().attempts, 1);

    rp.runs.schedule_retry(&run, "rate limited").unwrap();
    rp.runs.claim(&run).unwrap();
    let snapshot = rp.runs.start(&run).unwrap();
    assert_eq!(snapshot.attempts, 2);
}

#[test]
fn test_failure_keeps_reason() {
    let rp = create_runplane();
    let run = running_run(&rp, "frontend-web", "gemini:2.5-pro");
    let failed = rp.runs.fail(&run, "adapter timeout").unwrap();
    assert_eq!(failed.error.as_deref(), Some("adapter timeout"));
    assert!(failed.status.is_failure());
}

#[test]
fn test_timestamps_follow_the_clock() {
    let (rp, clock) = create_runplane_with_clock();
    let run = rp.runs.create("payments-api", "codex:gpt-5").unwrap();
    let created = rp.runs.get(&run).unwrap().created_at;
    assert_eq!(created, Timestamp::from_secs(START));

    tick(&clock, 1_000);
    rp.runs.claim(&run).unwrap();
    tick(&clock, 1_000);
    rp.runs.start(&run).unwrap();
    tick(&clock, 3_000);
    let done = rp.runs.complete(&run).unwrap();

    assert_eq!(done.created_at, created);
    assert_eq!(done.started_at, Some(Timestamp::from_secs(START + 2)));
    assert_eq!(done.ended_at, Some(Timestamp::from_secs(START + 5)));
    assert_eq!(done.updated_at, Timestamp::from_secs(START + 5));
}

// =============================================================================
// Terminal immutability
// =============================================================================

#[test]
fn test_terminal_runs_reject_everything() {
    for terminal in [RunStatus::Completed, RunStatus::Failed, RunStatus::Canceled] {
        let rp = create_runplane();
        let run = rp.runs.create("payments-api", "codex:gpt-5").unwrap();
        drive(&rp, &run, &path_to(terminal));
        let frozen = rp.runs.get(&run).unwrap();

        for to in RunStatus::ALL {
            let err = rp.runs.transition(&run, to, None).unwrap_err();
            assert!(err.is_rejected_by_lifecycle(), "{} -> {}", terminal, to);
        }
        let err = rp.runs.record_usage(&run, 10, Usd::from_cents(1)).unwrap_err();
        assert_eq!(err.code(), "TerminalRun");

        assert_eq!(rp.runs.get(&run).unwrap(), frozen);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Random requests never move a run off the table.
    #[test]
    fn prop_random_requests_follow_table(requests in proptest::collection::vec(0usize..8, 1..40)) {
        let rp = create_runplane();
        let run = rp.runs.create("payments-api", "codex:gpt-5").unwrap();

        for i in requests {
            let to = RunStatus::ALL[i];
            let before = rp.runs.get(&run).unwrap().status;
            match rp.runs.transition(&run, to, None) {
                Ok(snapshot) => {
                    prop_assert!(before.can_transition_to(to));
                    prop_assert_eq!(snapshot.status, to);
                }
                Err(_) => {
                    prop_assert!(!before.can_transition_to(to));
                    prop_assert_eq!(rp.runs.get(&run).unwrap().status, before);
                }
            }
        }
    }
}
