//! Usage Accounting Tests
//!
//! Token and cost deltas: validation, additivity and overflow.

use crate::*;
use proptest::prelude::*;

#[test]
fn test_usage_accumulates() {
    let rp = create_runplane();
    let run = running_run(&rp, "payments-api", "codex:gpt-5");

    rp.runs.record_usage(&run, 10_000, Usd::from_cents(70)).unwrap();
    let snapshot = rp.runs.record_usage(&run, 2_890, Usd::from_cents(21)).unwrap();

    assert_eq!(snapshot.tokens, 12_890);
    assert_eq!(snapshot.cost_usd, Usd::from_cents(91));
    assert_eq!(snapshot.cost_usd.to_string(), "0.91");
}

#[test]
fn test_usage_allowed_on_every_active_status() {
    for status in RunStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
        let rp = create_runplane();
        let run = rp.runs.create("infra-iac", "claude:sonnet").unwrap();
        drive(&rp, &run, &path_to(status));
        let snapshot = rp.runs.record_usage(&run, 5, Usd::from_micros(1)).unwrap();
        assert_eq!(snapshot.tokens, 5, "{}", status);
        assert_eq!(snapshot.status, status);
    }
}

#[test]
fn test_negative_tokens_rejected_without_change() {
    let rp = create_runplane();
    let run = running_run(&rp, "payments-api", "codex:gpt-5");
    rp.runs.record_usage(&run, 100, Usd::from_cents(1)).unwrap();
    let before = rp.runs.get(&run).unwrap();

    let err = rp.runs.record_usage(&run, -1, Usd::ZERO).unwrap_err();
    assert_eq!(err.code(), "InvalidDelta");
    assert_eq!(rp.runs.get(&run).unwrap(), before);
}

#[test]
fn test_negative_cost_rejected() {
    let rp = create_runplane();
    let run = running_run(&rp, "payments-api", "codex:gpt-5");
    let err = rp
        .runs
        .record_usage(&run, 0, Usd::from_cents(-5))
        .unwrap_err();
    assert_eq!(err.code(), "InvalidDelta");
    assert_eq!(rp.runs.get(&run).unwrap().cost_usd, Usd::ZERO);
}

#[test]
fn test_negative_delta_checked_before_lookup() {
    let rp = create_runplane();
    let err = rp
        .runs
        .record_usage(&RunId::new(), -1, Usd::ZERO)
        .unwrap_err();
    assert_eq!(err.code(), "InvalidDelta");
}

#[test]
fn test_usage_on_unknown_run() {
    let rp = create_runplane();
    let err = rp
        .runs
        .record_usage(&RunId::new(), 1, Usd::ZERO)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_zero_delta_changes_nothing() {
    let (rp, clock) = create_runplane_with_clock();
    let run = running_run(&rp, "payments-api", "codex:gpt-5");
    let before = rp.runs.record_usage(&run, 42, Usd::from_cents(3)).unwrap();
    tick(&clock, 10);
    let other = running_run(&rp, "infra-iac", "claude:sonnet");

    tick(&clock, 10);
    let snapshot = rp.runs.record_usage(&run, 0, Usd::ZERO).unwrap();
    assert_eq!(snapshot, before);
    assert_eq!(rp.runs.get(&run).unwrap().updated_at, before.updated_at);

    let order: Vec<RunId> = rp.runs.list(None, None).into_iter().map(|r| r.id).collect();
    assert_eq!(order, vec![other, run]);
}

#[test]
fn test_zero_delta_still_rejected_when_terminal() {
    let rp = create_runplane();
    let run = running_run(&rp, "payments-api", "codex:gpt-5");
    rp.runs.complete(&run).unwrap();
    let err = rp.runs.record_usage(&run, 0, Usd::ZERO).unwrap_err();
    assert_eq!(err.code(), "TerminalRun");
}

#[test]
fn test_usage_does_not_touch_timeline() {
    let rp = create_runplane();
    let run = running_run(&rp, "payments-api", "codex:gpt-5");
    let before = rp.events.list(&run, None).unwrap();
    rp.runs.record_usage(&run, 1, Usd::from_cents(1)).unwrap();
    assert_eq!(rp.events.list(&run, None).unwrap(), before);
}

#[test]
fn test_token_overflow_rejected() {
    let rp = create_runplane();
    let run = running_run(&rp, "payments-api", "codex:gpt-5");
    for _ in 0..2 {
        rp.runs.record_usage(&run, i64::MAX, Usd::ZERO).unwrap();
    }
    let before = rp.runs.get(&run).unwrap();
    let err = rp.runs.record_usage(&run, i64::MAX, Usd::ZERO).unwrap_err();
    assert_eq!(err.code(), "InvalidDelta");
    assert_eq!(rp.runs.get(&run).unwrap(), before);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Two deltas in sequence equal their sum applied once.
    #[test]
    fn prop_usage_is_additive(
        t1 in 0i64..1_000_000_000,
        t2 in 0i64..1_000_000_000,
        c1 in 0i64..1_000_000_000,
        c2 in 0i64..1_000_000_000,
    ) {
        let rp = create_runplane();
        let split = running_run(&rp, "payments-api", "codex:gpt-5");
        let once = running_run(&rp, "payments-api", "codex:gpt-5");

        rp.runs.record_usage(&split, t1, Usd::from_micros(c1)).unwrap();
        let a = rp.runs.record_usage(&split, t2, Usd::from_micros(c2)).unwrap();
        let b = rp.runs.record_usage(&once, t1 + t2, Usd::from_micros(c1 + c2)).unwrap();

        prop_assert_eq!(a.tokens, b.tokens);
        prop_assert_eq!(a.cost_usd, b.cost_usd);
    }
}
