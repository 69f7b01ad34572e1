//! Timeline Tests
//!
//! Append-only event logs, ordering, `since` filtering and the
//! cross-run recent feed.

use crate::*;

#[test]
fn test_lifecycle_writes_run_events() {
    let rp = create_runplane();
    let run = running_run(&rp, "payments-api", "codex:gpt-5");
    rp.runs.complete(&run).unwrap();

    let labels: Vec<String> = rp
        .events
        .list(&run, None)
        .unwrap()
        .into_iter()
        .map(|e| e.label)
        .collect();
    assert_eq!(
        labels,
        ["run.created", "run.claimed", "run.running", "run.completed"]
    );
}

#[test]
fn test_reason_lands_in_label() {
    let rp = create_runplane();
    let run = running_run(&rp, "frontend-web", "gemini:2.5-pro");
    rp.runs.fail(&run, "adapter timeout").unwrap();

    let last = rp.events.list(&run, None).unwrap().pop().unwrap();
    assert_eq!(last.kind, EventKind::Run);
    assert_eq!(last.label, "run.failed (adapter timeout)");
}

#[test]
fn test_append_annotations() {
    let rp = create_runplane();
    let run = running_run(&rp, "infra-iac", "claude:sonnet");

    let policy = rp
        .events
        .append(&run, EventKind::Policy, "policy.evaluated -> require_approval")
        .unwrap();
    assert_eq!(policy.run_id, run);
    assert_eq!(policy.kind, EventKind::Policy);

    // Annotations leave the status alone
    assert_eq!(rp.runs.get(&run).unwrap().status, RunStatus::Running);

    let last = rp.events.list(&run, None).unwrap().pop().unwrap();
    assert_eq!(last, policy);
}

#[test]
fn test_append_after_finish() {
    let rp = create_runplane();
    let run = running_run(&rp, "payments-api", "codex:gpt-5");
    rp.runs.complete(&run).unwrap();
    rp.events
        .append(&run, EventKind::Artifact, "artifact.recorded (summary)")
        .unwrap();
    assert_eq!(rp.events.list(&run, None).unwrap().len(), 5);
}

#[test]
fn test_append_rejects_empty_label_and_unknown_run() {
    let rp = create_runplane();
    let run = rp.runs.create("payments-api", "codex:gpt-5").unwrap();
    assert_eq!(
        rp.events.append(&run, EventKind::System, "   ").unwrap_err().code(),
        "InvalidInput"
    );
    assert!(rp
        .events
        .append(&RunId::new(), EventKind::System, "x")
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_listing_is_repeatable() {
    let rp = create_runplane();
    let run = running_run(&rp, "payments-api", "codex:gpt-5");
    rp.events.append(&run, EventKind::Artifact, "artifact.recorded (diff)").unwrap();

    let first = rp.events.list(&run, None).unwrap();
    let second = rp.events.list(&run, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_events_ordered_by_time_then_insertion() {
    let (rp, clock) = create_runplane_with_clock();
    let run = rp.runs.create("payments-api", "codex:gpt-5").unwrap();
    // Same instant: insertion order decides
    rp.events.append(&run, EventKind::System, "a").unwrap();
    rp.events.append(&run, EventKind::System, "b").unwrap();
    tick(&clock, 1);
    rp.events.append(&run, EventKind::System, "c").unwrap();

    let events = rp.events.list(&run, None).unwrap();
    let keys: Vec<_> = events.iter().map(|e| e.order_key()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    let labels: Vec<&str> = events.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["run.created", "a", "b", "c"]);
}

#[test]
fn test_since_is_inclusive() {
    let (rp, clock) = create_runplane_with_clock();
    let run = rp.runs.create("payments-api", "codex:gpt-5").unwrap();
    tick(&clock, 1_000);
    let cutoff = clock.now();
    rp.runs.claim(&run).unwrap();
    tick(&clock, 1_000);
    rp.runs.start(&run).unwrap();

    let since = rp.events.list(&run, Some(cutoff)).unwrap();
    let labels: Vec<&str> = since.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["run.claimed", "run.running"]);
    assert!(since.iter().all(|e| e.at >= cutoff));
}

#[test]
fn test_timelines_are_per_run() {
    let rp = create_runplane();
    let a = rp.runs.create("payments-api", "codex:gpt-5").unwrap();
    let b = rp.runs.create("infra-iac", "claude:sonnet").unwrap();
    rp.events.append(&a, EventKind::System, "only on a").unwrap();

    assert!(rp.events.list(&a, None).unwrap().iter().all(|e| e.run_id == a));
    assert_eq!(rp.events.list(&b, None).unwrap().len(), 1);
}

#[test]
fn test_event_ids_are_unique_across_runs() {
    let rp = create_runplane();
    let a = running_run(&rp, "payments-api", "codex:gpt-5");
    let b = running_run(&rp, "infra-iac", "claude:sonnet");

    let mut ids: Vec<_> = rp
        .events
        .list(&a, None)
        .unwrap()
        .into_iter()
        .chain(rp.events.list(&b, None).unwrap())
        .map(|e| e.id)
        .collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn test_recent_feed_newest_first() {
    let (rp, clock) = create_runplane_with_clock();
    let a = rp.runs.create("payments-api", "codex:gpt-5").unwrap();
    tick(&clock, 1);
    let b = rp.runs.create("infra-iac", "claude:sonnet").unwrap();
    tick(&clock, 1);
    rp.runs.claim(&a).unwrap();

    let recent = rp.events.recent(None);
    let order: Vec<(RunId, &str)> = recent.iter().map(|e| (e.run_id, e.label.as_str())).collect();
    assert_eq!(
        order,
        [(a, "run.claimed"), (b, "run.created"), (a, "run.created")]
    );
    assert_eq!(rp.events.recent(Some(1)).len(), 1);
}

#[test]
fn test_recent_feed_respects_config_limit() {
    let rp = Runplane::builder()
        .config_toml("recent_events_limit = 2")
        .unwrap()
        .build()
        .unwrap();
    let run = running_run(&rp, "payments-api", "codex:gpt-5");
    rp.runs.complete(&run).unwrap();
    assert_eq!(rp.events.recent(None).len(), 2);
}

#[test]
fn test_long_labels_are_truncated() {
    let rp = Runplane::builder()
        .config_toml("max_label_len = 8")
        .unwrap()
        .build()
        .unwrap();
    let run = rp.runs.create("payments-api", "codex:gpt-5").unwrap();
    let event = rp
        .events
        .append(&run, EventKind::Artifact, "artifact.recorded (diff)")
        .unwrap();
    assert_eq!(event.label, "artifact");
}
