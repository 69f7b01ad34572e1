//! Demo fixture: three runs in the states a control-plane page shows first.
//!
//! Built only through tracker operations, so every seeded run has a
//! consistent timeline. Seeded runs become `$1`, `$2` and `$3`.

use runplane::{EventKind, Result, Usd};

use crate::state::SessionState;

pub fn load(state: &mut SessionState) -> Result<()> {
    let rp = state.runplane().clone();

    let payments = rp.runs.create("payments-api", "codex:gpt-5")?;
    rp.runs.claim(&payments)?;
    rp.runs.start(&payments)?;
    rp.events
        .append(&payments, EventKind::Policy, "policy.evaluated -> allow")?;
    rp.runs
        .record_usage(&payments, 12_890, Usd::from_cents(91))?;
    rp.events
        .append(&payments, EventKind::Artifact, "artifact.recorded (diff)")?;
    state.remember(payments);

    let infra = rp.runs.create("infra-iac", "claude:sonnet")?;
    rp.runs.claim(&infra)?;
    rp.runs.start(&infra)?;
    rp.runs.record_usage(&infra, 9_230, Usd::from_cents(66))?;
    rp.events
        .append(&infra, EventKind::Policy, "policy.evaluated -> require_approval")?;
    rp.runs.request_approval(&infra, "require_approval")?;
    state.remember(infra);

    let frontend = rp.runs.create("frontend-web", "gemini:2.5-pro")?;
    rp.runs.claim(&frontend)?;
    rp.runs.start(&frontend)?;
    rp.runs
        .record_usage(&frontend, 6_820, Usd::from_cents(37))?;
    rp.events
        .append(&frontend, EventKind::System, "adapter.error (timeout)")?;
    rp.runs.fail(&frontend, "adapter timeout")?;
    state.remember(frontend);

    tracing::debug!(runs = 3, "seeded demo runs");
    Ok(())
}
