//! Output formatting: human-readable tables or JSON.

use runplane::format::{format_cost, group_thousands};
use runplane::{Aggregate, Error, RunSnapshot, TimelineEvent};
use serde_json::json;

use crate::state::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format_human(output),
        OutputMode::Json => format_json(output),
    }
}

/// Errors carry the canonical code in both modes.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format!("(error) {}: {}", err.code(), err),
        OutputMode::Json => match serde_json::to_string(&err.to_wire()) {
            Ok(s) => s,
            Err(_) => json!({ "code": err.code(), "message": err.to_string() }).to_string(),
        },
    }
}

// Serialized directly rather than through `Value`, which cannot hold
// totals past u64.
fn format_json(output: &Output) -> String {
    let rendered = match output {
        Output::Created { index, run } => {
            serde_json::to_string_pretty(&json!({ "ref": format!("${}", index), "id": run }))
        }
        Output::Run(run) => serde_json::to_string_pretty(run),
        Output::Event(event) => serde_json::to_string_pretty(event),
        Output::Events(events) => serde_json::to_string_pretty(events),
        Output::Runs(runs) => serde_json::to_string_pretty(runs),
        Output::Aggregate(totals) => serde_json::to_string_pretty(totals),
        Output::Dashboard(dashboard) => serde_json::to_string_pretty(dashboard),
    };
    match rendered {
        Ok(s) => s,
        Err(e) => json!({ "code": "Serialization", "message": e.to_string() }).to_string(),
    }
}

fn format_human(output: &Output) -> String {
    match output {
        Output::Created { index, run } => format!("${} {}", index, run),
        Output::Run(run) => format_run(run),
        Output::Event(event) => format_event(event),
        Output::Events(events) if events.is_empty() => "(empty timeline)".to_string(),
        Output::Events(events) => events.iter().map(format_event).collect::<Vec<_>>().join("\n"),
        Output::Runs(runs) => format_run_table(runs),
        Output::Aggregate(totals) => format_aggregate(totals),
        Output::Dashboard(dashboard) => {
            let mut out = format_aggregate(&dashboard.metrics.totals);
            out.push_str("\n\n");
            let runs: Vec<RunSnapshot> = dashboard.runs.iter().map(|row| row.run.clone()).collect();
            out.push_str(&format_run_table(&runs));
            out.push_str("\n\n");
            if dashboard.timeline.is_empty() {
                out.push_str("(empty timeline)");
            } else {
                let lines: Vec<String> = dashboard.timeline.iter().map(format_event).collect();
                out.push_str(&lines.join("\n"));
            }
            out
        }
    }
}

fn format_run(run: &RunSnapshot) -> String {
    let mut lines = vec![
        format!("id:        {}", run.id),
        format!("repo:      {}", run.repo),
        format!("agent:     {}", run.agent),
        format!("status:    {} [{}]", run.status, run.status.badge_class()),
        format!("tokens:    {}", group_thousands(run.tokens.into())),
        format!("cost:      {}", format_cost(run.cost_usd.into())),
        format!("attempts:  {}", run.attempts),
        format!("created:   {}", run.created_at),
        format!("updated:   {}", run.updated_at),
    ];
    if let Some(started) = run.started_at {
        lines.push(format!("started:   {}", started));
    }
    if let Some(ended) = run.ended_at {
        lines.push(format!("ended:     {}", ended));
    }
    if let Some(error) = &run.error {
        lines.push(format!("error:     {}", error));
    }
    lines.join("\n")
}

fn format_event(event: &TimelineEvent) -> String {
    format!(
        "{}  {:<8} {:<9} {}",
        event.at,
        event.id.to_string(),
        event.kind.as_str(),
        event.label
    )
}

fn format_run_table(runs: &[RunSnapshot]) -> String {
    if runs.is_empty() {
        return "(no runs)".to_string();
    }
    let repo_w = runs.iter().map(|r| r.repo.len()).max().unwrap_or(0).max(4);
    let agent_w = runs.iter().map(|r| r.agent.len()).max().unwrap_or(0).max(5);

    let mut lines = vec![format!(
        "{:<36}  {:<repo_w$}  {:<agent_w$}  {:<16}  {:>10}  {:>9}",
        "RUN", "REPO", "AGENT", "STATUS", "TOKENS", "COST"
    )];
    for run in runs {
        lines.push(format!(
            "{:<36}  {:<repo_w$}  {:<agent_w$}  {:<16}  {:>10}  {:>9}",
            run.id.to_string(),
            run.repo,
            run.agent,
            run.status.as_str(),
            group_thousands(run.tokens.into()),
            format_cost(run.cost_usd.into()),
        ));
    }
    lines.join("\n")
}

fn format_aggregate(totals: &Aggregate) -> String {
    format!(
        "runs:      {}\ntokens:    {}\ncost:      {}\nfailures:  {}",
        totals.run_count,
        group_thousands(totals.total_tokens),
        format_cost(totals.total_cost_usd),
        totals.failure_count
    )
}
