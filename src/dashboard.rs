//! Presentation snapshot.
//!
//! A [`Dashboard`] is everything a control-plane page renders in one read:
//! headline totals, the run queue and the recent timeline. Display strings are
//! precomputed so every consumer formats numbers the same way.

use crate::format::{format_cost, group_thousands};
use crate::types::{Aggregate, RunSnapshot, TimelineEvent};
use runplane_engine::Tracker;
use serde::Serialize;

/// Headline totals with display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Raw totals
    #[serde(flatten)]
    pub totals: Aggregate,
    /// `28,940`
    pub tokens_display: String,
    /// `$1.94`
    pub cost_display: String,
}

impl From<Aggregate> for Metrics {
    fn from(totals: Aggregate) -> Self {
        Metrics {
            tokens_display: group_thousands(totals.total_tokens),
            cost_display: format_cost(totals.total_cost_usd),
            totals,
        }
    }
}

/// One row of the run queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRow {
    /// The run
    #[serde(flatten)]
    pub run: RunSnapshot,
    /// Status indicator class
    pub badge_class: &'static str,
    /// `12,890`
    pub tokens_display: String,
    /// `$0.91`
    pub cost_display: String,
}

impl From<RunSnapshot> for RunRow {
    fn from(run: RunSnapshot) -> Self {
        RunRow {
            badge_class: run.status.badge_class(),
            tokens_display: group_thousands(run.tokens.into()),
            cost_display: format_cost(run.cost_usd.into()),
            run,
        }
    }
}

/// Everything a control-plane page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Totals over every run
    pub metrics: Metrics,
    /// Most recently updated runs
    pub runs: Vec<RunRow>,
    /// Newest events across all runs
    pub timeline: Vec<TimelineEvent>,
}

impl Dashboard {
    /// Metrics, rows and timeline all come from one consistent scan.
    pub(crate) fn capture(tracker: &Tracker, limit: Option<usize>) -> Self {
        let overview = tracker.overview(limit);
        Dashboard {
            metrics: overview.totals.into(),
            runs: overview.runs.into_iter().map(RunRow::from).collect(),
            timeline: overview.timeline,
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
