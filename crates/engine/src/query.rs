//! Read-only queries over the run set
//!
//! [`RunFilter`] is a composable predicate over run attributes. Every
//! criterion that is set must match; an empty filter matches every run.
//! [`Aggregate`] is the fold behind dashboard totals. Its sums are wider
//! than any single run's counters, so totals are exact.

use runplane_core::{RunSnapshot, RunStatus, TimelineEvent, UsdTotal};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&RunSnapshot) -> bool + Send + Sync>;

/// Predicate over run attributes
///
/// # Example
///
/// ```
/// use runplane_core::RunStatus;
/// use runplane_engine::RunFilter;
///
/// let filter = RunFilter::new()
///     .repo("payments-api")
///     .statuses([RunStatus::Running, RunStatus::WaitingApproval]);
/// ```
#[derive(Clone, Default)]
pub struct RunFilter {
    repo: Option<String>,
    agent: Option<String>,
    statuses: Option<Vec<RunStatus>>,
    terminal: Option<bool>,
    custom: Option<Predicate>,
}

impl RunFilter {
    /// Filter matching every run
    pub fn new() -> Self {
        Self::default()
    }

    /// Only runs against `repo`
    pub fn repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Only runs executed by `agent`
    pub fn agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// Only runs currently in `status`
    pub fn status(self, status: RunStatus) -> Self {
        self.statuses([status])
    }

    /// Only runs currently in one of `statuses`
    pub fn statuses(mut self, statuses: impl IntoIterator<Item = RunStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    /// Only finished (`true`) or in-flight (`false`) runs
    pub fn terminal(mut self, terminal: bool) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Add an arbitrary caller predicate
    pub fn custom(mut self, predicate: impl Fn(&RunSnapshot) -> bool + Send + Sync + 'static) -> Self {
        self.custom = Some(Arc::new(predicate));
        self
    }

    /// Check whether `run` satisfies every criterion
    pub fn matches(&self, run: &RunSnapshot) -> bool {
        if let Some(repo) = &self.repo {
            if &run.repo != repo {
                return false;
            }
        }
        if let Some(agent) = &self.agent {
            if &run.agent != agent {
                return false;
            }
        }
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&run.status) {
                return false;
            }
        }
        if let Some(terminal) = self.terminal {
            if run.status.is_terminal() != terminal {
                return false;
            }
        }
        match &self.custom {
            Some(predicate) => predicate(run),
            None => true,
        }
    }
}

impl std::fmt::Debug for RunFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunFilter")
            .field("repo", &self.repo)
            .field("agent", &self.agent)
            .field("statuses", &self.statuses)
            .field("terminal", &self.terminal)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Totals over a set of runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    /// Runs included
    pub run_count: usize,
    /// Sum of tokens
    pub total_tokens: u128,
    /// Sum of cost
    pub total_cost_usd: UsdTotal,
    /// Runs in `failed`
    pub failure_count: usize,
}

impl Aggregate {
    /// Fold one run into the totals
    pub fn accumulate(&mut self, run: &RunSnapshot) {
        self.run_count += 1;
        self.total_tokens += u128::from(run.tokens);
        self.total_cost_usd += run.cost_usd;
        if run.status.is_failure() {
            self.failure_count += 1;
        }
    }

    /// Totals over `runs`
    pub fn from_runs<'a>(runs: impl IntoIterator<Item = &'a RunSnapshot>) -> Self {
        let mut aggregate = Aggregate::default();
        for run in runs {
            aggregate.accumulate(run);
        }
        aggregate
    }
}

/// One consistent read of the run set
///
/// `totals` covers every matching run, while `runs` is cut to the requested
/// limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    /// Totals over every matching run
    pub totals: Aggregate,
    /// Matching runs, most recently updated first
    pub runs: Vec<RunSnapshot>,
    /// Newest events across every run
    pub timeline: Vec<TimelineEvent>,
}
