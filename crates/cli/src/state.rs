//! Session state: the tracker handle plus the `$N` run table.

use runplane::{
    Aggregate, Dashboard, Error, Result, RunFilter, RunId, RunSnapshot, Runplane, TimelineEvent,
};

use crate::parse::{Command, RunRef};

/// What a command produced, before formatting.
#[derive(Debug)]
pub enum Output {
    Created { index: usize, run: RunId },
    Run(RunSnapshot),
    Event(TimelineEvent),
    Events(Vec<TimelineEvent>),
    Runs(Vec<RunSnapshot>),
    Aggregate(Aggregate),
    Dashboard(Dashboard),
}

pub struct SessionState {
    rp: Runplane,
    created: Vec<RunId>,
}

impl SessionState {
    pub fn new(rp: Runplane) -> Self {
        Self {
            rp,
            created: Vec::new(),
        }
    }

    pub fn runplane(&self) -> &Runplane {
        &self.rp
    }

    /// Remember a run so it can be referenced as `$N`. Returns N.
    pub fn remember(&mut self, run: RunId) -> usize {
        self.created.push(run);
        self.created.len()
    }

    pub fn resolve(&self, run: &RunRef) -> Result<RunId> {
        match run {
            RunRef::Id(id) => Ok(*id),
            RunRef::Index(n) => n
                .checked_sub(1)
                .and_then(|i| self.created.get(i))
                .copied()
                .ok_or_else(|| Error::InvalidInput(format!("no run ${} in this session", n))),
        }
    }

    pub fn execute(&mut self, cmd: Command) -> Result<Output> {
        match cmd {
            Command::Create { repo, agent } => {
                let run = self.rp.runs.create(&repo, &agent)?;
                let index = self.remember(run);
                Ok(Output::Created { index, run })
            }
            Command::Transition { run, to, reason } => {
                let run = self.resolve(&run)?;
                let snapshot = self.rp.runs.transition(&run, to, reason.as_deref())?;
                Ok(Output::Run(snapshot))
            }
            Command::Usage { run, tokens, cost } => {
                let run = self.resolve(&run)?;
                Ok(Output::Run(self.rp.runs.record_usage(&run, tokens, cost)?))
            }
            Command::Event { run, kind, label } => {
                let run = self.resolve(&run)?;
                Ok(Output::Event(self.rp.events.append(&run, kind, &label)?))
            }
            Command::Get { run } => {
                let run = self.resolve(&run)?;
                Ok(Output::Run(self.rp.runs.get(&run)?))
            }
            Command::Events { run, since } => {
                let run = self.resolve(&run)?;
                Ok(Output::Events(self.rp.events.list(&run, since)?))
            }
            Command::Runs { status, limit } => {
                let filter = status.map(|s| RunFilter::new().status(s));
                Ok(Output::Runs(self.rp.runs.list(filter.as_ref(), limit)))
            }
            Command::Aggregate { repo } => {
                let filter = repo.map(|r| RunFilter::new().repo(r));
                Ok(Output::Aggregate(self.rp.runs.aggregate(filter.as_ref())))
            }
            Command::Dashboard { limit } => Ok(Output::Dashboard(self.rp.dashboard(limit))),
        }
    }
}
