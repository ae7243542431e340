use std::{fmt, time::SystemTime};

use uuid::Uuid;

/// Identifier of a refresh cycle.
pub type CycleId = Uuid;

/// Upstream resource a fetch targeted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    Players,
    Machines,
    /// Per-machine ranking, keyed by machine abbreviation.
    MachineStandings(String),
    LatestScores,
    HighScores,
    /// Per-player progress lookup, keyed by player abbreviation.
    PlayerProgress(String),
    FreeScores,
}

impl fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchTarget::Players => f.write_str("players"),
            FetchTarget::Machines => f.write_str("machines"),
            FetchTarget::MachineStandings(machine) => write!(f, "standings:{machine}"),
            FetchTarget::LatestScores => f.write_str("latest_scores"),
            FetchTarget::HighScores => f.write_str("high_scores"),
            FetchTarget::PlayerProgress(player) => write!(f, "progress:{player}"),
            FetchTarget::FreeScores => f.write_str("free_scores"),
        }
    }
}

/// A fetch that failed during a cycle; its branch kept or dropped data per the isolation policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub target: FetchTarget,
    pub error: String,
}

/// Outcome of every fetch issued by one refresh cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub id: CycleId,
    pub started_at: SystemTime,
    pub finished_at: Option<SystemTime>,
    pub succeeded: usize,
    pub failures: Vec<FetchFailure>,
}

impl CycleReport {
    /// Open a report for a cycle starting now.
    pub fn start() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: SystemTime::now(),
            finished_at: None,
            succeeded: 0,
            failures: Vec::new(),
        }
    }

    /// Record the outcome of a single fetch.
    pub fn record<T, E: fmt::Display>(&mut self, target: FetchTarget, result: &Result<T, E>) {
        match result {
            Ok(_) => self.succeeded += 1,
            Err(err) => self.failures.push(FetchFailure {
                target,
                error: err.to_string(),
            }),
        }
    }

    /// Mark the cycle as settled.
    pub fn finish(mut self) -> Self {
        self.finished_at = Some(SystemTime::now());
        self
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failures.len()
    }

    pub fn failed(&self, target: &FetchTarget) -> bool {
        self.failures.iter().any(|failure| &failure.target == target)
    }
}
