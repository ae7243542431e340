//! In-memory [`ScoreboardApi`] used by unit tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use futures::future::BoxFuture;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::dao::{
    models::{
        HighscoreRecord, LatestScoreRecord, MachineRecord, MatchSuggestionRecord,
        PlayerProgressRecord, PlayerRecord, TotalHighscoreRecord,
    },
    scoreboard::ScoreboardApi,
    transport::{ApiResult, TransportError},
};

#[derive(Default)]
struct FakeData {
    players: Vec<PlayerRecord>,
    machines: Vec<MachineRecord>,
    highscores: HashMap<String, Vec<HighscoreRecord>>,
    latest: Vec<LatestScoreRecord>,
    totals: Vec<TotalHighscoreRecord>,
    progress: HashMap<String, String>,
    suggestions: HashMap<(String, String), Vec<String>>,
    free: Vec<String>,
    failing: HashSet<String>,
    held: HashMap<String, oneshot::Receiver<()>>,
    calls: Vec<String>,
}

/// Canned responses keyed by endpoint path; paths marked as failing answer with HTTP 500.
///
/// Answers are computed when the request is issued, so a held request still returns the data
/// that was configured at that point.
#[derive(Clone, Default)]
pub struct FakeScoreboardApi {
    data: Arc<Mutex<FakeData>>,
}

impl FakeScoreboardApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_players(self, players: &[(&str, &str)]) -> Self {
        self.update(|data| {
            data.players = players
                .iter()
                .map(|(abbreviation, name)| PlayerRecord {
                    abbreviation: abbreviation.to_string(),
                    name: name.to_string(),
                })
                .collect();
        })
    }

    pub fn with_machines(self, machines: &[(&str, &str)]) -> Self {
        self.update(|data| {
            data.machines = machines
                .iter()
                .map(|(abbreviation, long_name)| MachineRecord {
                    abbreviation: abbreviation.to_string(),
                    long_name: long_name.to_string(),
                    room: None,
                })
                .collect();
        })
    }

    /// Ranking for `machine` as `(player, score)` pairs in response order, without explicit ranks.
    pub fn with_highscores(self, machine: &str, rows: &[(&str, i64)]) -> Self {
        let rows = rows
            .iter()
            .map(|(player, score)| HighscoreRecord {
                player: player.to_string(),
                score: *score,
                rank: None,
                points: None,
                guest: None,
            })
            .collect();
        self.with_highscore_records(machine, rows)
    }

    pub fn with_highscore_records(self, machine: &str, rows: Vec<HighscoreRecord>) -> Self {
        self.update(|data| {
            data.highscores.insert(machine.to_string(), rows);
        })
    }

    pub fn with_latest(self, latest: Vec<LatestScoreRecord>) -> Self {
        self.update(|data| data.latest = latest)
    }

    pub fn with_totals(self, totals: &[(&str, u32, f64)]) -> Self {
        self.update(|data| {
            data.totals = totals
                .iter()
                .map(|(player, rank, total_points)| TotalHighscoreRecord {
                    player: player.to_string(),
                    rank: *rank,
                    total_points: *total_points,
                })
                .collect();
        })
    }

    pub fn with_progress(self, player: &str, label: &str) -> Self {
        self.update(|data| {
            data.progress.insert(player.to_string(), label.to_string());
        })
    }

    pub fn with_suggestion(self, player1: &str, player2: &str, machines: &[&str]) -> Self {
        self.update(|data| {
            data.suggestions.insert(
                (player1.to_string(), player2.to_string()),
                machines.iter().map(|m| m.to_string()).collect(),
            );
        })
    }

    pub fn with_free(self, machines: &[&str]) -> Self {
        self.update(|data| data.free = machines.iter().map(|m| m.to_string()).collect())
    }

    /// Make every request to `path` (e.g. `"players"`, `"highscore/AFM"`) fail.
    pub fn failing(self, path: &str) -> Self {
        self.update(|data| {
            data.failing.insert(path.to_string());
        })
    }

    /// Hold the next request to `path` until the returned sender fires or is dropped.
    pub fn hold(&self, path: &str) -> oneshot::Sender<()> {
        let (release, held) = oneshot::channel();
        self.lock().held.insert(path.to_string(), held);
        release
    }

    /// Paths requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn update(self, apply: impl FnOnce(&mut FakeData)) -> Self {
        apply(&mut *self.lock());
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeData> {
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn respond<T, F>(&self, path: String, value: F) -> BoxFuture<'static, ApiResult<T>>
    where
        T: Send + 'static,
        F: FnOnce(&FakeData) -> Option<T>,
    {
        let (result, held) = {
            let mut data = self.lock();
            data.calls.push(path.clone());
            let held = data.held.remove(&path);
            let result = if data.failing.contains(&path) {
                Err(TransportError::Status { path, status: 500 })
            } else {
                value(&*data).ok_or(TransportError::Status { path, status: 404 })
            };
            (result, held)
        };
        Box::pin(async move {
            if let Some(held) = held {
                let _ = held.await;
            }
            result
        })
    }
}

impl ScoreboardApi for FakeScoreboardApi {
    fn players(&self) -> BoxFuture<'static, ApiResult<Vec<PlayerRecord>>> {
        self.respond("players".into(), |data| Some(data.players.clone()))
    }

    fn machines(&self) -> BoxFuture<'static, ApiResult<Vec<MachineRecord>>> {
        self.respond("pinball".into(), |data| Some(data.machines.clone()))
    }

    fn machine_highscores(
        &self,
        machine: &str,
    ) -> BoxFuture<'static, ApiResult<Vec<HighscoreRecord>>> {
        let key = machine.to_string();
        self.respond(format!("highscore/{machine}"), move |data| {
            Some(data.highscores.get(&key).cloned().unwrap_or_default())
        })
    }

    fn latest_scores(&self) -> BoxFuture<'static, ApiResult<Vec<LatestScoreRecord>>> {
        self.respond("latestscores".into(), |data| Some(data.latest.clone()))
    }

    fn total_highscores(&self) -> BoxFuture<'static, ApiResult<Vec<TotalHighscoreRecord>>> {
        self.respond("total_highscore".into(), |data| Some(data.totals.clone()))
    }

    fn player_progress(&self, player: &str) -> BoxFuture<'static, ApiResult<PlayerProgressRecord>> {
        let key = player.to_string();
        self.respond(format!("get_player/{player}"), move |data| {
            data.progress
                .get(&key)
                .map(|label| PlayerProgressRecord {
                    tournament_progress: Value::String(label.clone()),
                })
        })
    }

    fn match_suggestion(
        &self,
        player1: &str,
        player2: &str,
    ) -> BoxFuture<'static, ApiResult<MatchSuggestionRecord>> {
        let key = (player1.to_string(), player2.to_string());
        self.respond(format!("matchsuggestion/{player1}/{player2}"), move |data| {
            Some(MatchSuggestionRecord {
                common_unplayed_machines: data.suggestions.get(&key).cloned().unwrap_or_default(),
            })
        })
    }

    fn free_scores(&self) -> BoxFuture<'static, ApiResult<Vec<String>>> {
        self.respond("getfreescores".into(), |data| Some(data.free.clone()))
    }
}
