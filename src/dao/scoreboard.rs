use futures::future::BoxFuture;

use crate::dao::{
    models::{
        HighscoreRecord, LatestScoreRecord, MachineRecord, MatchSuggestionRecord,
        PlayerProgressRecord, PlayerRecord, TotalHighscoreRecord,
    },
    transport::ApiResult,
};

/// Abstraction over the remote tournament scoring service.
///
/// Every call is a single independent request; callers decide how failures are isolated.
pub trait ScoreboardApi: Send + Sync {
    fn players(&self) -> BoxFuture<'static, ApiResult<Vec<PlayerRecord>>>;
    fn machines(&self) -> BoxFuture<'static, ApiResult<Vec<MachineRecord>>>;
    fn machine_highscores(
        &self,
        machine: &str,
    ) -> BoxFuture<'static, ApiResult<Vec<HighscoreRecord>>>;
    fn latest_scores(&self) -> BoxFuture<'static, ApiResult<Vec<LatestScoreRecord>>>;
    fn total_highscores(&self) -> BoxFuture<'static, ApiResult<Vec<TotalHighscoreRecord>>>;
    fn player_progress(&self, player: &str) -> BoxFuture<'static, ApiResult<PlayerProgressRecord>>;
    fn match_suggestion(
        &self,
        player1: &str,
        player2: &str,
    ) -> BoxFuture<'static, ApiResult<MatchSuggestionRecord>>;
    fn free_scores(&self) -> BoxFuture<'static, ApiResult<Vec<String>>>;
}
