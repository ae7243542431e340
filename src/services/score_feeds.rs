//! Resolver-independent feeds: latest scores, overall ranking with player progress, and the
//! machines nobody has scored on yet.

use futures::future::{join_all, join3};
use tracing::warn;

use crate::{
    dao::{scoreboard::ScoreboardApi, transport::ApiResult},
    state::{
        dashboard::{HighScoreEntry, LatestScoreEntry, ProgressMap},
        report::{CycleReport, FetchTarget},
    },
};

/// Latest scores, highest points first.
pub async fn fetch_latest_scores(api: &dyn ScoreboardApi) -> ApiResult<Vec<LatestScoreEntry>> {
    let mut entries = api
        .latest_scores()
        .await?
        .into_iter()
        .map(|record| LatestScoreEntry {
            date: record.date,
            machine: record.pinball,
            player: record.player,
            points: record.points,
            rank: record.rank,
        })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| b.points.total_cmp(&a.points));
    Ok(entries)
}

/// Overall tournament ranking, best rank first.
pub async fn fetch_high_scores(api: &dyn ScoreboardApi) -> ApiResult<Vec<HighScoreEntry>> {
    let mut entries = api
        .total_highscores()
        .await?
        .into_iter()
        .map(|record| HighScoreEntry {
            player: record.player,
            rank: record.rank,
            total_points: record.total_points,
        })
        .collect::<Vec<_>>();
    entries.sort_by_key(|entry| entry.rank);
    Ok(entries)
}

/// Progress label of a single player.
pub async fn fetch_player_progress(api: &dyn ScoreboardApi, player: &str) -> ApiResult<String> {
    Ok(api.player_progress(player).await?.label())
}

/// Abbreviations of the machines without any recorded score.
pub async fn fetch_free_scores(api: &dyn ScoreboardApi) -> ApiResult<Vec<String>> {
    api.free_scores().await
}

/// Raw outcome of every feed fetched by one cycle.
#[derive(Debug)]
pub struct ScoreFeeds {
    pub latest_scores: ApiResult<Vec<LatestScoreEntry>>,
    pub high_scores: ApiResult<Vec<HighScoreEntry>>,
    /// Progress lookups, one per ranked player; empty when the ranking itself failed.
    pub progress: Vec<(String, ApiResult<String>)>,
    pub free_machines: ApiResult<Vec<String>>,
}

/// Feed values to publish; `None` keeps the previously published value.
#[derive(Debug, Default)]
pub struct SettledFeeds {
    pub latest_scores: Option<Vec<LatestScoreEntry>>,
    pub high_scores: Option<Vec<HighScoreEntry>>,
    pub free_machines: Option<Vec<String>>,
    /// Labels of the freshly ranked players, built for this cycle only.
    pub progress: Option<ProgressMap>,
}

/// Fetch every feed concurrently. The progress fan-out starts once the ranking is known.
pub async fn fetch_score_feeds(api: &dyn ScoreboardApi) -> ScoreFeeds {
    let ranking = async {
        let high_scores = fetch_high_scores(api).await;
        let progress = match &high_scores {
            Ok(entries) => fetch_all_progress(api, entries).await,
            Err(_) => Vec::new(),
        };
        (high_scores, progress)
    };

    let (latest_scores, (high_scores, progress), free_machines) =
        join3(fetch_latest_scores(api), ranking, fetch_free_scores(api)).await;

    ScoreFeeds {
        latest_scores,
        high_scores,
        progress,
        free_machines,
    }
}

async fn fetch_all_progress(
    api: &dyn ScoreboardApi,
    entries: &[HighScoreEntry],
) -> Vec<(String, ApiResult<String>)> {
    let lookups = entries.iter().map(|entry| async move {
        (
            entry.player.clone(),
            fetch_player_progress(api, &entry.player).await,
        )
    });
    join_all(lookups).await
}

impl ScoreFeeds {
    /// Record every outcome and keep only the feeds that succeeded.
    ///
    /// Progress labels are rebuilt for the new ranking: a player whose lookup failed keeps the
    /// label from `previous`, players no longer ranked are dropped.
    pub fn settle(self, previous: &ProgressMap, report: &mut CycleReport) -> SettledFeeds {
        report.record(FetchTarget::LatestScores, &self.latest_scores);
        report.record(FetchTarget::HighScores, &self.high_scores);
        report.record(FetchTarget::FreeScores, &self.free_machines);

        let progress = if self.high_scores.is_ok() {
            let mut labels = ProgressMap::new();
            for (player, result) in self.progress {
                report.record(FetchTarget::PlayerProgress(player.clone()), &result);
                match result {
                    Ok(label) => {
                        labels.insert(player, label);
                    }
                    Err(err) => {
                        warn!(player = %player, error = %err, "player progress unavailable");
                        if let Some(label) = previous.get(&player) {
                            labels.insert(player, label.clone());
                        }
                    }
                }
            }
            Some(labels)
        } else {
            None
        };

        SettledFeeds {
            latest_scores: keep("latest scores", self.latest_scores),
            high_scores: keep("high scores", self.high_scores),
            free_machines: keep("free scores", self.free_machines),
            progress,
        }
    }
}

fn keep<T>(feed: &'static str, result: ApiResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(feed, error = %err, "score feed unavailable; keeping previous value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{fake::FakeScoreboardApi, models::LatestScoreRecord};

    fn latest(player: &str, points: f64) -> LatestScoreRecord {
        LatestScoreRecord {
            date: "2024-05-01 20:15".into(),
            pinball: "AFM".into(),
            player: player.into(),
            points,
            rank: None,
        }
    }

    #[tokio::test]
    async fn latest_scores_sorted_by_points_descending() {
        let api = FakeScoreboardApi::new().with_latest(vec![
            latest("JSM", 3.0),
            latest("PRN", 12.5),
            latest("ABC", 7.0),
        ]);

        let entries = fetch_latest_scores(&api).await.unwrap();
        let players = entries.iter().map(|e| e.player.as_str()).collect::<Vec<_>>();
        assert_eq!(players, vec!["PRN", "ABC", "JSM"]);
        assert_eq!(entries[0].machine, "AFM");
    }

    #[tokio::test]
    async fn high_scores_sorted_by_rank() {
        let api = FakeScoreboardApi::new().with_totals(&[
            ("PRN", 3, 10.0),
            ("JSM", 1, 42.0),
            ("ABC", 2, 30.0),
        ]);

        let entries = fetch_high_scores(&api).await.unwrap();
        let ranks = entries.iter().map(|e| e.rank).collect::<Vec<_>>();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn progress_failures_are_isolated_per_player() {
        let api = FakeScoreboardApi::new()
            .with_totals(&[("JSM", 1, 42.0), ("PRN", 2, 30.0)])
            .with_progress("JSM", "7/12");

        let feeds = fetch_score_feeds(&api).await;
        let mut report = CycleReport::start();
        let settled = feeds.settle(&ProgressMap::new(), &mut report);

        assert_eq!(settled.high_scores.map(|e| e.len()), Some(2));
        let progress = settled.progress.unwrap();
        assert_eq!(progress.get("JSM").map(String::as_str), Some("7/12"));
        assert!(progress.get("PRN").is_none());
        assert!(report.failed(&FetchTarget::PlayerProgress("PRN".into())));
        assert!(!report.failed(&FetchTarget::PlayerProgress("JSM".into())));
    }

    #[tokio::test]
    async fn progress_is_rebuilt_for_the_new_ranking() {
        let api = FakeScoreboardApi::new()
            .with_totals(&[("JSM", 1, 42.0), ("PRN", 2, 30.0)])
            .with_progress("JSM", "8/12");
        let mut previous = ProgressMap::new();
        previous.insert("OLD".into(), "12/12".into());
        previous.insert("JSM".into(), "7/12".into());
        previous.insert("PRN".into(), "5/12".into());

        let feeds = fetch_score_feeds(&api).await;
        let settled = feeds.settle(&previous, &mut CycleReport::start());

        let progress = settled.progress.unwrap();
        assert_eq!(progress.get("JSM").map(String::as_str), Some("8/12"));
        assert_eq!(progress.get("PRN").map(String::as_str), Some("5/12"));
        assert!(progress.get("OLD").is_none());
        assert_eq!(progress.keys().collect::<Vec<_>>(), vec!["JSM", "PRN"]);
    }

    #[tokio::test]
    async fn failed_ranking_skips_progress_fan_out() {
        let api = FakeScoreboardApi::new()
            .with_progress("JSM", "7/12")
            .with_free(&["TZ"])
            .failing("total_highscore");

        let feeds = fetch_score_feeds(&api).await;
        assert!(feeds.progress.is_empty());
        assert!(!api.calls().iter().any(|call| call.starts_with("get_player/")));

        let mut report = CycleReport::start();
        let settled = feeds.settle(&ProgressMap::new(), &mut report);
        assert!(settled.high_scores.is_none());
        assert!(settled.progress.is_none());
        assert_eq!(settled.free_machines, Some(vec!["TZ".to_string()]));
        assert_eq!(settled.latest_scores, Some(Vec::new()));
        assert!(report.failed(&FetchTarget::HighScores));
    }
}
