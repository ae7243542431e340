pub mod dashboard;
pub mod refresh;
pub mod report;
pub mod rotation;
mod sse;
pub mod view;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tokio::sync::{RwLock, watch};

use crate::{config::AppConfig, dao::scoreboard::ScoreboardApi};

pub use self::sse::SseHub;
use self::{
    dashboard::{CycleData, Dashboard, StandingsSet},
    refresh::{RefreshCountdown, TickOutcome},
    report::CycleReport,
    view::ViewState,
};

pub type SharedState = Arc<AppState>;
/// Capacity of the public SSE broadcast channel.
const SSE_CAPACITY: usize = 32;

/// Last on-demand match suggestion; cleared selections carry no players and no machines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSuggestion {
    pub players: Option<(String, String)>,
    /// Machine display names neither selected player has played.
    pub machines: Vec<String>,
}

/// Central application state. Every piece is replaced wholesale by the task that finished
/// computing it, so readers never observe a half-built value.
pub struct AppState {
    api: Arc<dyn ScoreboardApi>,
    config: AppConfig,
    dashboard: RwLock<Arc<Dashboard>>,
    view: RwLock<ViewState>,
    refresh: RwLock<RefreshCountdown>,
    suggestion: RwLock<MatchSuggestion>,
    last_report: RwLock<Option<CycleReport>>,
    cycles_in_flight: AtomicUsize,
    rotation_paused: watch::Sender<bool>,
    sse: SseHub,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The dashboard starts in loading mode until the first refresh cycle settles.
    pub fn new(api: Arc<dyn ScoreboardApi>, config: AppConfig) -> SharedState {
        let (paused_tx, _rx) = watch::channel(false);
        let refresh = RefreshCountdown::new(config.refresh_period_ticks);
        Arc::new(Self {
            api,
            config,
            dashboard: RwLock::new(Arc::new(Dashboard::loading())),
            view: RwLock::new(ViewState::default()),
            refresh: RwLock::new(refresh),
            suggestion: RwLock::new(MatchSuggestion::default()),
            last_report: RwLock::new(None),
            cycles_in_flight: AtomicUsize::new(0),
            rotation_paused: paused_tx,
            sse: SseHub::new(SSE_CAPACITY),
        })
    }

    /// Client used to reach the scoring service.
    pub fn api(&self) -> Arc<dyn ScoreboardApi> {
        self.api.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Snapshot of the last published dashboard data.
    pub async fn dashboard(&self) -> Arc<Dashboard> {
        self.dashboard.read().await.clone()
    }

    /// Snapshot of the visible view.
    pub async fn view(&self) -> ViewState {
        self.view.read().await.clone()
    }

    /// Current refresh countdown.
    pub async fn refresh_countdown(&self) -> RefreshCountdown {
        *self.refresh.read().await
    }

    /// Advance the refresh countdown by one tick.
    pub async fn tick_refresh(&self) -> (RefreshCountdown, TickOutcome) {
        let mut guard = self.refresh.write().await;
        let (next, outcome) = guard.tick();
        *guard = next;
        (next, outcome)
    }

    /// Dashboard data and view taken together, so feeds and standings come from the same cycle.
    pub async fn published(&self) -> (Arc<Dashboard>, ViewState) {
        let dashboard = self.dashboard.read().await;
        let view = self.view.read().await;
        (dashboard.clone(), view.clone())
    }

    /// Publish the result of a settled refresh cycle. The dashboard data and the new standings
    /// set, which re-anchors the rotation, are swapped while both locks are held.
    pub async fn publish_cycle(
        &self,
        data: CycleData,
        standings: StandingsSet,
        report: CycleReport,
    ) -> (Arc<Dashboard>, ViewState) {
        let published = {
            let mut dashboard = self.dashboard.write().await;
            let mut view = self.view.write().await;
            let next_dashboard = Arc::new(dashboard.apply_cycle(data));
            let next_view = view.with_standings(Arc::new(standings));
            *dashboard = next_dashboard.clone();
            *view = next_view.clone();
            (next_dashboard, next_view)
        };
        self.sync_pause(&published.1);

        {
            let mut guard = self.last_report.write().await;
            *guard = Some(report);
        }

        published
    }

    /// Apply a pure transition to the view and propagate the pause flag to the rotation driver.
    pub async fn transition_view<F>(&self, transition: F) -> ViewState
    where
        F: FnOnce(&ViewState) -> ViewState,
    {
        let next = {
            let mut guard = self.view.write().await;
            let next = transition(&guard);
            *guard = next.clone();
            next
        };
        self.sync_pause(&next);
        next
    }

    fn sync_pause(&self, view: &ViewState) {
        let paused = view.rotation().is_paused();
        self.rotation_paused.send_if_modified(|current| {
            if *current == paused {
                false
            } else {
                *current = paused;
                true
            }
        });
    }

    /// Subscribe to rotation pause updates.
    pub fn rotation_paused_watcher(&self) -> watch::Receiver<bool> {
        self.rotation_paused.subscribe()
    }

    pub fn suggestion(&self) -> &RwLock<MatchSuggestion> {
        &self.suggestion
    }

    /// Report of the last settled refresh cycle.
    pub async fn last_report(&self) -> Option<CycleReport> {
        self.last_report.read().await.clone()
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn public_sse(&self) -> &SseHub {
        &self.sse
    }

    /// Number of refresh cycles currently running.
    pub fn cycles_in_flight(&self) -> usize {
        self.cycles_in_flight.load(Ordering::SeqCst)
    }

    /// Mark a refresh cycle as running until the returned guard is dropped.
    pub fn begin_cycle(self: &Arc<Self>) -> CycleGuard {
        self.cycles_in_flight.fetch_add(1, Ordering::SeqCst);
        CycleGuard {
            state: self.clone(),
        }
    }
}

/// Keeps a refresh cycle accounted as in flight.
pub struct CycleGuard {
    state: SharedState,
}

impl Drop for CycleGuard {
    fn drop(&mut self) {
        self.state.cycles_in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::fake::FakeScoreboardApi,
        state::dashboard::{RankingRow, StandingsTable},
    };

    fn standings() -> StandingsSet {
        StandingsSet::new(vec![StandingsTable {
            heading: "Twilight Zone".into(),
            machine: "TZ".into(),
            room: None,
            rows: vec![RankingRow {
                rank: 1,
                player: "J. Smith".into(),
                score: 1_000,
                points: None,
                guest: false,
            }],
        }])
    }

    #[tokio::test]
    async fn dashboard_stays_locked_until_the_view_is_swapped() {
        let state = AppState::new(Arc::new(FakeScoreboardApi::new()), AppConfig::default());
        let reader = state.view.read().await;

        let publisher = tokio::spawn({
            let state = state.clone();
            async move {
                state
                    .publish_cycle(CycleData::default(), standings(), CycleReport::start())
                    .await
            }
        });
        tokio::task::yield_now().await;

        assert!(!publisher.is_finished());
        assert!(state.dashboard.try_read().is_err());

        drop(reader);
        let (dashboard, view) = publisher.await.unwrap();
        assert!(!dashboard.loading);
        assert_eq!(view.standings().len(), 1);

        let (dashboard, view) = state.published().await;
        assert!(!dashboard.loading);
        assert_eq!(view.standings().headings(), vec!["Twilight Zone"]);
        assert!(state.last_report().await.is_some());
    }
}
