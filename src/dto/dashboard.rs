use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::{
    dashboard::{Dashboard, HighScoreEntry, LatestScoreEntry, RankingRow, StandingsTable},
    refresh::RefreshCountdown,
    rotation::RotationState,
    view::ViewState,
};

/// One line of a machine ranking.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RankingRowDto {
    pub rank: u32,
    pub player: String,
    pub score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    pub guest: bool,
}

impl From<&RankingRow> for RankingRowDto {
    fn from(row: &RankingRow) -> Self {
        Self {
            rank: row.rank,
            player: row.player.clone(),
            score: row.score,
            points: row.points,
            guest: row.guest,
        }
    }
}

/// Ranking table of one machine.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StandingsTableDto {
    pub heading: String,
    pub machine: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub rows: Vec<RankingRowDto>,
}

impl From<&StandingsTable> for StandingsTableDto {
    fn from(table: &StandingsTable) -> Self {
        Self {
            heading: table.heading.clone(),
            machine: table.machine.clone(),
            room: table.room.clone(),
            rows: table.rows.iter().map(RankingRowDto::from).collect(),
        }
    }
}

/// Carousel position inside the visible tables.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct RotationDto {
    pub index: usize,
    pub count: usize,
    pub paused: bool,
}

impl From<RotationState> for RotationDto {
    fn from(rotation: RotationState) -> Self {
        Self {
            index: rotation.index(),
            count: rotation.count(),
            paused: rotation.is_paused(),
        }
    }
}

/// Countdown to the next refresh cycle.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct RefreshDto {
    pub remaining_ticks: u32,
    pub period_ticks: u32,
    /// Remaining share of the period, from 100 down to 0.
    pub progress: f64,
}

impl From<RefreshCountdown> for RefreshDto {
    fn from(countdown: RefreshCountdown) -> Self {
        Self {
            remaining_ticks: countdown.remaining(),
            period_ticks: countdown.period(),
            progress: countdown.progress(),
        }
    }
}

/// Latest score with player and machine resolved to display names.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LatestScoreDto {
    pub date: String,
    pub machine: String,
    pub player: String,
    pub points: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl LatestScoreDto {
    fn resolve(entry: &LatestScoreEntry, dashboard: &Dashboard) -> Self {
        Self {
            date: entry.date.clone(),
            machine: dashboard.machine_name(&entry.machine),
            player: dashboard.player_name(&entry.player),
            points: entry.points,
            rank: entry.rank,
        }
    }
}

/// Overall ranking entry with the player's tournament progress, when known.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HighScoreDto {
    pub rank: u32,
    pub player: String,
    pub total_points: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
}

impl HighScoreDto {
    fn resolve(entry: &HighScoreEntry, dashboard: &Dashboard) -> Self {
        Self {
            rank: entry.rank,
            player: dashboard.player_name(&entry.player),
            total_points: entry.total_points,
            progress: dashboard.progress_label(&entry.player).map(str::to_string),
        }
    }
}

/// Tables left visible by the active search, with the carousel position inside them.
#[derive(Debug, Serialize, ToSchema)]
pub struct ViewResponse {
    pub query: String,
    pub rotation: RotationDto,
    pub tables: Vec<StandingsTableDto>,
}

impl From<&ViewState> for ViewResponse {
    fn from(view: &ViewState) -> Self {
        Self {
            query: view.query().to_string(),
            rotation: view.rotation().into(),
            tables: view.visible_tables().map(StandingsTableDto::from).collect(),
        }
    }
}

/// Table currently on screen.
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentTableResponse {
    pub rotation: RotationDto,
    pub table: StandingsTableDto,
}

/// Everything the kiosk renders, in one payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// True until the first refresh cycle has settled.
    pub loading: bool,
    #[serde(flatten)]
    pub view: ViewResponse,
    pub refresh: RefreshDto,
    pub latest_scores: Vec<LatestScoreDto>,
    pub high_scores: Vec<HighScoreDto>,
    /// Display names of the machines nobody has scored on yet.
    pub free_machines: Vec<String>,
}

impl DashboardResponse {
    /// Assemble the payload from consistent snapshots of the shared state.
    pub fn build(dashboard: &Dashboard, view: &ViewState, refresh: RefreshCountdown) -> Self {
        Self {
            loading: dashboard.loading,
            view: view.into(),
            refresh: refresh.into(),
            latest_scores: dashboard
                .latest_scores
                .iter()
                .map(|entry| LatestScoreDto::resolve(entry, dashboard))
                .collect(),
            high_scores: dashboard
                .high_scores
                .iter()
                .map(|entry| HighScoreDto::resolve(entry, dashboard))
                .collect(),
            free_machines: dashboard
                .free_machines
                .iter()
                .map(|machine| dashboard.machine_name(machine))
                .collect(),
        }
    }
}

/// Search request issued from the kiosk's filter box.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SearchRequest {
    /// Substring matched against table headings; blank clears the filter. At most 64 characters.
    #[validate(length(max = 64))]
    pub query: String,
}
