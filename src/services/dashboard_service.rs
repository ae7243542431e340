use tracing::info;

use crate::{
    dto::dashboard::{CurrentTableResponse, DashboardResponse, StandingsTableDto, ViewResponse},
    error::ServiceError,
    services::sse_events,
    state::{SharedState, rotation::RotationEvent},
};

/// Manual carousel navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl From<Direction> for RotationEvent {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Next => RotationEvent::Next,
            Direction::Previous => RotationEvent::Previous,
        }
    }
}

/// Everything the kiosk renders, taken from consistent snapshots.
pub async fn snapshot(state: &SharedState) -> DashboardResponse {
    let (dashboard, view) = state.published().await;
    let refresh = state.refresh_countdown().await;
    DashboardResponse::build(&dashboard, &view, refresh)
}

/// Table currently on screen.
pub async fn current_table(state: &SharedState) -> Result<CurrentTableResponse, ServiceError> {
    let view = state.view().await;
    let table = view
        .current_table()
        .ok_or_else(|| ServiceError::NotFound("no standings table to show".into()))?;

    Ok(CurrentTableResponse {
        rotation: view.rotation().into(),
        table: StandingsTableDto::from(table),
    })
}

/// Filter the tables by heading. A non-empty query pauses the carousel, a blank one resumes it.
pub async fn apply_search(state: &SharedState, query: &str) -> ViewResponse {
    let view = state.transition_view(|view| view.with_query(query)).await;
    info!(
        query = view.query(),
        visible = view.visible_count(),
        paused = view.rotation().is_paused(),
        "search applied"
    );
    sse_events::broadcast_rotation_changed(state, &view);
    ViewResponse::from(&view)
}

/// Step the carousel by hand; ignored while paused or when nothing is visible.
pub async fn navigate(state: &SharedState, direction: Direction) -> ViewResponse {
    let view = state
        .transition_view(|view| view.with_rotation(direction.into()))
        .await;
    sse_events::broadcast_rotation_changed(state, &view);
    ViewResponse::from(&view)
}
