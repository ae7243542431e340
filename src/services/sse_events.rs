use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{
        dashboard::{RefreshDto, RotationDto},
        sse::{
            RefreshProgressEvent, RotationChangedEvent, ScoresUpdatedEvent, ServerEvent,
            StandingsUpdatedEvent,
        },
        suggestion::SuggestionResponse,
    },
    state::{
        SharedState, dashboard::Dashboard, refresh::RefreshCountdown, report::CycleReport,
        view::ViewState,
    },
};

const EVENT_STANDINGS_UPDATED: &str = "standings.updated";
const EVENT_ROTATION_CHANGED: &str = "rotation.changed";
const EVENT_REFRESH_PROGRESS: &str = "refresh.progress";
const EVENT_SCORES_UPDATED: &str = "scores.updated";
const EVENT_SUGGESTION_UPDATED: &str = "suggestion.updated";

/// Broadcast that a refresh cycle published a new standings set.
pub fn broadcast_standings_updated(state: &SharedState, report: &CycleReport, view: &ViewState) {
    let payload = StandingsUpdatedEvent {
        cycle_id: report.id,
        tables: view.standings().len(),
        visible: view.visible_count(),
        rotation: view.rotation().into(),
    };
    send_public_event(state, EVENT_STANDINGS_UPDATED, &payload);
}

/// Broadcast the carousel position and the table now on screen.
pub fn broadcast_rotation_changed(state: &SharedState, view: &ViewState) {
    let payload = RotationChangedEvent {
        rotation: RotationDto::from(view.rotation()),
        current: view.current_table().map(|table| table.heading.clone()),
    };
    send_public_event(state, EVENT_ROTATION_CHANGED, &payload);
}

/// Broadcast the refresh countdown after a tick.
pub fn broadcast_refresh_progress(state: &SharedState, countdown: RefreshCountdown) {
    let payload = RefreshProgressEvent(RefreshDto::from(countdown));
    send_public_event(state, EVENT_REFRESH_PROGRESS, &payload);
}

/// Broadcast the size of every score feed once a cycle settled.
pub fn broadcast_scores_updated(state: &SharedState, report: &CycleReport, dashboard: &Dashboard) {
    let payload = ScoresUpdatedEvent {
        cycle_id: report.id,
        latest_scores: dashboard.latest_scores.len(),
        high_scores: dashboard.high_scores.len(),
        free_machines: dashboard.free_machines.len(),
        failures: report.failures.len(),
    };
    send_public_event(state, EVENT_SCORES_UPDATED, &payload);
}

/// Broadcast a new or cleared match suggestion.
pub fn broadcast_suggestion_updated(state: &SharedState, suggestion: &SuggestionResponse) {
    send_public_event(state, EVENT_SUGGESTION_UPDATED, suggestion);
}

fn send_public_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.public_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize public SSE payload"),
    }
}
