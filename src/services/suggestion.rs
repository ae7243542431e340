//! On-demand match suggestions: machines two players have both never played.

use tracing::{info, warn};

use crate::{
    dto::suggestion::SuggestionResponse,
    error::ServiceError,
    services::sse_events,
    state::{MatchSuggestion, SharedState},
};

/// Fetch the machines neither player has a score on and make them the current suggestion.
///
/// The previous suggestion stays in place when the request fails.
pub async fn suggest(
    state: &SharedState,
    player1: &str,
    player2: &str,
) -> Result<SuggestionResponse, ServiceError> {
    let (player1, player2) = (player1.trim(), player2.trim());
    if player1.is_empty() || player2.is_empty() {
        return Err(ServiceError::InvalidInput("two players must be selected".into()));
    }
    if player1 == player2 {
        return Err(ServiceError::InvalidInput(
            "the same player cannot be selected twice".into(),
        ));
    }

    let record = state
        .api()
        .match_suggestion(player1, player2)
        .await
        .inspect_err(|err| warn!(player1, player2, error = %err, "match suggestion failed"))?;

    let dashboard = state.dashboard().await;
    let suggestion = MatchSuggestion {
        players: Some((player1.to_string(), player2.to_string())),
        machines: record
            .common_unplayed_machines
            .iter()
            .map(|machine| dashboard.machine_name(machine))
            .collect(),
    };
    info!(
        player1,
        player2,
        machines = suggestion.machines.len(),
        "match suggestion updated"
    );

    Ok(publish(state, suggestion).await)
}

/// Drop the current selection and its result.
pub async fn clear(state: &SharedState) -> SuggestionResponse {
    publish(state, MatchSuggestion::default()).await
}

/// Current suggestion, empty when nothing is selected.
pub async fn current(state: &SharedState) -> SuggestionResponse {
    state.suggestion().read().await.clone().into()
}

async fn publish(state: &SharedState, suggestion: MatchSuggestion) -> SuggestionResponse {
    {
        let mut guard = state.suggestion().write().await;
        *guard = suggestion.clone();
    }

    let response = SuggestionResponse::from(suggestion);
    sse_events::broadcast_suggestion_updated(state, &response);
    response
}
