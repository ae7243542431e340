use axum::{Json, Router, extract::State, routing::get};
use axum_valid::Valid;

use crate::{
    dto::suggestion::{SuggestionRequest, SuggestionResponse},
    error::AppError,
    services::suggestion,
    state::SharedState,
};

/// Match suggestion endpoints.
pub fn router() -> Router<SharedState> {
    Router::new().route(
        "/suggestions",
        get(get_suggestion)
            .post(post_suggestion)
            .delete(delete_suggestion),
    )
}

#[utoipa::path(
    get,
    path = "/suggestions",
    tag = "suggestions",
    responses((status = 200, description = "Current suggestion", body = SuggestionResponse))
)]
/// Return the current match suggestion.
pub async fn get_suggestion(State(state): State<SharedState>) -> Json<SuggestionResponse> {
    Json(suggestion::current(&state).await)
}

#[utoipa::path(
    post,
    path = "/suggestions",
    tag = "suggestions",
    request_body = SuggestionRequest,
    responses(
        (status = 200, description = "Machines neither player has played", body = SuggestionResponse),
        (status = 400, description = "Invalid or identical players"),
        (status = 503, description = "Scoring service unavailable")
    )
)]
/// Select two players and fetch the machines neither of them has played.
pub async fn post_suggestion(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SuggestionRequest>>,
) -> Result<Json<SuggestionResponse>, AppError> {
    let response = suggestion::suggest(&state, &payload.player1, &payload.player2).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/suggestions",
    tag = "suggestions",
    responses((status = 200, description = "Cleared suggestion", body = SuggestionResponse))
)]
/// Clear the player selection and its result.
pub async fn delete_suggestion(State(state): State<SharedState>) -> Json<SuggestionResponse> {
    Json(suggestion::clear(&state).await)
}
