use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};
use axum_valid::Valid;

use crate::{
    dto::dashboard::{CurrentTableResponse, DashboardResponse, SearchRequest, ViewResponse},
    error::AppError,
    services::dashboard_service::{self, Direction},
    state::SharedState,
};

/// Kiosk endpoints: the rendered snapshot, search and manual carousel navigation.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/standings/current", get(get_current_table))
        .route("/search", put(put_search))
        .route("/rotation/next", post(post_rotation_next))
        .route("/rotation/previous", post(post_rotation_previous))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "kiosk",
    responses((status = 200, description = "Everything the kiosk renders", body = DashboardResponse))
)]
/// Return the visible tables, carousel position, refresh progress and score feeds.
pub async fn get_dashboard(State(state): State<SharedState>) -> Json<DashboardResponse> {
    Json(dashboard_service::snapshot(&state).await)
}

#[utoipa::path(
    get,
    path = "/standings/current",
    tag = "kiosk",
    responses(
        (status = 200, description = "Table currently on screen", body = CurrentTableResponse),
        (status = 404, description = "No table visible")
    )
)]
/// Return the standings table at the carousel position.
pub async fn get_current_table(
    State(state): State<SharedState>,
) -> Result<Json<CurrentTableResponse>, AppError> {
    let payload = dashboard_service::current_table(&state).await?;
    Ok(Json(payload))
}

#[utoipa::path(
    put,
    path = "/search",
    tag = "kiosk",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Filtered view", body = ViewResponse),
        (status = 400, description = "Query too long")
    )
)]
/// Filter the tables by heading; a non-empty query pauses the carousel.
pub async fn put_search(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<SearchRequest>>,
) -> Json<ViewResponse> {
    Json(dashboard_service::apply_search(&state, &payload.query).await)
}

#[utoipa::path(
    post,
    path = "/rotation/next",
    tag = "kiosk",
    responses((status = 200, description = "View after the step", body = ViewResponse))
)]
/// Show the next table; ignored while a search is active.
pub async fn post_rotation_next(State(state): State<SharedState>) -> Json<ViewResponse> {
    Json(dashboard_service::navigate(&state, Direction::Next).await)
}

#[utoipa::path(
    post,
    path = "/rotation/previous",
    tag = "kiosk",
    responses((status = 200, description = "View after the step", body = ViewResponse))
)]
/// Show the previous table; ignored while a search is active.
pub async fn post_rotation_previous(State(state): State<SharedState>) -> Json<ViewResponse> {
    Json(dashboard_service::navigate(&state, Direction::Previous).await)
}
