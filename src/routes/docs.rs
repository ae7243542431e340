use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    services::documentation::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH},
    state::SharedState,
};

/// Swagger UI for the kiosk API, next to the OpenAPI document it renders.
pub fn router(state: SharedState) -> Router<SharedState> {
    let swagger = SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi());
    Router::<SharedState>::from(swagger).with_state(state)
}
