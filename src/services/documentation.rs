use utoipa::OpenApi;

/// Where the Swagger UI is mounted.
pub const SWAGGER_UI_PATH: &str = "/docs";
/// Where the raw OpenAPI document is served.
pub const OPENAPI_JSON_PATH: &str = "/api-doc/openapi.json";

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the pinball kiosk backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::public_stream,
        crate::routes::dashboard::get_dashboard,
        crate::routes::dashboard::get_current_table,
        crate::routes::dashboard::put_search,
        crate::routes::dashboard::post_rotation_next,
        crate::routes::dashboard::post_rotation_previous,
        crate::routes::suggestions::get_suggestion,
        crate::routes::suggestions::post_suggestion,
        crate::routes::suggestions::delete_suggestion,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::sse::Handshake,
            crate::dto::sse::StandingsUpdatedEvent,
            crate::dto::sse::RotationChangedEvent,
            crate::dto::sse::RefreshProgressEvent,
            crate::dto::sse::ScoresUpdatedEvent,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "kiosk", description = "Standings carousel, search and score feeds"),
        (name = "suggestions", description = "Match suggestions for two players"),
    )
)]
pub struct ApiDoc;
