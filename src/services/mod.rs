/// Rendered snapshot, search and manual carousel navigation.
pub mod dashboard_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Full refresh cycle across every fetch stage.
pub mod pipeline;
/// Player and machine name resolution.
pub mod resolver;
/// Refresh countdown and rotation drivers.
pub mod scheduler;
/// Latest scores, overall ranking and free machine feeds.
pub mod score_feeds;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Per-machine standings aggregation.
pub mod standings;
/// On-demand match suggestions.
pub mod suggestion;
