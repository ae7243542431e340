use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report the outcome of the last refresh cycle while logging upstream issues.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let loading = state.dashboard().await.loading;
    let report = state.last_report().await;

    if let Some(report) = report.as_ref().filter(|report| !report.failures.is_empty()) {
        warn!(
            cycle = %report.id,
            failures = report.failures.len(),
            "last refresh cycle had failing fetches"
        );
    }

    HealthResponse::from_report(
        report.as_ref(),
        loading,
        state.cycles_in_flight(),
        state.public_sse().connected_screens(),
    )
}
