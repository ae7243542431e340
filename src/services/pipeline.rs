//! One refresh cycle: resolve entities, then aggregate standings alongside the score feeds,
//! then publish everything at once.

use futures::future::join;
use tracing::info;

use crate::{
    services::{
        resolver::resolve_entities, score_feeds::fetch_score_feeds, sse_events,
        standings::build_standings,
    },
    state::{SharedState, dashboard::CycleData, report::CycleReport},
};

/// Run a full refresh cycle against the scoring service and publish its result.
///
/// Stage two only starts once both entity maps have settled, so every table is built against
/// the maps available at that point. Failed fetches keep the previously published values.
pub async fn run_cycle(state: SharedState) -> CycleReport {
    let api = state.api();
    let previous = state.dashboard().await;
    let mut report = CycleReport::start();
    info!(cycle = %report.id, "refresh cycle started");

    let entities = resolve_entities(api.as_ref(), &previous, &mut report).await;

    let (standings, feeds) = join(
        build_standings(
            api.as_ref(),
            &entities.machines.map,
            &entities.players.map,
            &mut report,
        ),
        fetch_score_feeds(api.as_ref()),
    )
    .await;

    let feeds = feeds.settle(&previous.progress, &mut report);
    let data = CycleData {
        players: entities.players.published(),
        machines: entities.machines.published(),
        latest_scores: feeds.latest_scores,
        high_scores: feeds.high_scores,
        free_machines: feeds.free_machines,
        progress: feeds.progress,
    };

    let report = report.finish();
    let (dashboard, view) = state.publish_cycle(data, standings, report.clone()).await;

    info!(
        cycle = %report.id,
        tables = view.standings().len(),
        visible = view.visible_count(),
        succeeded = report.succeeded,
        failed = report.failures.len(),
        "refresh cycle published"
    );

    sse_events::broadcast_standings_updated(&state, &report, &view);
    sse_events::broadcast_scores_updated(&state, &report, &dashboard);
    sse_events::broadcast_rotation_changed(&state, &view);

    report
}
