//! Periodic drivers: the refresh countdown that launches refresh cycles and the rotation
//! ticker that advances the carousel.

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, info, warn};

use crate::{
    config::OverlapPolicy,
    services::{pipeline, sse_events},
    state::{
        SharedState, refresh::TickOutcome, report::CycleReport, rotation::RotationEvent,
        view::ViewState,
    },
};

/// Start a refresh cycle in the background unless the overlap policy forbids it.
///
/// The cycle is accounted as in flight before this returns.
pub fn launch_cycle(state: &SharedState) -> Option<JoinHandle<CycleReport>> {
    let in_flight = state.cycles_in_flight();
    if in_flight > 0 {
        match state.config().overlap_policy {
            OverlapPolicy::Skip => {
                warn!(in_flight, "previous refresh cycle still running; skipping this one");
                return None;
            }
            OverlapPolicy::Overlap => {
                info!(in_flight, "starting refresh cycle while another is still running");
            }
        }
    }

    let guard = state.begin_cycle();
    let state = state.clone();
    Some(tokio::spawn(async move {
        let _guard = guard;
        pipeline::run_cycle(state).await
    }))
}

/// Advance the refresh countdown by one tick and launch a cycle when it elapses.
pub async fn refresh_tick(state: &SharedState) -> Option<JoinHandle<CycleReport>> {
    let (countdown, outcome) = state.tick_refresh().await;
    sse_events::broadcast_refresh_progress(state, countdown);

    match outcome {
        TickOutcome::Counting => None,
        TickOutcome::Fire => {
            debug!(period = countdown.period(), "refresh countdown elapsed");
            launch_cycle(state)
        }
    }
}

/// Advance the carousel by one step and announce the table now on screen.
pub async fn rotation_tick(state: &SharedState) -> ViewState {
    let view = state
        .transition_view(|view| view.with_rotation(RotationEvent::Tick))
        .await;
    sse_events::broadcast_rotation_changed(state, &view);
    view
}

/// Tick the refresh countdown for the lifetime of the process.
pub async fn run_refresh_driver(state: SharedState) {
    let period = state.config().refresh_tick;
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        // fire-and-forget: the cycle publishes its own result
        let _ = refresh_tick(&state).await;
    }
}

/// Tick the carousel while it is not paused. A pause stops the ticker entirely; resuming
/// starts a fresh full interval from the current index.
pub async fn run_rotation_driver(state: SharedState) {
    let period = state.config().rotation_interval;
    let mut paused = state.rotation_paused_watcher();

    loop {
        if *paused.borrow_and_update() {
            debug!("rotation paused");
            if paused.changed().await.is_err() {
                break;
            }
            continue;
        }

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    rotation_tick(&state).await;
                }
                changed = paused.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}
