//! Entity resolution: abbreviation to display-name maps for players and machines.

use std::{fmt, sync::Arc};

use futures::future::join;
use thiserror::Error;
use tracing::warn;

use crate::{
    dao::{scoreboard::ScoreboardApi, transport::TransportError},
    state::{
        dashboard::{Dashboard, Machine, MachineMap, PlayerMap},
        report::{CycleReport, FetchTarget},
    },
};

/// Kind of entity a resolution request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Players,
    Machines,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Players => f.write_str("players"),
            Entity::Machines => f.write_str("machines"),
        }
    }
}

/// A resolution request failed; the previous map stays in use.
#[derive(Debug, Error)]
#[error("failed to resolve {entity}")]
pub struct ResolutionError {
    pub entity: Entity,
    #[source]
    pub source: TransportError,
}

/// A map available to the rest of the cycle, flagged with whether it was fetched by this cycle.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub map: Arc<T>,
    pub fresh: bool,
}

impl<T> Resolved<T> {
    fn settle(result: Result<T, ResolutionError>, previous: &Arc<T>) -> Self {
        match result {
            Ok(map) => Self {
                map: Arc::new(map),
                fresh: true,
            },
            Err(err) => {
                warn!(
                    entity = %err.entity,
                    error = %err.source,
                    "entity resolution failed; keeping previous map"
                );
                Self {
                    map: previous.clone(),
                    fresh: false,
                }
            }
        }
    }

    /// The map to publish, or `None` when the previous one must be kept.
    pub fn published(&self) -> Option<Arc<T>> {
        self.fresh.then(|| self.map.clone())
    }
}

/// Both maps once resolution has settled.
#[derive(Debug, Clone)]
pub struct ResolvedEntities {
    pub players: Resolved<PlayerMap>,
    pub machines: Resolved<MachineMap>,
}

/// Fetch the player map, keyed by abbreviation in response order.
pub async fn resolve_players(api: &dyn ScoreboardApi) -> Result<PlayerMap, ResolutionError> {
    let records = api.players().await.map_err(|source| ResolutionError {
        entity: Entity::Players,
        source,
    })?;

    Ok(records
        .into_iter()
        .map(|record| (record.abbreviation, record.name))
        .collect())
}

/// Fetch the machine map, keyed by abbreviation in response order.
pub async fn resolve_machines(api: &dyn ScoreboardApi) -> Result<MachineMap, ResolutionError> {
    let records = api.machines().await.map_err(|source| ResolutionError {
        entity: Entity::Machines,
        source,
    })?;

    Ok(records
        .into_iter()
        .map(|record| {
            (
                record.abbreviation,
                Machine {
                    long_name: record.long_name,
                    room: record.room,
                },
            )
        })
        .collect())
}

/// Resolve both maps concurrently. Each failure is isolated: the affected map falls back to
/// the one held by `previous` while the other is still replaced.
pub async fn resolve_entities(
    api: &dyn ScoreboardApi,
    previous: &Dashboard,
    report: &mut CycleReport,
) -> ResolvedEntities {
    let (players, machines) = join(resolve_players(api), resolve_machines(api)).await;
    report.record(FetchTarget::Players, &players);
    report.record(FetchTarget::Machines, &machines);

    ResolvedEntities {
        players: Resolved::settle(players, &previous.players),
        machines: Resolved::settle(machines, &previous.machines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::fake::FakeScoreboardApi;

    fn api() -> FakeScoreboardApi {
        FakeScoreboardApi::new()
            .with_players(&[("JSM", "John Smith"), ("PRN", "Prince")])
            .with_machines(&[("TZ", "Twilight Zone"), ("AFM", "Attack from Mars")])
    }

    #[tokio::test]
    async fn maps_keep_response_order() {
        let machines = resolve_machines(&api()).await.unwrap();
        assert_eq!(
            machines.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["TZ", "AFM"]
        );
        assert_eq!(machines["AFM"].long_name, "Attack from Mars");

        let players = resolve_players(&api()).await.unwrap();
        assert_eq!(players["PRN"], "Prince");
    }

    #[tokio::test]
    async fn failure_keeps_previous_map_and_does_not_block_sibling() {
        let mut previous_players = PlayerMap::new();
        previous_players.insert("OLD".into(), "Old Timer".into());
        let previous = Dashboard {
            players: Arc::new(previous_players),
            ..Dashboard::default()
        };

        let mut report = CycleReport::start();
        let resolved =
            resolve_entities(&api().failing("players"), &previous, &mut report).await;

        assert!(!resolved.players.fresh);
        assert!(resolved.players.map.contains_key("OLD"));
        assert!(resolved.players.published().is_none());

        assert!(resolved.machines.fresh);
        assert_eq!(resolved.machines.map.len(), 2);

        assert!(report.failed(&FetchTarget::Players));
        assert!(!report.failed(&FetchTarget::Machines));
    }

    #[tokio::test]
    async fn first_run_failure_leaves_maps_empty() {
        let api = FakeScoreboardApi::new().failing("players").failing("pinball");
        let mut report = CycleReport::start();
        let resolved = resolve_entities(&api, &Dashboard::loading(), &mut report).await;

        assert!(resolved.players.map.is_empty());
        assert!(resolved.machines.map.is_empty());
        assert_eq!(report.failures.len(), 2);
    }
}
