//! Standings aggregation: one ranking table per machine that has recorded scores.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::{
    dao::{models::HighscoreRecord, scoreboard::ScoreboardApi},
    state::{
        dashboard::{
            Machine, MachineMap, PlayerMap, RankingRow, StandingsSet, StandingsTable,
            resolve_player,
        },
        report::{CycleReport, FetchTarget},
    },
};

/// Fetch every machine's ranking concurrently and assemble the standings set.
///
/// Tables follow the iteration order of `machines`. Machines whose ranking is empty or whose
/// request failed are left out; a failure never aborts the other fetches.
pub async fn build_standings(
    api: &dyn ScoreboardApi,
    machines: &MachineMap,
    players: &PlayerMap,
    report: &mut CycleReport,
) -> StandingsSet {
    let requests = machines
        .keys()
        .map(|abbreviation| api.machine_highscores(abbreviation));
    let responses = join_all(requests).await;

    let mut tables = Vec::with_capacity(machines.len());
    for ((abbreviation, machine), response) in machines.iter().zip(responses) {
        report.record(FetchTarget::MachineStandings(abbreviation.clone()), &response);
        match response {
            Ok(records) => match build_table(abbreviation, machine, records, players) {
                Some(table) => tables.push(table),
                None => debug!(machine = %abbreviation, "no scores recorded; table skipped"),
            },
            Err(err) => {
                warn!(machine = %abbreviation, error = %err, "machine standings unavailable");
            }
        }
    }

    StandingsSet::new(tables)
}

/// Assemble a single machine table, or `None` when the machine has no rows.
pub fn build_table(
    abbreviation: &str,
    machine: &Machine,
    records: Vec<HighscoreRecord>,
    players: &PlayerMap,
) -> Option<StandingsTable> {
    if records.is_empty() {
        return None;
    }

    let mut rows = records
        .into_iter()
        .enumerate()
        .map(|(position, record)| RankingRow {
            rank: record.rank.unwrap_or(position as u32 + 1),
            player: resolve_player(players, &record.player),
            score: record.score,
            points: record.points,
            guest: record.guest.unwrap_or(false),
        })
        .collect::<Vec<_>>();
    rows.sort_by_key(|row| row.rank);

    Some(StandingsTable {
        heading: machine.long_name.clone(),
        machine: abbreviation.to_string(),
        room: machine.room.clone(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dao::fake::FakeScoreboardApi, services::resolver::resolve_machines};

    fn players() -> PlayerMap {
        let mut players = PlayerMap::new();
        players.insert("JSM".into(), "John Smith".into());
        players.insert("PRN".into(), "Prince".into());
        players
    }

    fn machine(long_name: &str) -> Machine {
        Machine {
            long_name: long_name.into(),
            room: None,
        }
    }

    fn record(player: &str, score: i64, rank: Option<u32>) -> HighscoreRecord {
        HighscoreRecord {
            player: player.into(),
            score,
            rank,
            points: None,
            guest: None,
        }
    }

    #[tokio::test]
    async fn only_machines_with_scores_are_kept_in_map_order() {
        let api = FakeScoreboardApi::new()
            .with_machines(&[
                ("TZ", "Twilight Zone"),
                ("MM", "Medieval Madness"),
                ("AFM", "Attack from Mars"),
            ])
            .with_highscores("AFM", &[("JSM", 1_000)])
            .with_highscores("TZ", &[("PRN", 2_000), ("JSM", 1_500)]);
        let machines = resolve_machines(&api).await.unwrap();

        let mut report = CycleReport::start();
        let set = build_standings(&api, &machines, &players(), &mut report).await;

        assert_eq!(set.headings(), vec!["Twilight Zone", "Attack from Mars"]);
        assert_eq!(report.succeeded, 3);
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn failing_machine_does_not_block_siblings() {
        let api = FakeScoreboardApi::new()
            .with_machines(&[("TZ", "Twilight Zone"), ("AFM", "Attack from Mars")])
            .with_highscores("AFM", &[("JSM", 1_000)])
            .with_highscores("TZ", &[("PRN", 2_000)])
            .failing("highscore/TZ");
        let machines = resolve_machines(&api).await.unwrap();

        let mut report = CycleReport::start();
        let set = build_standings(&api, &machines, &players(), &mut report).await;

        assert_eq!(set.headings(), vec!["Attack from Mars"]);
        assert!(report.failed(&FetchTarget::MachineStandings("TZ".into())));
        assert_eq!(report.succeeded, 1);
    }

    #[tokio::test]
    async fn empty_machine_map_issues_no_requests() {
        let api = FakeScoreboardApi::new();
        let mut report = CycleReport::start();
        let set = build_standings(&api, &MachineMap::new(), &players(), &mut report).await;

        assert!(set.is_empty());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn rows_resolve_names_and_fall_back_to_position() {
        let table = build_table(
            "AFM",
            &machine("Attack from Mars"),
            vec![record("JSM", 3_000, None), record("GST", 2_000, None)],
            &players(),
        )
        .unwrap();

        assert_eq!(table.heading, "Attack from Mars");
        assert_eq!(table.machine, "AFM");
        assert_eq!(table.rows[0].player, "J. Smith");
        assert_eq!(table.rows[0].rank, 1);
        assert_eq!(table.rows[1].player, "GST");
        assert_eq!(table.rows[1].rank, 2);
        assert!(!table.rows[1].guest);
    }

    #[test]
    fn explicit_ranks_order_rows() {
        let mut guest = record("GST", 900, Some(1));
        guest.guest = Some(true);
        guest.points = Some(4.5);

        let table = build_table(
            "TZ",
            &machine("Twilight Zone"),
            vec![record("PRN", 800, Some(2)), guest],
            &players(),
        )
        .unwrap();

        assert_eq!(table.rows[0].player, "GST");
        assert!(table.rows[0].guest);
        assert_eq!(table.rows[0].points, Some(4.5));
        assert_eq!(table.rows[1].player, "Prince");
    }

    #[test]
    fn empty_ranking_yields_no_table() {
        assert!(build_table("TZ", &machine("Twilight Zone"), Vec::new(), &players()).is_none());
    }
}
