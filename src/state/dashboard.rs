//! Tournament data as published to the kiosk, rebuilt wholesale on every refresh cycle.

use std::sync::Arc;

use indexmap::IndexMap;

/// Player abbreviation to full name, in the order the service lists players.
pub type PlayerMap = IndexMap<String, String>;
/// Machine abbreviation to machine details, in the order the service lists machines.
pub type MachineMap = IndexMap<String, Machine>;
/// Player abbreviation to tournament progress label, in ranking order.
pub type ProgressMap = IndexMap<String, String>;

/// Static description of a pinball machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub long_name: String,
    pub room: Option<String>,
}

/// A single line of a machine's ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub rank: u32,
    /// Formatted display name, or the raw abbreviation when the player is unknown.
    pub player: String,
    pub score: i64,
    pub points: Option<f64>,
    pub guest: bool,
}

/// Ranking of one machine; only built for machines with at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsTable {
    /// Machine long name shown above the table.
    pub heading: String,
    /// Machine abbreviation the table was fetched for.
    pub machine: String,
    pub room: Option<String>,
    pub rows: Vec<RankingRow>,
}

/// Ordered set of standings tables, never mutated after assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandingsSet {
    tables: Vec<StandingsTable>,
}

impl StandingsSet {
    /// Wrap fully assembled tables.
    pub fn new(tables: Vec<StandingsTable>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[StandingsTable] {
        &self.tables
    }

    pub fn get(&self, index: usize) -> Option<&StandingsTable> {
        self.tables.get(index)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table headings in set order.
    pub fn headings(&self) -> Vec<&str> {
        self.tables
            .iter()
            .map(|table| table.heading.as_str())
            .collect()
    }
}

/// Entry of the latest scores feed.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestScoreEntry {
    pub date: String,
    pub machine: String,
    pub player: String,
    pub points: f64,
    pub rank: Option<u32>,
}

/// Entry of the overall tournament ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct HighScoreEntry {
    pub player: String,
    pub rank: u32,
    pub total_points: f64,
}

/// Everything fetched by the last refresh cycles except the standings tables, which live with
/// the view so the rotation index always refers to the set it was computed for.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub players: Arc<PlayerMap>,
    pub machines: Arc<MachineMap>,
    pub latest_scores: Arc<Vec<LatestScoreEntry>>,
    pub high_scores: Arc<Vec<HighScoreEntry>>,
    /// Machines that have no recorded score yet.
    pub free_machines: Arc<Vec<String>>,
    /// Progress labels of the players in `high_scores`.
    pub progress: Arc<ProgressMap>,
    /// True until the first refresh cycle has settled.
    pub loading: bool,
}

/// Results of one refresh cycle; `None` marks a branch that failed and must keep its previous value.
#[derive(Debug, Clone, Default)]
pub struct CycleData {
    pub players: Option<Arc<PlayerMap>>,
    pub machines: Option<Arc<MachineMap>>,
    pub latest_scores: Option<Vec<LatestScoreEntry>>,
    pub high_scores: Option<Vec<HighScoreEntry>>,
    pub free_machines: Option<Vec<String>>,
    pub progress: Option<ProgressMap>,
}

impl Dashboard {
    /// Initial state shown before any data has been fetched.
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Produce the dashboard that follows a settled cycle. Failed branches keep the stale value.
    pub fn apply_cycle(&self, data: CycleData) -> Self {
        Self {
            players: data.players.unwrap_or_else(|| self.players.clone()),
            machines: data.machines.unwrap_or_else(|| self.machines.clone()),
            latest_scores: data
                .latest_scores
                .map(Arc::new)
                .unwrap_or_else(|| self.latest_scores.clone()),
            high_scores: data
                .high_scores
                .map(Arc::new)
                .unwrap_or_else(|| self.high_scores.clone()),
            free_machines: data
                .free_machines
                .map(Arc::new)
                .unwrap_or_else(|| self.free_machines.clone()),
            progress: data
                .progress
                .map(Arc::new)
                .unwrap_or_else(|| self.progress.clone()),
            loading: false,
        }
    }

    /// Display name for a player abbreviation, falling back to the abbreviation itself.
    pub fn player_name(&self, abbreviation: &str) -> String {
        resolve_player(&self.players, abbreviation)
    }

    /// Long name for a machine abbreviation, falling back to the abbreviation itself.
    pub fn machine_name(&self, abbreviation: &str) -> String {
        resolve_machine(&self.machines, abbreviation)
    }

    pub fn progress_label(&self, player: &str) -> Option<&str> {
        self.progress.get(player).map(String::as_str)
    }
}

/// Render a full name as `"J. Smith"`; single-token names pass through untouched.
pub fn format_player_name(name: &str) -> String {
    let mut parts = name.split_whitespace();
    let Some(first) = parts.next() else {
        return String::new();
    };
    let rest = parts.collect::<Vec<_>>();
    if rest.is_empty() {
        return first.to_string();
    }

    let initial = first.chars().next().map(String::from).unwrap_or_default();
    format!("{initial}. {}", rest.join(" "))
}

/// Formatted display name for `abbreviation`, or the raw abbreviation when it is not in the map.
pub fn resolve_player(players: &PlayerMap, abbreviation: &str) -> String {
    players
        .get(abbreviation)
        .map(|name| format_player_name(name))
        .unwrap_or_else(|| abbreviation.to_string())
}

/// Machine long name for `abbreviation`, or the raw abbreviation when it is not in the map.
pub fn resolve_machine(machines: &MachineMap, abbreviation: &str) -> String {
    machines
        .get(abbreviation)
        .map(|machine| machine.long_name.clone())
        .unwrap_or_else(|| abbreviation.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_part_name_is_abbreviated() {
        assert_eq!(format_player_name("John Smith"), "J. Smith");
    }

    #[test]
    fn single_token_name_passes_through() {
        assert_eq!(format_player_name("Prince"), "Prince");
    }

    #[test]
    fn only_first_part_is_reduced() {
        assert_eq!(format_player_name("John Paul Smith"), "J. Paul Smith");
        assert_eq!(format_player_name("  Anna   van Dijk "), "A. van Dijk");
    }

    #[test]
    fn empty_name_stays_empty() {
        assert_eq!(format_player_name("   "), "");
    }

    #[test]
    fn unknown_abbreviations_fall_back_to_raw_key() {
        let mut players = PlayerMap::new();
        players.insert("JSM".into(), "John Smith".into());

        assert_eq!(resolve_player(&players, "JSM"), "J. Smith");
        assert_eq!(resolve_player(&players, "XYZ"), "XYZ");
        assert_eq!(resolve_machine(&MachineMap::new(), "AFM"), "AFM");
    }

    #[test]
    fn failed_branches_keep_previous_values() {
        let mut players = PlayerMap::new();
        players.insert("JSM".into(), "John Smith".into());
        let first = Dashboard::loading().apply_cycle(CycleData {
            players: Some(Arc::new(players)),
            latest_scores: Some(vec![LatestScoreEntry {
                date: "2024-05-01".into(),
                machine: "AFM".into(),
                player: "JSM".into(),
                points: 12.0,
                rank: None,
            }]),
            ..CycleData::default()
        });
        assert!(!first.loading);

        let mut progress = ProgressMap::new();
        progress.insert("JSM".into(), "4/12".into());
        let second = first.apply_cycle(CycleData {
            latest_scores: Some(Vec::new()),
            progress: Some(progress),
            ..CycleData::default()
        });

        assert_eq!(second.players.len(), 1);
        assert!(second.latest_scores.is_empty());
        assert!(second.machines.is_empty());
        assert_eq!(second.progress_label("JSM"), Some("4/12"));

        let third = second.apply_cycle(CycleData::default());
        assert_eq!(third.progress_label("JSM"), Some("4/12"));
    }
}
