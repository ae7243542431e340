//! What the kiosk currently shows: the standings set, the search filter over it, and the
//! rotation position inside the filtered subset.

use std::sync::Arc;

use super::{
    dashboard::{StandingsSet, StandingsTable},
    rotation::{RotationEvent, RotationState},
};

/// Indices of the tables whose heading contains `query`, case-insensitively.
///
/// An empty or whitespace-only query selects every table.
pub fn filter_headings(set: &StandingsSet, query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    set.tables()
        .iter()
        .enumerate()
        .filter(|(_, table)| needle.is_empty() || table.heading.to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect()
}

/// Snapshot of the visible view. Every transition returns a new value.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    standings: Arc<StandingsSet>,
    query: String,
    visible: Vec<usize>,
    rotation: RotationState,
}

impl ViewState {
    /// Unfiltered, rotating view over `standings`.
    pub fn new(standings: Arc<StandingsSet>) -> Self {
        let visible = filter_headings(&standings, "");
        let rotation = RotationState::new(visible.len());
        Self {
            standings,
            query: String::new(),
            visible,
            rotation,
        }
    }

    /// Swap in a freshly assembled standings set; the active query is re-applied and the
    /// rotation re-anchored at index 0.
    pub fn with_standings(&self, standings: Arc<StandingsSet>) -> Self {
        let visible = filter_headings(&standings, &self.query);
        let rotation = self.rotation.apply(RotationEvent::Reset(visible.len()));
        Self {
            standings,
            query: self.query.clone(),
            visible,
            rotation,
        }
    }

    /// Apply a search query. A non-empty query pauses the rotation, an empty one resumes it.
    /// The index only resets when the normalized query actually changes.
    pub fn with_query(&self, query: &str) -> Self {
        let query = query.trim().to_string();
        if query == self.query {
            return self.clone();
        }

        let visible = filter_headings(&self.standings, &query);
        let gate = if query.is_empty() {
            RotationEvent::Resume
        } else {
            RotationEvent::Pause
        };
        let rotation = self
            .rotation
            .apply(gate)
            .apply(RotationEvent::Reset(visible.len()));

        Self {
            standings: self.standings.clone(),
            query,
            visible,
            rotation,
        }
    }

    /// Apply a rotation event (tick or manual navigation) to the current view.
    pub fn with_rotation(&self, event: RotationEvent) -> Self {
        Self {
            rotation: self.rotation.apply(event),
            ..self.clone()
        }
    }

    pub fn standings(&self) -> &Arc<StandingsSet> {
        &self.standings
    }

    /// Normalized active query; empty when no search is active.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// Tables matching the active query, in standings order.
    pub fn visible_tables(&self) -> impl Iterator<Item = &StandingsTable> {
        self.visible
            .iter()
            .filter_map(|&index| self.standings.get(index))
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Table at the rotation index, if the view is not empty.
    pub fn current_table(&self) -> Option<&StandingsTable> {
        self.visible
            .get(self.rotation.index())
            .and_then(|&index| self.standings.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(heading: &str) -> StandingsTable {
        StandingsTable {
            heading: heading.into(),
            machine: heading.to_uppercase(),
            room: None,
            rows: Vec::new(),
        }
    }

    fn set(headings: &[&str]) -> Arc<StandingsSet> {
        Arc::new(StandingsSet::new(headings.iter().map(|h| table(h)).collect()))
    }

    fn headings(view: &ViewState) -> Vec<String> {
        view.visible_tables().map(|t| t.heading.clone()).collect()
    }

    #[test]
    fn query_matches_headings_case_insensitively() {
        let view = ViewState::new(set(&["Mario", "Addams Family"]))
            .with_rotation(RotationEvent::Tick)
            .with_query("add");

        assert_eq!(headings(&view), vec!["Addams Family"]);
        assert_eq!(view.rotation().index(), 0);
        assert!(view.rotation().is_paused());

        let upper = ViewState::new(set(&["Mario", "Addams Family"])).with_query("ADD");
        assert_eq!(headings(&upper), vec!["Addams Family"]);
    }

    #[test]
    fn blank_query_shows_everything_and_resumes() {
        let view = ViewState::new(set(&["Mario", "Addams Family"]))
            .with_query("foo")
            .with_query("   ");

        assert_eq!(headings(&view), vec!["Mario", "Addams Family"]);
        assert!(!view.rotation().is_paused());
        assert_eq!(view.query(), "");
    }

    #[test]
    fn unmatched_query_yields_empty_view() {
        let view = ViewState::new(set(&["Mario"])).with_query("foo");
        assert_eq!(view.visible_count(), 0);
        assert!(view.current_table().is_none());
        assert_eq!(view.with_rotation(RotationEvent::Tick).rotation().index(), 0);
    }

    #[test]
    fn paused_view_ignores_ticks() {
        let view = ViewState::new(set(&["Mario", "Medieval Madness", "Monster Bash"]))
            .with_query("m");
        let ticked = view
            .with_rotation(RotationEvent::Tick)
            .with_rotation(RotationEvent::Next);
        assert_eq!(ticked.rotation().index(), 0);
    }

    #[test]
    fn new_standings_reset_index_and_keep_query() {
        let view = ViewState::new(set(&["Mario", "Medieval Madness", "Twilight Zone"]))
            .with_rotation(RotationEvent::Tick)
            .with_rotation(RotationEvent::Tick);
        assert_eq!(view.rotation().index(), 2);

        let refreshed = view.with_standings(set(&["Mario", "Twilight Zone"]));
        assert_eq!(refreshed.rotation().index(), 0);
        assert_eq!(refreshed.rotation().count(), 2);

        let searching = refreshed.with_query("zone");
        let refreshed = searching.with_standings(set(&["Twilight Zone", "Mario", "Zone 51"]));
        assert_eq!(headings(&refreshed), vec!["Twilight Zone", "Zone 51"]);
        assert!(refreshed.rotation().is_paused());
    }

    #[test]
    fn repeating_the_same_query_keeps_position() {
        let view = ViewState::new(set(&["Mario", "Medieval Madness"]))
            .with_query("ma")
            .with_query("ma");
        assert_eq!(view.visible_count(), 2);
        assert_eq!(view.query(), "ma");
    }

    #[test]
    fn current_table_follows_rotation() {
        let view = ViewState::new(set(&["Mario", "Addams Family"]));
        assert_eq!(view.current_table().unwrap().heading, "Mario");
        let view = view.with_rotation(RotationEvent::Tick);
        assert_eq!(view.current_table().unwrap().heading, "Addams Family");
    }
}
