//! Wire records returned by the tournament scoring service.

use serde::Deserialize;
use serde_json::Value;

/// Registered player as listed by `/players`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerRecord {
    /// Short key used by every other endpoint to reference the player.
    pub abbreviation: String,
    /// Full display name.
    pub name: String,
}

/// Pinball machine as listed by `/pinball`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MachineRecord {
    /// Short key used by every other endpoint to reference the machine.
    pub abbreviation: String,
    /// Human readable machine title.
    pub long_name: String,
    /// Room the machine stands in, when the venue reports one.
    #[serde(default)]
    pub room: Option<String>,
}

/// One ranking entry of `/highscore/<machine>`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HighscoreRecord {
    /// Player abbreviation.
    pub player: String,
    /// Raw machine score.
    pub score: i64,
    /// Explicit rank; the list position is used when absent.
    #[serde(default)]
    pub rank: Option<u32>,
    /// Tournament points awarded for the score.
    #[serde(default)]
    pub points: Option<f64>,
    /// Marks scores entered by non-registered players.
    #[serde(default)]
    pub guest: Option<bool>,
}

/// One entry of `/latestscores`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LatestScoreRecord {
    /// Timestamp as formatted by the upstream service.
    pub date: String,
    /// Machine abbreviation.
    pub pinball: String,
    /// Player abbreviation.
    pub player: String,
    /// Tournament points awarded.
    pub points: f64,
    #[serde(default)]
    pub rank: Option<u32>,
}

/// One entry of `/total_highscore`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TotalHighscoreRecord {
    /// Player abbreviation.
    pub player: String,
    /// Overall tournament rank.
    pub rank: u32,
    /// Sum of tournament points over every machine.
    pub total_points: f64,
}

/// Payload of `/get_player/<player>`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerProgressRecord {
    /// Progress through the tournament; the upstream sends either a string or a number.
    pub tournament_progress: Value,
}

impl PlayerProgressRecord {
    /// Render the progress value as a label suitable for display.
    pub fn label(&self) -> String {
        match &self.tournament_progress {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

/// Payload of `/matchsuggestion/<p1>/<p2>`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MatchSuggestionRecord {
    /// Machines neither player has a score on yet.
    #[serde(default)]
    pub common_unplayed_machines: Vec<String>,
}
