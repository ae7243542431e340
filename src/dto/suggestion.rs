use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{dto::validation::validate_abbreviation, state::MatchSuggestion};

/// Two players to find an unplayed machine for.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SuggestionRequest {
    #[validate(custom(function = "validate_abbreviation"))]
    pub player1: String,
    #[validate(custom(function = "validate_abbreviation"))]
    pub player2: String,
}

/// Current match suggestion; both players are absent once the selection is cleared.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SuggestionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player2: Option<String>,
    /// Display names of the machines neither player has a score on.
    pub machines: Vec<String>,
}

impl From<MatchSuggestion> for SuggestionResponse {
    fn from(suggestion: MatchSuggestion) -> Self {
        let (player1, player2) = suggestion.players.unzip();
        Self {
            player1,
            player2,
            machines: suggestion.machines,
        }
    }
}
