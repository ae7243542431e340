use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::dashboard::{RefreshDto, RotationDto};

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: String,
}

impl ServerEvent {
    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Initial metadata sent to an SSE client when it connects.
pub struct Handshake {
    /// Identifier of the SSE stream.
    pub stream: String,
    /// Human-readable message confirming the subscription.
    pub message: String,
    /// Whether the first refresh cycle is still running.
    pub loading: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast once a refresh cycle published a new standings set.
pub struct StandingsUpdatedEvent {
    pub cycle_id: Uuid,
    /// Tables in the new set.
    pub tables: usize,
    /// Tables left visible by the active query.
    pub visible: usize,
    pub rotation: RotationDto,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast whenever the visible table changes (tick, navigation, search).
pub struct RotationChangedEvent {
    pub rotation: RotationDto,
    /// Heading of the table now on screen.
    pub current: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
/// Broadcast on every refresh countdown tick.
pub struct RefreshProgressEvent(pub RefreshDto);

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast once the score feeds of a refresh cycle settled.
pub struct ScoresUpdatedEvent {
    pub cycle_id: Uuid,
    pub latest_scores: usize,
    pub high_scores: usize,
    pub free_machines: usize,
    /// Fetches that failed during the cycle; their previous data is still shown.
    pub failures: usize,
}
