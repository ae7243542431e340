use tokio::sync::broadcast;

use crate::dto::sse::ServerEvent;

/// Fan-out of public kiosk events; every open `/sse/public` connection holds one receiver.
pub struct SseHub {
    sender: broadcast::Sender<ServerEvent>,
}

impl SseHub {
    /// Hub whose slowest screen may fall `capacity` events behind before it starts lagging.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    /// Screens currently listening.
    pub fn connected_screens(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Send an event to every connected screen. Nobody listening is not an error.
    pub fn broadcast(&self, event: ServerEvent) {
        let _ = self.sender.send(event);
    }
}
