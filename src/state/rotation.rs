/// Carousel position over the visible standings tables.
///
/// `index` is always `0` when `count == 0`, and within `[0, count)` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState {
    /// Advancing on every rotation tick.
    Rotating { index: usize, count: usize },
    /// Frozen while a viewer searches; ticks and manual navigation are ignored.
    Paused { index: usize, count: usize },
}

/// Events that can be applied to the rotation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationEvent {
    /// Periodic advance from the rotation driver.
    Tick,
    /// Manual step forward.
    Next,
    /// Manual step backward.
    Previous,
    /// A search became active.
    Pause,
    /// The search was cleared.
    Resume,
    /// The visible view changed and now holds `count` tables; re-anchor at index 0.
    Reset(usize),
}

impl Default for RotationState {
    fn default() -> Self {
        Self::Rotating { index: 0, count: 0 }
    }
}

impl RotationState {
    /// Rotating state anchored at the first of `count` tables.
    pub fn new(count: usize) -> Self {
        Self::Rotating { index: 0, count }
    }

    pub fn index(&self) -> usize {
        match *self {
            Self::Rotating { index, .. } | Self::Paused { index, .. } => index,
        }
    }

    pub fn count(&self) -> usize {
        match *self {
            Self::Rotating { count, .. } | Self::Paused { count, .. } => count,
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused { .. })
    }

    /// Apply an event and return the resulting state.
    pub fn apply(self, event: RotationEvent) -> Self {
        match (self, event) {
            (Self::Rotating { index, count }, RotationEvent::Tick | RotationEvent::Next) => {
                Self::Rotating {
                    index: step_forward(index, count),
                    count,
                }
            }
            (Self::Rotating { index, count }, RotationEvent::Previous) => Self::Rotating {
                index: step_backward(index, count),
                count,
            },
            (Self::Rotating { index, count }, RotationEvent::Pause) => {
                Self::Paused { index, count }
            }
            (Self::Paused { index, count }, RotationEvent::Resume) => {
                Self::Rotating { index, count }
            }
            (Self::Rotating { .. }, RotationEvent::Reset(count)) => {
                Self::Rotating { index: 0, count }
            }
            (Self::Paused { .. }, RotationEvent::Reset(count)) => Self::Paused { index: 0, count },
            (state, _) => state,
        }
    }
}

fn step_forward(index: usize, count: usize) -> usize {
    if count == 0 { 0 } else { (index + 1) % count }
}

fn step_backward(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (index + count - 1) % count
    }
}
