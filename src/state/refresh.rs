/// Result of a single countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still counting down.
    Counting,
    /// The countdown elapsed and has already been reset; a refresh cycle must start.
    Fire,
}

/// Countdown driving the full refresh cycle. Every tick consumes one unit; reaching zero
/// re-arms the countdown immediately so the cycle runs fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshCountdown {
    remaining: u32,
    period: u32,
}

impl RefreshCountdown {
    /// Start a countdown at `period` ticks. A zero period is treated as one tick.
    pub fn new(period: u32) -> Self {
        let period = period.max(1);
        Self {
            remaining: period,
            period,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Remaining time as a percentage of the period, within `[0, 100]`.
    pub fn progress(&self) -> f64 {
        (f64::from(self.remaining) / f64::from(self.period) * 100.0).clamp(0.0, 100.0)
    }

    /// Consume one tick and return the next state together with what the driver must do.
    pub fn tick(self) -> (Self, TickOutcome) {
        let remaining = self.remaining.saturating_sub(1);
        if remaining == 0 {
            (
                Self {
                    remaining: self.period,
                    ..self
                },
                TickOutcome::Fire,
            )
        } else {
            (Self { remaining, ..self }, TickOutcome::Counting)
        }
    }
}
