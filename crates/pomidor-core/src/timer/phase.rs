//! Phase identity and single-interval progress tracking.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The two recurring interval types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Rest,
}

impl Phase {
    /// The phase the engine auto-transitions into when this one completes.
    pub fn other(self) -> Self {
        match self {
            Phase::Work => Phase::Rest,
            Phase::Rest => Phase::Work,
        }
    }
}

/// Progress of one work or rest interval.
///
/// Pure state: `elapsed` only moves through [`advance`] and never exceeds
/// `total`. A negative tick delta is unrepresentable (`Duration` is
/// unsigned); clock regression is clamped to zero where deltas are computed.
///
/// [`advance`]: PhaseTimer::advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimer {
    total: Duration,
    elapsed: Duration,
}

impl PhaseTimer {
    /// Begin a fresh interval of length `total`.
    ///
    /// Callers guarantee `total > 0`; [`Durations::new`] is the validation
    /// gate and nothing else constructs timers.
    ///
    /// [`Durations::new`]: crate::timer::Durations::new
    pub fn start(total: Duration) -> Self {
        debug_assert!(!total.is_zero(), "phase duration must be positive");
        Self {
            total,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance elapsed time, saturating at the interval length.
    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.total);
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed == self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn remaining(&self) -> Duration {
        self.total.saturating_sub(self.elapsed)
    }

    /// Whole-percent progress, floored and clamped to 0..=100.
    pub fn percent(&self) -> u8 {
        let total_ms = self.total.as_millis();
        if total_ms == 0 {
            return 100;
        }
        let pct = self.elapsed.as_millis().saturating_mul(100) / total_ms;
        pct.min(100) as u8
    }
}
