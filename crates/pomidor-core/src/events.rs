//! Notification and snapshot types.
//!
//! Every observable change in the engine produces a [`Notification`]. The
//! engine fans them out to observers; frontends serialize them as JSON.

use serde::{Deserialize, Serialize};

use crate::timer::{Phase, RunState};

/// One timer notification, mirroring the ten observer callbacks.
///
/// Time-left values are carried as whole milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    WorkStarted,
    WorkPercent { percent: u8 },
    WorkTimeLeft { remaining_ms: u64 },
    WorkComplete,
    RestStarted,
    RestPercent { percent: u8 },
    RestTimeLeft { remaining_ms: u64 },
    RestComplete,
    Paused,
    Resumed,
}

/// A point-in-time view of the engine state.
///
/// Snapshots are copies of derived values, never references into the
/// session, so observers and frontends cannot mutate engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub run_state: RunState,
    pub percent: u8,
    pub remaining_ms: u64,
    pub total_ms: u64,
}
