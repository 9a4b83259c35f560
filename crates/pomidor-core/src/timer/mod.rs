mod engine;
mod phase;

pub use engine::{Durations, PomodoroEngine, RunState};
pub use phase::{Phase, PhaseTimer};
