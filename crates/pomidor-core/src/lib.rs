//! # Pomidor Core Library
//!
//! This library provides the core business logic for the Pomidor work/rest
//! cycle timer. It implements a CLI-first philosophy where the engine is a
//! plain value driven by its caller, with any GUI or shell frontend being a
//! thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Engine**: A tick-driven state machine that requires the caller to
//!   periodically invoke `tick(delta)` for progress updates. The engine never
//!   reads the wall clock; deltas come from the driver.
//! - **Clock**: Monotonic time source abstraction used by drivers to compute
//!   tick deltas (real clock in production, programmable clock in tests)
//! - **Observers**: Synchronous fan-out of the ten timer notifications to
//!   registered subscribers
//! - **Config**: TOML-based configuration for phase durations and cadence
//!
//! ## Key Components
//!
//! - [`PomodoroEngine`]: Core work/rest state machine
//! - [`PomodoroObserver`]: Subscriber trait for timer notifications
//! - [`Clock`]: Monotonic time source trait
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod observer;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{ConfigError, CoreError};
pub use events::{Notification, Snapshot};
pub use observer::{PomodoroObserver, Recorder};
pub use timer::{Durations, Phase, PhaseTimer, PomodoroEngine, RunState};
