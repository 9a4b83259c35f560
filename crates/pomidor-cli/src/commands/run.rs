//! Foreground timer session.
//!
//! The run loop is the external scheduler: a `tokio` interval at the
//! configured cadence computes monotonic deltas and feeds them to the
//! engine, while control commands arrive as stdin lines. Ticks and controls
//! are serialized through one `select!` loop, so neither can interleave with
//! the other mid-update.

use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::time::MissedTickBehavior;

use pomidor_core::{
    Clock, Config, Notification, PomodoroEngine, PomodoroObserver, SystemClock,
};

#[derive(Args)]
pub struct RunArgs {
    /// Work phase length in minutes (overrides config)
    #[arg(long)]
    work: Option<u64>,
    /// Rest phase length in minutes (overrides config)
    #[arg(long)]
    rest: Option<u64>,
    /// Tick cadence in seconds (overrides config)
    #[arg(long)]
    tick: Option<u64>,
}

/// Prints every notification as one JSON line with an envelope timestamp.
struct JsonEmitter;

#[derive(Serialize)]
struct Envelope<'a> {
    at: DateTime<Utc>,
    #[serde(flatten)]
    notification: &'a Notification,
}

impl PomodoroObserver for JsonEmitter {
    fn notify(&mut self, notification: &Notification) {
        let envelope = Envelope {
            at: Utc::now(),
            notification,
        };
        match serde_json::to_string(&envelope) {
            Ok(line) => println!("{line}"),
            Err(e) => log::error!("failed to serialize notification: {e}"),
        }
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if let Some(work) = args.work {
        config.timer.work_minutes = work;
    }
    if let Some(rest) = args.rest {
        config.timer.rest_minutes = rest;
    }
    if let Some(tick) = args.tick {
        config.timer.tick_seconds = tick;
    }
    config.validate()?;

    let durations = config.durations()?;
    let cadence = config.tick_interval();
    log::info!(
        "session: work {}m / rest {}m, ticking every {}s",
        config.timer.work_minutes,
        config.timer.rest_minutes,
        config.timer.tick_seconds
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session(durations, cadence))
}

async fn session(
    durations: pomidor_core::Durations,
    cadence: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = PomodoroEngine::new(durations);
    engine.subscribe(Box::new(JsonEmitter));

    let clock = SystemClock;
    let mut last = clock.now();

    let mut interval = tokio::time::interval(cadence);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    eprintln!("commands: play pause work break reset status quit");
    engine.play();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // Advance `last` even while paused or idle, so a resume only
                // counts time since the previous tick.
                let now = clock.now();
                let delta = now.saturating_duration_since(last);
                last = now;
                engine.tick(delta);
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(command) => {
                        if dispatch(&mut engine, command.trim())? {
                            break;
                        }
                    }
                    None => stdin_open = false,
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    log::info!("session ended");
    Ok(())
}

/// Apply one control command. Returns true when the session should end.
fn dispatch(
    engine: &mut PomodoroEngine,
    command: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        "play" | "resume" => engine.play(),
        "pause" => engine.pause(),
        "work" => engine.go_to_work(),
        "break" | "rest" => engine.take_a_break(),
        "reset" => engine.reset(),
        "status" => println!("{}", serde_json::to_string(&engine.snapshot())?),
        "quit" | "exit" | "q" => return Ok(true),
        "" => {}
        other => eprintln!("unknown command: {other}"),
    }
    Ok(false)
}
