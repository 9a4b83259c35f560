use pomidor_core::{Config, PomodoroEngine};

/// Print the idle engine snapshot for the configured durations.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let engine = PomodoroEngine::new(config.durations()?);
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}
