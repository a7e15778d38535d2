//! Headless driver for the Kindle simulation.
//!
//! This is the main entry point that wires together configuration, logging,
//! the simulation state, and the fixed-step loop. Renderer-facing output
//! goes to the structured log.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `kindle-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Build the simulation state: clock, sun, ambient, tide, fires
//! 4. Run the loop until `max_ticks` or Ctrl-C
//! 5. Log the result

mod effects;
mod error;
mod report_callback;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use kindle_core::config::{LoggingConfig, SimulationConfig};
use kindle_core::runner::{self, RunOptions};
use kindle_core::tick::SimulationState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::effects::{LogAmbientSink, LogEffects};
use crate::error::EngineError;
use crate::report_callback::ReportCallback;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "kindle-config.yaml";

/// Application entry point for the Kindle engine.
///
/// # Errors
///
/// Returns an error if configuration, setup, or the simulation loop fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    if !config_path.exists() {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        world_name = %config.world.name,
        tick_interval_ms = config.world.tick_interval_ms,
        time_scale = config.world.time_scale,
        day_length_seconds = config.time.day_length_seconds,
        fires = config.fires.len(),
        "Configuration loaded"
    );

    // 3. Build the simulation state.
    let mut state = SimulationState::new(&config, LogEffects::for_fire)
        .map_err(EngineError::from)
        .context("building simulation state")?;

    // 4. Run the simulation.
    let options = RunOptions::from_config(&config.world);
    let mut sink = LogAmbientSink::default();
    let mut callback = ReportCallback::new();
    let result = runner::run_simulation(
        &mut state,
        &mut sink,
        &mut callback,
        &options,
        shutdown_signal(),
    )
    .await
    .map_err(EngineError::from)
    .context("running simulation")?;

    // 5. Log results.
    runner::log_simulation_end(&result);
    if let Some(summary) = &result.final_summary {
        let json = serde_json::to_string(summary).context("serializing final summary")?;
        info!(summary = %json, "Final state");
    }

    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "kindle-engine shutdown complete"
    );

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load the simulation configuration from `path`.
///
/// Falls back to defaults when the file does not exist.
fn load_config(path: &Path) -> Result<SimulationConfig, EngineError> {
    if path.exists() {
        Ok(SimulationConfig::from_file(path)?)
    } else {
        let mut config = SimulationConfig::default();
        config.world.apply_env_overrides();
        Ok(config)
    }
}

/// Resolve when Ctrl-C is pressed. Never resolves if the handler cannot
/// be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Ctrl-C handler unavailable, run until tick limit");
        std::future::pending::<()>().await;
    }
}
