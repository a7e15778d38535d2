//! Fixed-step simulation loop.
//!
//! This module provides [`run_simulation`], the top-level async function
//! that drives [`run_tick`] on a `tokio` interval with support for:
//!
//! - **Bounded runs**: stop after `max_ticks`
//! - **Time scaling**: each real tick advances `interval * time_scale`
//!   simulated seconds
//! - **Clean shutdown**: any future can request a stop between ticks
//!
//! [`run_tick`]: crate::tick::run_tick

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::ambient::AmbientSink;
use crate::config::WorldConfig;
use crate::tick::{self, SimulationState, TickError, TickSummary};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },

    /// The run options cannot drive a loop.
    #[error("invalid run options: {reason}")]
    InvalidOptions {
        /// Explanation of what is wrong with the options.
        reason: String,
    },
}

/// Why the simulation loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    /// The configured tick limit was reached.
    MaxTicks,
    /// The shutdown future completed.
    Shutdown,
}

/// Loop timing and bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    /// Real milliseconds between ticks.
    pub tick_interval_ms: u64,
    /// Simulated seconds per real second.
    pub time_scale: f32,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
}

impl RunOptions {
    /// Take loop settings from the world section.
    pub const fn from_config(world: &WorldConfig) -> Self {
        Self {
            tick_interval_ms: world.tick_interval_ms,
            time_scale: world.time_scale,
            max_ticks: world.max_ticks,
        }
    }

    /// Simulated seconds advanced by each tick.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidOptions`] if the interval is zero or
    /// the time scale is negative or not finite.
    #[allow(clippy::cast_precision_loss)]
    pub fn step_seconds(&self) -> Result<f32, RunnerError> {
        if self.tick_interval_ms == 0 {
            return Err(RunnerError::InvalidOptions {
                reason: "tick_interval_ms must be at least 1".to_owned(),
            });
        }
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(RunnerError::InvalidOptions {
                reason: format!("time_scale must be non-negative, got {}", self.time_scale),
            });
        }
        // Intervals are small; precision loss only matters past 2^24 ms.
        Ok(self.tick_interval_ms as f32 / 1_000.0 * self.time_scale)
    }
}

/// Result of the simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The reason the simulation ended.
    pub end_reason: EndReason,
    /// The last tick summary, if any tick completed.
    pub final_summary: Option<TickSummary>,
    /// Total number of ticks executed.
    pub total_ticks: u64,
    /// Wall-clock time the loop started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock time the loop stopped.
    pub ended_at: DateTime<Utc>,
}

/// Callback invoked after each tick completes.
///
/// Implementations can use this to publish tick summaries or inspect the
/// state after each step.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _state: &SimulationState) {}
}

/// Run the simulation loop until a termination condition is met.
///
/// Ticks fire on a fixed interval. The loop stops when `max_ticks` ticks
/// have run or when `shutdown` completes, whichever comes first. Shutdown
/// is checked before every tick, so a tick is never interrupted halfway.
///
/// # Errors
///
/// Returns [`RunnerError::InvalidOptions`] for unusable timing, or
/// [`RunnerError::Tick`] if a tick fails.
pub async fn run_simulation<S>(
    state: &mut SimulationState,
    sink: &mut dyn AmbientSink,
    callback: &mut dyn TickCallback,
    options: &RunOptions,
    shutdown: S,
) -> Result<SimulationResult, RunnerError>
where
    S: Future<Output = ()>,
{
    let dt = options.step_seconds()?;
    let started_at = Utc::now();
    let mut last_summary: Option<TickSummary> = None;
    let mut total_ticks: u64 = 0;

    let mut interval = tokio::time::interval(Duration::from_millis(options.tick_interval_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    info!(
        tick_interval_ms = options.tick_interval_ms,
        time_scale = options.time_scale,
        max_ticks = options.max_ticks,
        step_seconds = dt,
        "Simulation starting"
    );

    let end_reason = loop {
        if options.max_ticks.is_some_and(|max| total_ticks >= max) {
            info!(total_ticks, "Tick limit reached");
            break EndReason::MaxTicks;
        }

        tokio::select! {
            biased;
            () = &mut shutdown => {
                info!(total_ticks, "Shutdown requested");
                break EndReason::Shutdown;
            }
            _ = interval.tick() => {}
        }

        let summary = tick::run_tick(state, dt, sink)?;
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&summary, state);
        last_summary = Some(summary);
    };

    Ok(SimulationResult {
        end_reason,
        final_summary: last_summary,
        total_ticks,
        started_at,
        ended_at: Utc::now(),
    })
}

/// Log the simulation end sequence.
pub fn log_simulation_end(result: &SimulationResult) {
    let elapsed_ms = (result.ended_at - result.started_at).num_milliseconds();
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        elapsed_ms,
        "Simulation ended"
    );

    if let Some(ref summary) = result.final_summary {
        info!(
            tick = summary.tick,
            day = summary.day,
            hour = summary.hour,
            band = ?summary.band,
            fires_lit = summary.fires_lit,
            "Final tick summary"
        );
    } else {
        warn!("Simulation ended with no ticks executed");
    }
}
