//! Tick callback that logs notable changes between ticks.

use kindle_core::runner::TickCallback;
use kindle_core::tick::{SimulationState, TickSummary};
use kindle_types::AmbientBand;
use tracing::info;

/// Logs band changes, day rollovers, and burned-out fires.
#[derive(Debug, Default)]
pub struct ReportCallback {
    band: Option<AmbientBand>,
    day: u64,
}

impl ReportCallback {
    /// Create a callback with nothing seen yet.
    pub const fn new() -> Self {
        Self { band: None, day: 0 }
    }
}

impl TickCallback for ReportCallback {
    fn on_tick(&mut self, summary: &TickSummary, sim: &SimulationState) {
        if summary.day != self.day {
            self.day = summary.day;
            info!(day = summary.day, tick = summary.tick, "New day");
        }
        if summary.band != self.band {
            self.band = summary.band;
            info!(band = ?summary.band, hour = summary.hour, clock = %sim.clock, "Ambient band changed");
        }
        for name in &summary.burned_out {
            info!(fire = %name, tick = summary.tick, "Fire burned out");
        }
    }
}
