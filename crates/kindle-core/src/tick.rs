//! Tick cycle: one fixed step of the whole environment.
//!
//! Each tick runs these phases in order:
//!
//! 1. **Clock** -- advance the [`CycleClock`] by `dt`. A rejected step
//!    aborts the tick before anything else changes.
//! 2. **Sun** -- turn the [`SunRig`].
//! 3. **Ambient** -- re-select the target on an hour change, poll the fade,
//!    and hand the colour to the [`AmbientSink`].
//! 4. **Tide** -- recompute water height, if tides are on.
//! 5. **Report** -- log clock, tide, and ambient state when the
//!    [`DebugReporter`] is due.
//! 6. **Fires** -- update every [`Combustible`] in configuration order.
//!
//! The clock is owned by [`SimulationState`] and lent to each phase. The
//! cycle is deterministic for a given configuration and step size, apart
//! from fire identifiers.

use kindle_fire::{Combustible, FireConfig, FireEffects, FireError, FireEvent};
use kindle_types::{AmbientBand, Color, FireId};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::ambient::{AmbientController, AmbientError, AmbientSink};
use crate::clock::{ClockError, CycleClock};
use crate::config::SimulationConfig;
use crate::debug::DebugReporter;
use crate::sun::{SunAngles, SunError, SunRig};
use crate::tide::{Tide, TideState};

/// Errors that prevent the simulation from being built.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The time section is invalid.
    #[error("clock setup failed: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The ambient section is invalid.
    #[error("ambient setup failed: {source}")]
    Ambient {
        /// The underlying ambient error.
        #[from]
        source: AmbientError,
    },

    /// The sun section is invalid.
    #[error("sun setup failed: {source}")]
    Sun {
        /// The underlying sun error.
        #[from]
        source: SunError,
    },
}

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The sun rejected the step.
    #[error("sun error: {source}")]
    Sun {
        /// The underlying sun error.
        #[from]
        source: SunError,
    },

    /// The ambient controller rejected the step.
    #[error("ambient error: {source}")]
    Ambient {
        /// The underlying ambient error.
        #[from]
        source: AmbientError,
    },

    /// A fire failed to update.
    #[error("fire error for {fire}: {source}")]
    Fire {
        /// The fire that failed.
        fire: FireId,
        /// The underlying fire error.
        source: FireError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSummary {
    /// The tick number that was executed, starting at 1.
    pub tick: u64,
    /// Day number after the step.
    pub day: u64,
    /// Hour of day after the step.
    pub hour: f32,
    /// Ambient band targeted, if any has been selected yet.
    pub band: Option<AmbientBand>,
    /// Ambient colour applied this tick.
    pub ambient: Color,
    /// Tide state, when tides are on.
    pub tide: Option<TideState>,
    /// Sun orientation after the step.
    pub sun: SunAngles,
    /// Fires burning at the end of the tick.
    pub fires_lit: usize,
    /// Names of fires that burned out this tick.
    pub burned_out: Vec<String>,
}

/// The mutable simulation state passed through the tick cycle.
#[derive(Debug)]
pub struct SimulationState {
    /// Scene name.
    pub name: String,
    /// The day/night clock.
    pub clock: CycleClock,
    /// The sun rig.
    pub sun: SunRig,
    /// The ambient light controller.
    pub ambient: AmbientController,
    /// Tides, if enabled and valid.
    pub tide: Option<Tide>,
    /// Fires in configuration order.
    pub fires: Vec<Combustible>,
    /// Periodic debug reporter, if enabled.
    pub reporter: Option<DebugReporter>,
    /// Ticks executed so far.
    pub tick: u64,
}

impl SimulationState {
    /// Build the simulation from configuration.
    ///
    /// `effects_for` supplies the collaborator for each fire. An invalid
    /// tide section disables tides with a warning, and an invalid fire is
    /// skipped with an error log; neither stops the rest of the scene.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the time, ambient, or sun section is
    /// invalid.
    pub fn new<F>(config: &SimulationConfig, mut effects_for: F) -> Result<Self, SetupError>
    where
        F: FnMut(&FireConfig) -> Box<dyn FireEffects>,
    {
        let clock = CycleClock::new(&config.time)?;
        let sun = SunRig::new(&config.sun, &clock)?;
        let ambient = AmbientController::new(&config.ambient, &clock)?;

        let tide = if config.tide.enabled {
            match Tide::new(&config.tide) {
                Ok(tide) => Some(tide),
                Err(e) => {
                    warn!(error = %e, "Tides disabled");
                    None
                }
            }
        } else {
            None
        };

        let mut fires = Vec::with_capacity(config.fires.len());
        for fire_config in &config.fires {
            match Combustible::new(fire_config, effects_for(fire_config)) {
                Ok(fire) => fires.push(fire),
                Err(e) => {
                    error!(fire = %fire_config.name, error = %e, "Skipping fire with invalid configuration");
                }
            }
        }

        info!(
            name = %config.world.name,
            clock = %clock,
            tides = tide.is_some(),
            fires = fires.len(),
            "Simulation state built"
        );

        Ok(Self {
            name: config.world.name.clone(),
            clock,
            sun,
            ambient,
            tide,
            fires,
            reporter: DebugReporter::from_config(&config.debug),
            tick: 0,
        })
    }

    /// Find a fire by its configured name.
    pub fn fire_mut(&mut self, name: &str) -> Option<&mut Combustible> {
        self.fires.iter_mut().find(|f| f.name() == name)
    }

    /// Tide at the clock's current hour, if tides are on.
    pub fn tide_state(&self) -> Option<TideState> {
        self.tide
            .as_ref()
            .and_then(|tide| tide.state_at(&self.clock).ok())
    }
}

/// Execute a single tick of `dt` seconds.
///
/// # Errors
///
/// Returns [`TickError::Clock`] if `dt` is negative or not finite, in which
/// case nothing changes. Returns [`TickError::Fire`] if a fire rejects the
/// step.
pub fn run_tick(
    state: &mut SimulationState,
    dt: f32,
    sink: &mut dyn AmbientSink,
) -> Result<TickSummary, TickError> {
    // Phase 1: clock
    state.clock.advance(dt)?;

    // Phase 2: sun
    let sun = state.sun.rotate(dt)?;

    // Phase 3: ambient
    let ambient = state.ambient.update(&state.clock, dt)?;
    sink.set_ambient(ambient);

    // Phase 4: tide
    let tide = match state.tide.as_ref().map(|t| t.state_at(&state.clock)) {
        Some(Ok(tide)) => Some(tide),
        Some(Err(e)) => {
            warn!(error = %e, "Tide update failed, disabling tides");
            state.tide = None;
            None
        }
        None => None,
    };

    // Phase 5: debug report
    if state.reporter.as_mut().is_some_and(|r| r.poll(dt)) {
        info!(
            clock = %state.clock,
            tide = %tide.map_or_else(|| "off".to_owned(), |t| t.to_string()),
            ambient = %state.ambient,
            "Environment report"
        );
    }

    // Phase 6: fires
    let mut burned_out = Vec::new();
    for fire in &mut state.fires {
        match fire.update(dt) {
            Ok(Some(FireEvent::BurnedOut)) => burned_out.push(fire.name().to_owned()),
            Ok(None) => {}
            Err(source) => {
                return Err(TickError::Fire {
                    fire: fire.id(),
                    source,
                });
            }
        }
    }

    state.tick = state.tick.saturating_add(1);
    let summary = TickSummary {
        tick: state.tick,
        day: state.clock.day_number(),
        hour: state.clock.hour_of_day(),
        band: state.ambient.band(),
        ambient,
        tide,
        sun,
        fires_lit: state.fires.iter().filter(|f| f.is_lit()).count(),
        burned_out,
    };

    debug!(
        tick = summary.tick,
        hour = summary.hour,
        fires_lit = summary.fires_lit,
        "Tick complete"
    );

    Ok(summary)
}
