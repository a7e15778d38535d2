//! Integration tests for the `kindle-core` tick cycle and runner.
//!
//! These build a full [`SimulationState`] from configuration and drive it
//! through whole simulated days, checking what the host collaborators see.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]

use std::sync::{Arc, Mutex};

use kindle_core::ambient::AmbientSink;
use kindle_core::config::{SimulationConfig, TideConfig, TimeConfig};
use kindle_core::runner::{self, EndReason, RunOptions, TickCallback};
use kindle_core::tick::{self, SimulationState, TickSummary};
use kindle_fire::{Contact, FireConfig, FireEffects, FireVisuals, LightConfig, NullEffects};
use kindle_types::{AmbientBand, Color, FireId, TideDirection};

#[derive(Default)]
struct RecordingSink {
    colors: Vec<Color>,
}

impl AmbientSink for RecordingSink {
    fn set_ambient(&mut self, color: Color) {
        self.colors.push(color);
    }
}

#[derive(Debug, Default)]
struct EffectsLog {
    ignites: u32,
    extinguishes: u32,
    dims: u32,
}

struct RecordingEffects(Arc<Mutex<EffectsLog>>);

impl FireEffects for RecordingEffects {
    fn on_ignite(&mut self, _fire: FireId, _visuals: &FireVisuals) {
        let mut log = self.0.lock().unwrap();
        log.ignites = log.ignites.saturating_add(1);
    }
    fn on_extinguish(&mut self, _fire: FireId, _visuals: &FireVisuals) {
        let mut log = self.0.lock().unwrap();
        log.extinguishes = log.extinguishes.saturating_add(1);
    }
    fn apply_dim(&mut self, _fire: FireId, _visuals: &FireVisuals) {
        let mut log = self.0.lock().unwrap();
        log.dims = log.dims.saturating_add(1);
    }
}

fn null_effects(_: &FireConfig) -> Box<dyn FireEffects> {
    Box::new(NullEffects)
}

fn campfire(burn_time_seconds: f32) -> FireConfig {
    FireConfig {
        name: "campfire".to_owned(),
        lit: true,
        burn_time_seconds,
        lights: vec![LightConfig {
            handle: Some("campfire/light".to_owned()),
            intensity: 4.0,
            flicker: None,
        }],
        ..FireConfig::default()
    }
}

/// A 240-second day starting at midnight: ten real seconds per hour.
fn short_day() -> SimulationConfig {
    SimulationConfig {
        time: TimeConfig {
            day_length_seconds: 240.0,
            start_hour: 0.0,
        },
        ..SimulationConfig::default()
    }
}

#[test]
fn a_full_day_walks_every_band_in_order() {
    let mut state = SimulationState::new(&short_day(), null_effects).unwrap();
    let mut sink = RecordingSink::default();

    let summaries: Vec<TickSummary> = (0..240)
        .map(|_| tick::run_tick(&mut state, 1.0, &mut sink).unwrap())
        .collect();

    // Midnight start sits in the early-hours gap: no band yet.
    assert_eq!(summaries[0].band, None);

    let mut seen: Vec<AmbientBand> = Vec::new();
    for band in summaries.iter().filter_map(|s| s.band) {
        if seen.last() != Some(&band) {
            seen.push(band);
        }
    }
    assert_eq!(seen, AmbientBand::ALL);

    // Back at midnight on day 2 the night target is still held.
    let last = summaries.last().unwrap();
    assert_eq!(last.day, 2);
    assert_eq!(last.band, Some(AmbientBand::Night));
    assert_eq!(sink.colors.len(), 240);
    assert!(sink.colors.last().unwrap().approx_eq(Color::BLACK));
}

#[test]
fn fire_burns_out_and_can_be_relit_by_contact() {
    let log = Arc::new(Mutex::new(EffectsLog::default()));
    let config = SimulationConfig {
        fires: vec![campfire(5.0)],
        ..short_day()
    };
    let shared = Arc::clone(&log);
    let mut state = SimulationState::new(&config, move |_: &FireConfig| {
        Box::new(RecordingEffects(Arc::clone(&shared))) as Box<dyn FireEffects>
    })
    .unwrap();
    let mut sink = RecordingSink::default();

    let mut burned_out_at = None;
    for _ in 0..10 {
        let summary = tick::run_tick(&mut state, 1.0, &mut sink).unwrap();
        if !summary.burned_out.is_empty() {
            burned_out_at = Some(summary.tick);
        }
    }
    assert_eq!(burned_out_at, Some(5));
    assert!(!state.fires[0].is_lit());

    let outcome = state.fire_mut("campfire").unwrap().on_contact(&Contact::fire(true));
    assert!(outcome.ignited);
    let fire = &state.fires[0];
    assert!(fire.is_lit());
    assert_eq!(fire.fuel().remaining_fuel_seconds(), 5.0);

    let log = log.lock().unwrap();
    assert_eq!(log.ignites, 2);
    assert_eq!(log.extinguishes, 1);
    assert_eq!(log.dims, 5);
}

#[test]
fn water_puts_out_only_unproofed_fires() {
    let mut proofed = campfire(-1.0);
    proofed.name = "lantern".to_owned();
    proofed.water_proof = true;
    let config = SimulationConfig {
        fires: vec![campfire(-1.0), proofed],
        ..short_day()
    };
    let mut state = SimulationState::new(&config, null_effects).unwrap();

    for fire in &mut state.fires {
        fire.on_contact(&Contact::water());
    }
    let summary = tick::run_tick(&mut state, 1.0, &mut RecordingSink::default()).unwrap();
    assert_eq!(summary.fires_lit, 1);
    assert!(state.fire_mut("lantern").unwrap().is_lit());
}

#[test]
fn tide_cycles_within_bounds() {
    let config = SimulationConfig {
        time: TimeConfig {
            day_length_seconds: 24.0,
            start_hour: 0.0,
        },
        tide: TideConfig {
            enabled: true,
            water_plane: Some("bay/water".to_owned()),
            ..TideConfig::default()
        },
        ..SimulationConfig::default()
    };
    let mut state = SimulationState::new(&config, null_effects).unwrap();
    let mut sink = RecordingSink::default();

    let tides: Vec<_> = (0..48)
        .map(|_| {
            tick::run_tick(&mut state, 0.5, &mut sink)
                .unwrap()
                .tide
                .unwrap()
        })
        .collect();

    assert!(tides.iter().all(|t| (0.899..=1.101).contains(&t.height)));
    assert!(tides.iter().any(|t| t.direction == TideDirection::Rising));
    assert!(tides.iter().any(|t| t.direction == TideDirection::Falling));
    let highest = tides.iter().map(|t| t.height).fold(f32::MIN, f32::max);
    assert!((highest - 1.1).abs() < 1.0e-4);
}

struct CollectingCallback {
    ticks: Vec<u64>,
}

impl TickCallback for CollectingCallback {
    fn on_tick(&mut self, summary: &TickSummary, state: &SimulationState) {
        assert_eq!(summary.tick, state.tick);
        self.ticks.push(summary.tick);
    }
}

#[tokio::test(start_paused = true)]
async fn runner_drives_ticks_and_collaborators() {
    let mut state = SimulationState::new(&short_day(), null_effects).unwrap();
    let mut sink = RecordingSink::default();
    let mut callback = CollectingCallback { ticks: Vec::new() };
    let options = RunOptions {
        tick_interval_ms: 100,
        time_scale: 10.0,
        max_ticks: Some(10),
    };

    let result = runner::run_simulation(
        &mut state,
        &mut sink,
        &mut callback,
        &options,
        std::future::pending(),
    )
    .await
    .unwrap();

    assert_eq!(result.end_reason, EndReason::MaxTicks);
    assert_eq!(callback.ticks, (1..=10).collect::<Vec<_>>());
    assert_eq!(sink.colors.len(), 10);
    // Ten ticks of one simulated second each.
    assert!((state.clock.accumulated_seconds() - 10.0).abs() < 1.0e-4);
    runner::log_simulation_end(&result);
}
