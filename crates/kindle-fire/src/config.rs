//! Designer-set parameters for fires, lights, emitters, and flicker.
//!
//! These structs mirror the `fires` section of `kindle-config.yaml`. Every
//! field has a default so a fire can be declared with only the pieces that
//! differ from a stock campfire.

use kindle_types::FlickerMethod;
use serde::Deserialize;

use crate::fuel::INFINITE_BURN;

/// Configuration for one combustible entity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FireConfig {
    /// Human-readable name used in logs.
    #[serde(default = "default_fire_name")]
    pub name: String,

    /// Whether the fire is burning when the scene starts.
    #[serde(default)]
    pub lit: bool,

    /// Maximum burn time in seconds; `-1` burns forever.
    #[serde(default = "default_burn_time_seconds")]
    pub burn_time_seconds: f32,

    /// Whether the fire ignores water contact.
    #[serde(default)]
    pub water_proof: bool,

    /// Seed for this fire's flicker randomness.
    #[serde(default)]
    pub seed: u64,

    /// Lights driven by this fire.
    #[serde(default)]
    pub lights: Vec<LightConfig>,

    /// Particle emitters driven by this fire.
    #[serde(default)]
    pub emitters: Vec<EmitterConfig>,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            name: default_fire_name(),
            lit: false,
            burn_time_seconds: default_burn_time_seconds(),
            water_proof: false,
            seed: 0,
            lights: Vec::new(),
            emitters: Vec::new(),
        }
    }
}

/// A light attached to a fire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LightConfig {
    /// Handle of the light in the host scene. Required.
    #[serde(default)]
    pub handle: Option<String>,

    /// Fixed intensity used when no flicker is attached.
    #[serde(default = "default_light_intensity")]
    pub intensity: f32,

    /// Optional flicker behaviour. Its bounds replace `intensity`.
    #[serde(default)]
    pub flicker: Option<FlickerConfig>,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            handle: None,
            intensity: default_light_intensity(),
            flicker: None,
        }
    }
}

/// A particle emitter attached to a fire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmitterConfig {
    /// Handle of the emitter in the host scene. Required.
    #[serde(default)]
    pub handle: Option<String>,

    /// Particle start size at full fuel.
    #[serde(default = "default_start_size")]
    pub start_size: f32,

    /// Particles per second at full fuel.
    #[serde(default = "default_emission_rate")]
    pub emission_rate: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            handle: None,
            start_size: default_start_size(),
            emission_rate: default_emission_rate(),
        }
    }
}

/// Flicker parameters for a single light.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FlickerConfig {
    /// Flicker cadence in `[0.01, 1]`; higher flickers faster.
    #[serde(default = "default_flicker_rate")]
    pub rate: f32,

    /// Lowest intensity the light may reach, in `[0, 8]`.
    #[serde(default = "default_flicker_min")]
    pub min: f32,

    /// Highest intensity the light may reach, in `[0, 8]`.
    #[serde(default = "default_flicker_max")]
    pub max: f32,

    /// How the next intensity is chosen.
    #[serde(default)]
    pub method: FlickerMethod,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            rate: default_flicker_rate(),
            min: default_flicker_min(),
            max: default_flicker_max(),
            method: FlickerMethod::default(),
        }
    }
}

fn default_fire_name() -> String {
    "fire".to_owned()
}

const fn default_burn_time_seconds() -> f32 {
    INFINITE_BURN
}

const fn default_light_intensity() -> f32 {
    1.0
}

const fn default_start_size() -> f32 {
    1.0
}

const fn default_emission_rate() -> f32 {
    10.0
}

const fn default_flicker_rate() -> f32 {
    0.2
}

const fn default_flicker_min() -> f32 {
    1.0
}

const fn default_flicker_max() -> f32 {
    3.0
}
