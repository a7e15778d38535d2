//! Light and particle state driven by a fire.
//!
//! Each light and emitter is a single descriptor record that carries its
//! scene handle, its full-fuel baseline, and its current (possibly dimmed)
//! output. Dimming scales the baseline linearly by the remaining fuel
//! fraction. Lights with a [`Flicker`] have their flicker bounds scaled;
//! lights without one fall back to a fixed intensity equal to their upper
//! bound.

use kindle_math::lerp;

use crate::config::{EmitterConfig, FireConfig, LightConfig};
use crate::error::FireError;
use crate::flicker::Flicker;

/// Particles per second added to a dimmed emitter so a dying fire still
/// smoulders.
pub const PARTICLE_RATE_FLOOR: f32 = 3.0;

/// A light owned by a fire.
#[derive(Debug, Clone)]
pub struct FireLight {
    handle: String,
    base_min: f32,
    base_max: f32,
    min: f32,
    max: f32,
    intensity: f32,
    enabled: bool,
    flicker: Option<Flicker>,
}

impl FireLight {
    fn from_config(index: usize, config: &LightConfig, seed: u64) -> Result<Self, FireError> {
        let handle = config
            .handle
            .clone()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| FireError::InvalidConfiguration {
                reason: format!("light {index} is missing its scene handle"),
            })?;

        let flicker = config
            .flicker
            .as_ref()
            .map(|f| Flicker::new(f, config.intensity, seed))
            .transpose()?;

        let (base_min, base_max) = match &flicker {
            Some(f) => f.bounds(),
            None => {
                if !config.intensity.is_finite() || config.intensity < 0.0 {
                    return Err(FireError::InvalidConfiguration {
                        reason: format!(
                            "light {handle} has invalid intensity {}",
                            config.intensity
                        ),
                    });
                }
                (config.intensity, config.intensity)
            }
        };

        Ok(Self {
            handle,
            base_min,
            base_max,
            min: base_min,
            max: base_max,
            intensity: base_max,
            enabled: false,
            flicker,
        })
    }

    fn restart(&mut self) {
        self.enabled = true;
        self.apply_bounds(self.base_min, self.base_max);
    }

    fn dim(&mut self, fraction: f32) {
        self.enabled = true;
        self.apply_bounds(lerp(0.0, self.base_min, fraction), lerp(0.0, self.base_max, fraction));
    }

    fn apply_bounds(&mut self, min: f32, max: f32) {
        self.min = min;
        self.max = max;
        match self.flicker.as_mut() {
            Some(flicker) => flicker.set_bounds(min, max),
            None => self.intensity = max,
        }
    }

    fn step_flicker(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }
        if let Some(flicker) = self.flicker.as_mut() {
            self.intensity = flicker.step(dt);
        }
    }

    /// Handle of the light in the host scene.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Intensity the light should display.
    pub const fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Whether the light is switched on.
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current `(min, max)` intensity bounds after dimming.
    pub const fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Full-fuel `(min, max)` intensity bounds.
    pub const fn base_bounds(&self) -> (f32, f32) {
        (self.base_min, self.base_max)
    }

    /// Whether a flicker drives this light.
    pub const fn has_flicker(&self) -> bool {
        self.flicker.is_some()
    }
}

/// A particle emitter owned by a fire.
#[derive(Debug, Clone, PartialEq)]
pub struct FireEmitter {
    handle: String,
    base_size: f32,
    base_rate: f32,
    size: f32,
    rate: f32,
    playing: bool,
}

impl FireEmitter {
    fn from_config(index: usize, config: &EmitterConfig) -> Result<Self, FireError> {
        let handle = config
            .handle
            .clone()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| FireError::InvalidConfiguration {
                reason: format!("particle emitter {index} is missing its scene handle"),
            })?;
        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if !valid(config.start_size) || !valid(config.emission_rate) {
            return Err(FireError::InvalidConfiguration {
                reason: format!(
                    "particle emitter {handle} needs non-negative size and rate, got {} and {}",
                    config.start_size, config.emission_rate
                ),
            });
        }
        Ok(Self {
            handle,
            base_size: config.start_size,
            base_rate: config.emission_rate,
            size: config.start_size,
            rate: config.emission_rate,
            playing: false,
        })
    }

    fn restart(&mut self) {
        self.size = self.base_size;
        self.rate = self.base_rate;
        self.playing = true;
    }

    fn dim(&mut self, fraction: f32) {
        self.size = lerp(0.0, self.base_size, fraction);
        self.rate = lerp(0.0, self.base_rate, fraction) + PARTICLE_RATE_FLOOR;
    }

    /// Handle of the emitter in the host scene.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Current particle start size.
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Current particles per second.
    pub const fn rate(&self) -> f32 {
        self.rate
    }

    /// Whether the emitter is playing.
    pub const fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Every light and emitter attached to one fire.
#[derive(Debug, Clone)]
pub struct FireVisuals {
    lights: Vec<FireLight>,
    emitters: Vec<FireEmitter>,
}

impl FireVisuals {
    /// Build visuals from a fire's configuration.
    ///
    /// Each flickering light is seeded from the fire seed plus its index.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::InvalidConfiguration`] naming the first light or
    /// emitter that is missing its handle or has invalid parameters.
    pub fn from_config(config: &FireConfig) -> Result<Self, FireError> {
        let lights = config
            .lights
            .iter()
            .enumerate()
            .map(|(index, light)| {
                let seed = config.seed.wrapping_add(u64::try_from(index).unwrap_or(u64::MAX));
                FireLight::from_config(index, light, seed)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let emitters = config
            .emitters
            .iter()
            .enumerate()
            .map(|(index, emitter)| FireEmitter::from_config(index, emitter))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lights, emitters })
    }

    /// Switch every light on at full bounds and restart every emitter.
    pub fn restart(&mut self) {
        self.lights.iter_mut().for_each(FireLight::restart);
        self.emitters.iter_mut().for_each(FireEmitter::restart);
    }

    /// Scale every light and emitter by the remaining fuel `fraction`.
    pub fn dim(&mut self, fraction: f32) {
        let fraction = fraction.clamp(0.0, 1.0);
        for light in &mut self.lights {
            light.dim(fraction);
        }
        for emitter in &mut self.emitters {
            emitter.dim(fraction);
        }
    }

    /// Switch every light off and stop every emitter.
    pub fn shut_down(&mut self) {
        for light in &mut self.lights {
            light.enabled = false;
        }
        for emitter in &mut self.emitters {
            emitter.playing = false;
        }
    }

    /// Step the flicker on every enabled light.
    pub fn step_flickers(&mut self, dt: f32) {
        for light in &mut self.lights {
            light.step_flicker(dt);
        }
    }

    /// Sum of intensities across enabled lights.
    pub fn total_intensity(&self) -> f32 {
        self.lights
            .iter()
            .filter(|l| l.enabled)
            .map(|l| l.intensity)
            .sum()
    }

    /// Lights in configuration order.
    pub fn lights(&self) -> &[FireLight] {
        &self.lights
    }

    /// Emitters in configuration order.
    pub fn emitters(&self) -> &[FireEmitter] {
        &self.emitters
    }
}
