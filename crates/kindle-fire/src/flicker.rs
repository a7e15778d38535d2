//! Intensity flicker for a single fire light.
//!
//! Two methods are supported:
//!
//! - [`FlickerMethod::Random`] takes one discrete step every `1 - rate`
//!   seconds, picking uniformly from seven nudges (scale down/up by 10%,
//!   hold, add or subtract 0.1, add or subtract 0.01) and clamping the
//!   result into `[min, max]`.
//! - [`FlickerMethod::Noise`] drifts a sample point through a 2D Perlin
//!   field every step and maps the sample onto `[min, max]`.
//!
//! Randomness is drawn from a seeded [`StdRng`] and the Perlin field is
//! seeded from the same value, so two flickers built with the same seed
//! produce the same intensity sequence.

use kindle_math::lerp;
use kindle_types::FlickerMethod;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FlickerConfig;
use crate::error::FireError;

/// Slowest allowed flicker cadence.
pub const MIN_FLICKER_RATE: f32 = 0.01;

/// Brightest intensity a flickering light may be configured for.
pub const MAX_FLICKER_INTENSITY: f32 = 8.0;

/// Flicker state for one light.
#[derive(Debug, Clone)]
pub struct Flicker {
    /// Cadence in `[MIN_FLICKER_RATE, 1]`.
    rate: f32,
    /// Current lower intensity bound.
    min: f32,
    /// Current upper intensity bound.
    max: f32,
    /// How the next intensity is chosen.
    method: FlickerMethod,
    /// Last intensity written to the light.
    intensity: f32,
    /// Seconds accumulated towards the next random step.
    count: f32,
    /// Noise-field sample point.
    noise_x: f32,
    noise_y: f32,
    /// Noise field sampled by the noise method.
    perlin: Perlin,
    /// Source of randomness for both methods.
    rng: StdRng,
}

impl Flicker {
    /// Build a flicker from its configuration.
    ///
    /// `initial_intensity` is the light's intensity before the first step.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::InvalidConfiguration`] if the rate is outside
    /// `[0.01, 1]` or the bounds are outside `[0, 8]` or inverted.
    pub fn new(config: &FlickerConfig, initial_intensity: f32, seed: u64) -> Result<Self, FireError> {
        if !(MIN_FLICKER_RATE..=1.0).contains(&config.rate) {
            return Err(FireError::InvalidConfiguration {
                reason: format!(
                    "flicker rate must be in [{MIN_FLICKER_RATE}, 1], got {}",
                    config.rate
                ),
            });
        }
        let in_range = |v: f32| (0.0..=MAX_FLICKER_INTENSITY).contains(&v);
        if !in_range(config.min) || !in_range(config.max) || config.min > config.max {
            return Err(FireError::InvalidConfiguration {
                reason: format!(
                    "flicker bounds must satisfy 0 <= min <= max <= {MAX_FLICKER_INTENSITY}, got [{}, {}]",
                    config.min, config.max
                ),
            });
        }
        Ok(Self {
            rate: config.rate,
            min: config.min,
            max: config.max,
            method: config.method,
            intensity: if initial_intensity.is_finite() {
                initial_intensity
            } else {
                config.max
            },
            count: 0.0,
            noise_x: 0.0,
            noise_y: 0.0,
            perlin: Perlin::new(perlin_seed(seed)),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Replace the intensity bounds. Used by fire dimming.
    ///
    /// Non-finite bounds are ignored; inverted bounds are swapped.
    pub fn set_bounds(&mut self, min: f32, max: f32) {
        if !min.is_finite() || !max.is_finite() {
            return;
        }
        if min <= max {
            self.min = min;
            self.max = max;
        } else {
            self.min = max;
            self.max = min;
        }
    }

    /// Advance the flicker by `dt` seconds and return the light intensity.
    pub fn step(&mut self, dt: f32) -> f32 {
        match self.method {
            FlickerMethod::Random => self.step_random(dt),
            FlickerMethod::Noise => self.step_noise(),
        }
        self.intensity
    }

    fn step_random(&mut self, dt: f32) {
        self.count += dt.max(0.0);
        let interval = 1.0 - self.rate;
        if self.count < interval {
            return;
        }
        let nudged = match self.rng.random_range(1..=7_u8) {
            1 => self.intensity / 1.1,
            2 => self.intensity * 1.1,
            4 => self.intensity + 0.1,
            5 => self.intensity - 0.1,
            6 => self.intensity + 0.01,
            7 => self.intensity - 0.01,
            _ => self.intensity,
        };
        self.intensity = nudged.clamp(self.min, self.max);
        self.count -= interval;
    }

    fn step_noise(&mut self) {
        // Drift is -1 or 0 per axis, so the walk wanders one way over time.
        let dx = f32::from(self.rng.random_range(-1_i8..1));
        let dy = f32::from(self.rng.random_range(-1_i8..1));
        self.noise_x += dx / 10.0 * self.rate;
        self.noise_y += dy / 10.0 * self.rate;
        self.intensity = lerp(self.min, self.max, self.sample());
    }

    /// Perlin sample at the current point, remapped from `[-1, 1]` to `[0, 1]`.
    #[allow(clippy::cast_possible_truncation)]
    fn sample(&self) -> f32 {
        let raw = self
            .perlin
            .get([f64::from(self.noise_x), f64::from(self.noise_y)]);
        // Clamped to [0, 1], so narrowing only drops precision.
        ((raw + 1.0) / 2.0).clamp(0.0, 1.0) as f32
    }

    /// Last intensity produced.
    pub const fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Current `(min, max)` bounds.
    pub const fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Flicker method in use.
    pub const fn method(&self) -> FlickerMethod {
        self.method
    }
}

/// Fold a 64-bit fire seed into the 32-bit seed Perlin noise takes.
const fn perlin_seed(seed: u64) -> u32 {
    let [a, b, c, d, e, f, g, h] = seed.to_le_bytes();
    u32::from_le_bytes([a, b, c, d]) ^ u32::from_le_bytes([e, f, g, h])
}
