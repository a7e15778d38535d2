//! Ambient light: hour bands, colour targets, and the fade between them.
//!
//! # Hour Bands
//!
//! Bands are checked from the latest threshold down, each with an open
//! lower bound:
//!
//! | Hour        | Band    | Fades from |
//! |-------------|---------|------------|
//! | `> 20`      | Night   | Sunset     |
//! | `(17, 20]`  | Sunset  | Day        |
//! | `(10, 17]`  | Day     | Sunrise    |
//! | `(6, 10]`   | Sunrise | Night      |
//! | `[0, 6]`    | none    | --         |
//!
//! Hours in `[0, 6]` match no band and keep whatever target was held
//! before. This gap is long-standing behaviour and is kept as is.
//!
//! # Transitions
//!
//! A target change starts an [`AmbientTransition`], a polled task that the
//! tick cycle advances once per step. Only one transition is in flight;
//! a new target cancels it and starts fresh from the colour currently on
//! screen, not from the band's nominal source colour.

use kindle_types::{AmbientBand, Color};
use tracing::debug;

use crate::clock::CycleClock;
use crate::config::AmbientConfig;

/// Errors that can occur when configuring ambient light.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmbientError {
    /// Invalid ambient configuration (e.g. non-positive fade speed).
    #[error("invalid ambient configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },

    /// A time step was negative or not a number.
    #[error("invalid time step: {reason}")]
    InvalidArgument {
        /// Explanation of what is wrong with the step.
        reason: String,
    },
}

fn check_step(dt: f32) -> Result<f64, AmbientError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(f64::from(dt))
    } else {
        Err(AmbientError::InvalidArgument {
            reason: format!("dt must be a non-negative number of seconds, got {dt}"),
        })
    }
}

/// Receives the ambient colour every tick.
pub trait AmbientSink: Send {
    /// Set the scene's ambient light.
    fn set_ambient(&mut self, color: Color);
}

/// An [`AmbientSink`] that discards every colour.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AmbientSink for NullSink {
    fn set_ambient(&mut self, _color: Color) {}
}

/// Select the ambient band for `hour`, or `None` inside the `[0, 6]` gap.
pub const fn ambient_band(hour: f32) -> Option<AmbientBand> {
    if hour > 20.0 {
        Some(AmbientBand::Night)
    } else if hour > 17.0 {
        Some(AmbientBand::Sunset)
    } else if hour > 10.0 {
        Some(AmbientBand::Day)
    } else if hour > 6.0 {
        Some(AmbientBand::Sunrise)
    } else {
        None
    }
}

/// Ambient colour for each band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientPalette {
    /// Full daylight.
    pub day: Color,
    /// Sunset.
    pub sunset: Color,
    /// Night.
    pub night: Color,
    /// Sunrise.
    pub sunrise: Color,
}

impl AmbientPalette {
    /// Colour shown during `band`.
    pub const fn color(&self, band: AmbientBand) -> Color {
        match band {
            AmbientBand::Sunrise => self.sunrise,
            AmbientBand::Day => self.day,
            AmbientBand::Sunset => self.sunset,
            AmbientBand::Night => self.night,
        }
    }

    /// The colour target for `band`.
    pub const fn target(&self, band: AmbientBand) -> AmbientTarget {
        AmbientTarget {
            band,
            from: self.color(band.previous()),
            to: self.color(band),
        }
    }
}

impl From<&AmbientConfig> for AmbientPalette {
    fn from(config: &AmbientConfig) -> Self {
        Self {
            day: config.day,
            sunset: config.sunset,
            night: config.night,
            sunrise: config.sunrise,
        }
    }
}

/// A band and the colour pair it fades between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientTarget {
    /// The band selected.
    pub band: AmbientBand,
    /// The previous band's colour.
    pub from: Color,
    /// This band's colour.
    pub to: Color,
}

/// Holds the current ambient target across hours that match no band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientSelector {
    palette: AmbientPalette,
    held: Option<AmbientTarget>,
}

impl AmbientSelector {
    /// Create a selector with no target yet.
    pub const fn new(palette: AmbientPalette) -> Self {
        Self { palette, held: None }
    }

    /// Update the held target for `hour` and return it.
    ///
    /// Hours in the `[0, 6]` gap return the previous target unchanged, or
    /// `None` if nothing has been selected yet.
    pub fn select(&mut self, hour: f32) -> Option<AmbientTarget> {
        if let Some(band) = ambient_band(hour) {
            self.held = Some(self.palette.target(band));
        }
        self.held
    }

    /// The target currently held.
    pub const fn held(&self) -> Option<AmbientTarget> {
        self.held
    }
}

/// A time-bounded fade from one colour to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientTransition {
    from: Color,
    to: Color,
    duration_seconds: f64,
    progress: f64,
    current: Color,
}

impl AmbientTransition {
    /// Start a fade from `from` to `to` over `duration_seconds`.
    ///
    /// A non-positive duration completes on the first poll.
    pub const fn new(from: Color, to: Color, duration_seconds: f64) -> Self {
        Self {
            from,
            to,
            duration_seconds,
            progress: 0.0,
            current: from,
        }
    }

    /// Advance by `dt` seconds and return the interpolated colour.
    ///
    /// # Errors
    ///
    /// Returns [`AmbientError::InvalidArgument`] if `dt` is negative or not
    /// finite; the fade is unchanged.
    #[allow(clippy::cast_possible_truncation)]
    pub fn poll(&mut self, dt: f32) -> Result<Color, AmbientError> {
        let dt = check_step(dt)?;
        if self.duration_seconds > 0.0 {
            self.progress = (self.progress + dt / self.duration_seconds).min(1.0);
        } else {
            self.progress = 1.0;
        }
        // Progress is in [0, 1]; narrowing only drops precision.
        self.current = self.from.lerp(self.to, self.progress as f32);
        Ok(self.current)
    }

    /// Whether the fade has reached its target.
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0 || self.current.approx_eq(self.to)
    }

    /// Fraction of the fade completed, in `[0, 1]`.
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Colour at the last poll.
    pub const fn current(&self) -> Color {
        self.current
    }

    /// Colour the fade ends on.
    pub const fn target(&self) -> Color {
        self.to
    }
}

/// Drives the scene's ambient colour from the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientController {
    selector: AmbientSelector,
    fade_seconds: f64,
    last_hour: u8,
    active: Option<AmbientTarget>,
    transition: Option<AmbientTransition>,
    color: Color,
    last_progress: f64,
}

impl AmbientController {
    /// Build a controller and snap the ambient colour to the current band.
    ///
    /// If the clock starts inside the `[0, 6]` gap there is no target yet
    /// and the ambient colour starts black.
    ///
    /// # Errors
    ///
    /// Returns [`AmbientError::InvalidConfig`] if the fade speed is not
    /// positive.
    pub fn new(config: &AmbientConfig, clock: &CycleClock) -> Result<Self, AmbientError> {
        if !config.fade_speed.is_finite() || config.fade_speed <= 0.0 {
            return Err(AmbientError::InvalidConfig {
                reason: format!("fade_speed must be positive, got {}", config.fade_speed),
            });
        }
        let mut selector = AmbientSelector::new(AmbientPalette::from(config));
        let hour = clock.whole_hour();
        let active = selector.select(f32::from(hour));
        Ok(Self {
            selector,
            fade_seconds: clock.day_length_seconds() / config.fade_speed,
            last_hour: hour,
            active,
            transition: None,
            color: active.map_or(Color::BLACK, |t| t.to),
            last_progress: 1.0,
        })
    }

    /// Advance the ambient light by `dt` seconds and return its colour.
    ///
    /// The target is re-selected only when the whole hour changes. A new
    /// target replaces any in-flight fade, starting from the current colour.
    ///
    /// # Errors
    ///
    /// Returns [`AmbientError::InvalidArgument`] if `dt` is negative or not
    /// finite; neither the target nor the fade changes.
    pub fn update(&mut self, clock: &CycleClock, dt: f32) -> Result<Color, AmbientError> {
        check_step(dt)?;
        let hour = clock.whole_hour();
        if hour != self.last_hour {
            self.last_hour = hour;
            let selected = self.selector.select(f32::from(hour));
            if selected != self.active {
                self.retarget(selected);
            }
        }

        if let Some(transition) = self.transition.as_mut() {
            self.color = transition.poll(dt)?;
            self.last_progress = transition.progress();
            if transition.is_complete() {
                self.transition = None;
            }
        }
        Ok(self.color)
    }

    fn retarget(&mut self, selected: Option<AmbientTarget>) {
        self.active = selected;
        let Some(target) = selected else {
            return;
        };
        if let Some(cancelled) = self.transition.take() {
            debug!(
                progress = cancelled.progress(),
                band = %target.band,
                "Ambient fade superseded"
            );
        }
        debug!(band = %target.band, from = %self.color, to = %target.to, "Ambient fade started");
        self.transition = Some(AmbientTransition::new(self.color, target.to, self.fade_seconds));
        self.last_progress = 0.0;
    }

    /// Colour currently applied.
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Band currently targeted, if any.
    pub fn band(&self) -> Option<AmbientBand> {
        self.active.map(|t| t.band)
    }

    /// Target currently held.
    pub const fn target(&self) -> Option<AmbientTarget> {
        self.active
    }

    /// The fade in flight, if any.
    pub const fn transition(&self) -> Option<&AmbientTransition> {
        self.transition.as_ref()
    }

    /// Seconds each fade lasts.
    pub const fn fade_seconds(&self) -> f64 {
        self.fade_seconds
    }
}

impl core::fmt::Display for AmbientController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = self.band().map_or("Not yet set", AmbientBand::name);
        write!(
            f,
            "Target color: {name} - Percent complete: {:.2}",
            self.last_progress
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn palette() -> AmbientPalette {
        AmbientPalette::from(&AmbientConfig::default())
    }

    #[test]
    fn bands_use_open_lower_bounds() {
        assert_eq!(ambient_band(21.0), Some(AmbientBand::Night));
        assert_eq!(ambient_band(20.0), Some(AmbientBand::Sunset));
        assert_eq!(ambient_band(17.5), Some(AmbientBand::Sunset));
        assert_eq!(ambient_band(17.0), Some(AmbientBand::Day));
        assert_eq!(ambient_band(10.0), Some(AmbientBand::Sunrise));
        assert_eq!(ambient_band(7.0), Some(AmbientBand::Sunrise));
        assert_eq!(ambient_band(6.0), None);
        assert_eq!(ambient_band(0.0), None);
    }

    #[test]
    fn night_target_fades_from_sunset() {
        let mut selector = AmbientSelector::new(palette());
        let target = selector.select(21.0).unwrap();
        assert_eq!(target.band, AmbientBand::Night);
        assert_eq!(target.from, palette().sunset);
        assert_eq!(target.to, palette().night);
    }

    #[test]
    fn early_hours_keep_previous_target() {
        // Known gap: hours 0 through 6 select nothing, so the held target
        // from the night before stays in place.
        let mut selector = AmbientSelector::new(palette());
        let night = selector.select(22.0);
        assert_eq!(selector.select(3.0), night);
        assert_eq!(selector.select(6.0), night);
    }

    #[test]
    fn gap_before_any_target_yields_nothing() {
        let mut selector = AmbientSelector::new(palette());
        assert!(selector.select(3.0).is_none());
    }

    #[test]
    fn transition_completes_and_clamps() {
        let mut fade = AmbientTransition::new(Color::BLACK, Color::WHITE, 2.0);
        assert!(fade.poll(1.0).unwrap().approx_eq(Color::rgb(0.5, 0.5, 0.5)));
        assert!(!fade.is_complete());
        assert!(fade.poll(5.0).unwrap().approx_eq(Color::WHITE));
        assert!(fade.is_complete());
        assert_eq!(fade.progress(), 1.0);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut fade = AmbientTransition::new(Color::BLACK, Color::BLUE, 0.0);
        assert!(fade.poll(0.0).unwrap().approx_eq(Color::BLUE));
        assert!(fade.is_complete());
    }

    #[test]
    fn bad_step_leaves_fade_untouched() {
        let mut fade = AmbientTransition::new(Color::BLACK, Color::WHITE, 2.0);
        fade.poll(1.0).unwrap();
        let before = fade;
        for dt in [-10.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                fade.poll(dt),
                Err(AmbientError::InvalidArgument { .. })
            ));
        }
        assert_eq!(fade, before);
        assert!((0.0..=1.0).contains(&fade.progress()));
    }

    fn clock_at(hour: f64) -> CycleClock {
        // One real second per simulated hour.
        CycleClock::from_parts(24.0, hour).unwrap()
    }

    #[test]
    fn controller_snaps_to_starting_band() {
        let clock = clock_at(12.0);
        let controller = AmbientController::new(&AmbientConfig::default(), &clock).unwrap();
        assert_eq!(controller.band(), Some(AmbientBand::Day));
        assert_eq!(controller.color(), Color::BLUE);
        assert!(controller.transition().is_none());
        assert!((controller.fade_seconds() - 1.6).abs() < 1.0e-9);
    }

    #[test]
    fn controller_starting_in_gap_is_black_and_unset() {
        let clock = clock_at(2.0);
        let controller = AmbientController::new(&AmbientConfig::default(), &clock).unwrap();
        assert!(controller.band().is_none());
        assert_eq!(controller.color(), Color::BLACK);
        assert_eq!(
            controller.to_string(),
            "Target color: Not yet set - Percent complete: 1.00"
        );
    }

    #[test]
    fn crossing_a_band_starts_a_fade() {
        let mut clock = clock_at(17.5);
        let mut controller = AmbientController::new(&AmbientConfig::default(), &clock).unwrap();
        assert_eq!(controller.band(), Some(AmbientBand::Day));

        clock.advance(0.6).unwrap(); // 18.1 -> Sunset
        controller.update(&clock, 0.6).unwrap();
        assert_eq!(controller.band(), Some(AmbientBand::Sunset));
        assert!(controller.transition().is_some());

        // Fade lasts 1.6 seconds; keep polling until it lands.
        for _ in 0..4 {
            clock.advance(0.5).unwrap();
            controller.update(&clock, 0.5).unwrap();
        }
        assert!(controller.transition().is_none());
        assert!(controller.color().approx_eq(Color::YELLOW));
    }

    #[test]
    fn new_target_restarts_from_current_colour() {
        let config = AmbientConfig {
            fade_speed: 1.0, // a fade lasts a whole day
            ..AmbientConfig::default()
        };
        let mut clock = clock_at(20.5);
        let mut controller = AmbientController::new(&config, &clock).unwrap();
        assert_eq!(controller.color(), config.sunset);

        clock.advance(0.6).unwrap(); // 21.1 -> Night
        let mid = controller.update(&clock, 6.0).unwrap();
        assert!(!mid.approx_eq(config.sunset));
        assert!(!mid.approx_eq(config.night));

        // Jump forward to the next band mid-fade.
        let mut later = CycleClock::from_parts(24.0, 24.0 + 7.2).unwrap();
        controller.update(&later, 0.0).unwrap();
        assert_eq!(controller.band(), Some(AmbientBand::Sunrise));
        let restarted = controller.transition().unwrap();
        assert_eq!(restarted.current(), mid);
        assert_eq!(restarted.target(), config.sunrise);

        later.advance(0.1).unwrap();
        controller.update(&later, 0.1).unwrap();
        assert!(controller.transition().is_some());
    }

    #[test]
    fn bad_step_leaves_controller_untouched() {
        let mut clock = clock_at(17.5);
        let mut controller = AmbientController::new(&AmbientConfig::default(), &clock).unwrap();
        clock.advance(0.6).unwrap(); // 18.1 -> Sunset
        controller.update(&clock, 0.6).unwrap();
        assert!(controller.transition().is_some());

        let before = controller.clone();
        let result = controller.update(&clock_at(22.0), -100.0);
        assert!(matches!(result, Err(AmbientError::InvalidArgument { .. })));
        assert_eq!(controller, before);
        assert_eq!(controller.band(), Some(AmbientBand::Sunset));
    }

    #[test]
    fn bad_fade_speed_is_rejected() {
        let config = AmbientConfig {
            fade_speed: 0.0,
            ..AmbientConfig::default()
        };
        assert!(AmbientController::new(&config, &clock_at(12.0)).is_err());
    }
}
