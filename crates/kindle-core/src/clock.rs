//! Day/night clock for the Kindle simulation.
//!
//! The clock is the single source of truth for time of day. It only ever
//! accumulates elapsed seconds; hour, minute, and day number are derived
//! from that counter and the configured day length, never stored.
//!
//! # Design Principles
//!
//! - Accumulated time is monotonic and never wraps internally. Wrapping into
//!   a day happens only in the derived getters.
//! - The clock is owned by the simulation state and lent to consumers by
//!   reference. There is no global instance.
//! - A rejected step leaves the clock exactly as it was.

use crate::config::TimeConfig;

/// Hours in one simulated day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Minutes in one simulated hour.
const MINUTES_PER_HOUR: f64 = 60.0;

/// Largest `f32` below 24.0.
const LAST_HOUR_OF_DAY: f32 = f32::from_bits(0x41BF_FFFF);

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Invalid time configuration (e.g. zero-length day).
    #[error("invalid time configuration: {reason}")]
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

/// Simulation clock tracking elapsed time and deriving the time of day.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleClock {
    /// Real seconds in one simulated day.
    day_length_seconds: f64,

    /// Seconds elapsed since hour 0 of day 1, including the start offset.
    accumulated_seconds: f64,
}

impl CycleClock {
    /// Create a clock from a time configuration.
    ///
    /// The configured start hour is converted into an equivalent amount of
    /// accumulated time, so a clock starting at hour 12 reads 12 immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the day length is not
    /// positive or the start hour is outside `[0, 24]`.
    pub fn new(config: &TimeConfig) -> Result<Self, ClockError> {
        validate_day_length(config.day_length_seconds)?;
        let start_hour = f64::from(config.start_hour);
        if !(0.0..=HOURS_PER_DAY).contains(&start_hour) {
            return Err(ClockError::InvalidConfig {
                reason: format!("start_hour must be in [0, 24], got {start_hour}"),
            });
        }
        Ok(Self {
            day_length_seconds: config.day_length_seconds,
            accumulated_seconds: start_hour / HOURS_PER_DAY * config.day_length_seconds,
        })
    }

    /// Create a clock from explicit parameters (useful for testing and
    /// state restoration).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the day length is not
    /// positive or `accumulated_seconds` is negative.
    pub fn from_parts(day_length_seconds: f64, accumulated_seconds: f64) -> Result<Self, ClockError> {
        validate_day_length(day_length_seconds)?;
        if !accumulated_seconds.is_finite() || accumulated_seconds < 0.0 {
            return Err(ClockError::InvalidConfig {
                reason: format!("accumulated_seconds must be non-negative, got {accumulated_seconds}"),
            });
        }
        Ok(Self {
            day_length_seconds,
            accumulated_seconds,
        })
    }

    /// Advance the clock by `dt` seconds. Returns the new accumulated time.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidArgument`] if `dt` is negative or not
    /// finite; the clock is unchanged.
    pub fn advance(&mut self, dt: f32) -> Result<f64, ClockError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(ClockError::InvalidArgument {
                reason: format!("dt must be a non-negative number of seconds, got {dt}"),
            });
        }
        self.accumulated_seconds += f64::from(dt);
        Ok(self.accumulated_seconds)
    }

    /// Total seconds accumulated, including the start offset.
    pub const fn accumulated_seconds(&self) -> f64 {
        self.accumulated_seconds
    }

    /// Real seconds in one simulated day.
    pub const fn day_length_seconds(&self) -> f64 {
        self.day_length_seconds
    }

    /// Seconds elapsed within the current day.
    pub fn seconds_into_day(&self) -> f64 {
        self.accumulated_seconds.rem_euclid(self.day_length_seconds)
    }

    /// Fraction of the current day elapsed, in `[0, 1)`.
    pub fn day_fraction(&self) -> f64 {
        let fraction = self.seconds_into_day() / self.day_length_seconds;
        if fraction < 1.0 { fraction } else { 0.0 }
    }

    /// Hour of the day in `[0, 24)`.
    ///
    /// The hour only returns to 0 when [`Self::day_number`] rolls over. A
    /// time just short of midnight that rounds up to 24 in `f32` reads as
    /// the last representable hour of the same day.
    #[allow(clippy::cast_possible_truncation)]
    pub fn hour_of_day(&self) -> f32 {
        // The value is below 24, so narrowing only drops precision.
        let hour = (self.day_fraction() * HOURS_PER_DAY) as f32;
        hour.min(LAST_HOUR_OF_DAY)
    }

    /// Whole hour of the day, `0..=23`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn whole_hour(&self) -> u8 {
        // Floor of a value in [0, 24) always fits a u8.
        self.hour_of_day().floor() as u8
    }

    /// Whole minute within the current hour, `0..=59`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn minute_of_hour(&self) -> u8 {
        // Nudge past float noise so 9:30 does not read as 9:29.
        let minutes_per_day = HOURS_PER_DAY * MINUTES_PER_HOUR;
        let minutes_into_day = self
            .day_fraction()
            .mul_add(minutes_per_day, 1.0e-6)
            .floor()
            .min(minutes_per_day - 1.0);
        (minutes_into_day.rem_euclid(MINUTES_PER_HOUR) as u8).min(59)
    }

    /// Day number, starting at 1.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn day_number(&self) -> u64 {
        // Accumulated time is non-negative, so the floor is too.
        let completed = (self.accumulated_seconds / self.day_length_seconds).floor() as u64;
        completed.saturating_add(1)
    }

    /// Degrees the sun turns per real second.
    pub fn degrees_per_second(&self) -> f64 {
        360.0 / self.day_length_seconds
    }
}

impl core::fmt::Display for CycleClock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Day:{} - Time is {}:{:02} - Seconds into day: {:.1}",
            self.day_number(),
            self.whole_hour(),
            self.minute_of_hour(),
            self.seconds_into_day()
        )
    }
}

fn validate_day_length(day_length_seconds: f64) -> Result<(), ClockError> {
    if day_length_seconds.is_finite() && day_length_seconds > 0.0 {
        Ok(())
    } else {
        Err(ClockError::InvalidConfig {
            reason: format!("day_length_seconds must be positive, got {day_length_seconds}"),
        })
    }
}
