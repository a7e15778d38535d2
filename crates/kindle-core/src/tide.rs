//! Tide height as a triangular wave over the hour of day.
//!
//! High tide falls on `high_tide_hour` and repeats every
//! `24 / cycles_per_day` hours. Between high tides the water drops linearly
//! to `min_height` at the half-cycle point and climbs back again.

use kindle_math::lerp;
use kindle_types::TideDirection;
use serde::Serialize;

use crate::clock::{CycleClock, HOURS_PER_DAY};
use crate::config::TideConfig;

/// Errors that can occur when configuring tides.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TideError {
    /// Invalid tide configuration (e.g. zero cycles per day).
    #[error("invalid tide configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },

    /// Tides are enabled but no water surface was named.
    #[error("tides are enabled but no water_plane is configured")]
    MissingWaterPlane,
}

/// Water height and which way it is moving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TideState {
    /// Current water height, in `[min_height, max_height]`.
    pub height: f32,
    /// Whether the water is rising or falling.
    pub direction: TideDirection,
}

impl core::fmt::Display for TideState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Tide is {}. Current height is {}", self.direction, self.height)
    }
}

/// Compute the tide at `hour`.
///
/// # Errors
///
/// Returns [`TideError::InvalidConfig`] if `cycles_per_day` is not positive
/// or any input is not finite.
pub fn tide_height(
    hour: f32,
    min_height: f32,
    max_height: f32,
    high_tide_hour: f32,
    cycles_per_day: f32,
) -> Result<TideState, TideError> {
    check_tide_params(min_height, max_height, high_tide_hour, cycles_per_day)?;
    if !hour.is_finite() {
        return Err(TideError::InvalidConfig {
            reason: format!("hour must be finite, got {hour}"),
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    let day = HOURS_PER_DAY as f32;
    let cycle = day / cycles_per_day;
    let half = cycle / 2.0;
    let position = (hour - high_tide_hour).abs().rem_euclid(day).rem_euclid(cycle);
    let phase = (position - half) / half;

    Ok(TideState {
        height: lerp(min_height, max_height, phase.abs()),
        direction: if phase >= 0.0 {
            TideDirection::Rising
        } else {
            TideDirection::Falling
        },
    })
}

fn check_tide_params(
    min_height: f32,
    max_height: f32,
    high_tide_hour: f32,
    cycles_per_day: f32,
) -> Result<(), TideError> {
    if !cycles_per_day.is_finite() || cycles_per_day <= 0.0 {
        return Err(TideError::InvalidConfig {
            reason: format!("cycles_per_day must be positive, got {cycles_per_day}"),
        });
    }
    if !min_height.is_finite() || !max_height.is_finite() {
        return Err(TideError::InvalidConfig {
            reason: format!("tide heights must be finite, got {min_height} and {max_height}"),
        });
    }
    if !high_tide_hour.is_finite() {
        return Err(TideError::InvalidConfig {
            reason: format!("high_tide_hour must be finite, got {high_tide_hour}"),
        });
    }
    Ok(())
}

/// A validated tide bound to a water surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Tide {
    water_plane: String,
    min_height: f32,
    max_height: f32,
    high_tide_hour: f32,
    cycles_per_day: f32,
}

impl Tide {
    /// Validate a tide configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TideError::MissingWaterPlane`] if no water surface is named,
    /// or [`TideError::InvalidConfig`] for out-of-range parameters.
    pub fn new(config: &TideConfig) -> Result<Self, TideError> {
        let water_plane = config
            .water_plane
            .clone()
            .filter(|h| !h.trim().is_empty())
            .ok_or(TideError::MissingWaterPlane)?;
        check_tide_params(
            config.min_height,
            config.max_height,
            config.high_tide_hour,
            config.cycles_per_day,
        )?;
        Ok(Self {
            water_plane,
            min_height: config.min_height,
            max_height: config.max_height,
            high_tide_hour: config.high_tide_hour,
            cycles_per_day: config.cycles_per_day,
        })
    }

    /// Tide at the clock's current hour.
    ///
    /// # Errors
    ///
    /// Propagates [`tide_height`] errors. Parameters are validated up front,
    /// so this only fails on a non-finite hour.
    pub fn state_at(&self, clock: &CycleClock) -> Result<TideState, TideError> {
        tide_height(
            clock.hour_of_day(),
            self.min_height,
            self.max_height,
            self.high_tide_hour,
            self.cycles_per_day,
        )
    }

    /// Handle of the water surface.
    pub fn water_plane(&self) -> &str {
        &self.water_plane
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn default_tide(hour: f32) -> TideState {
        tide_height(hour, 0.9, 1.1, 8.0, 2.0).unwrap()
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1.0e-5
    }

    #[test]
    fn high_tide_at_configured_hour() {
        let state = default_tide(8.0);
        assert!(close(state.height, 1.1));
        assert_eq!(state.direction, TideDirection::Falling);
    }

    #[test]
    fn low_tide_half_a_cycle_later() {
        let state = default_tide(14.0);
        assert!(close(state.height, 0.9));
        assert_eq!(state.direction, TideDirection::Rising);
    }

    #[test]
    fn second_cycle_repeats_the_first() {
        assert!(close(default_tide(20.0).height, 1.1));
        assert!(close(default_tide(11.0).height, default_tide(23.0).height));
    }

    #[test]
    fn height_stays_in_bounds() {
        for step in 0..240_u16 {
            let hour = f32::from(step) / 10.0;
            let state = default_tide(hour);
            assert!(
                (0.9 - 1.0e-5..=1.1 + 1.0e-5).contains(&state.height),
                "hour {hour} gave {}",
                state.height
            );
        }
    }

    #[test]
    fn fractional_cycles_are_supported() {
        // 24 / 5 = 4.8 hours per cycle, not truncated to 4.
        let state = tide_height(8.0 + 2.4, 0.0, 1.0, 8.0, 5.0).unwrap();
        assert!(close(state.height, 0.0));
    }

    #[test]
    fn non_positive_cycles_are_an_error() {
        for cycles in [0.0, -2.0, f32::NAN] {
            let result = tide_height(3.0, 0.9, 1.1, 8.0, cycles);
            assert!(matches!(result, Err(TideError::InvalidConfig { .. })));
        }
    }

    #[test]
    fn display_reads_like_a_report() {
        let state = TideState {
            height: 1.0,
            direction: TideDirection::Rising,
        };
        assert_eq!(state.to_string(), "Tide is rising. Current height is 1");
    }

    #[test]
    fn tide_requires_a_water_plane() {
        let config = TideConfig {
            enabled: true,
            ..TideConfig::default()
        };
        assert_eq!(Tide::new(&config), Err(TideError::MissingWaterPlane));
    }

    #[test]
    fn tide_follows_the_clock() {
        let config = TideConfig {
            enabled: true,
            water_plane: Some("bay/water".to_owned()),
            ..TideConfig::default()
        };
        let tide = Tide::new(&config).unwrap();
        let clock = CycleClock::from_parts(24.0, 14.0).unwrap();
        assert!(close(tide.state_at(&clock).unwrap().height, 0.9));
        assert_eq!(tide.water_plane(), "bay/water");
    }
}
