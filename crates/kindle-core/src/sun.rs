//! Sun orientation driven by the day length.
//!
//! The sun turns a full 360 degrees per simulated day. The turn is split
//! across pitch and yaw by a configurable offset so the sun sweeps a tilted
//! arc rather than a flat circle.

use serde::Serialize;

use crate::clock::CycleClock;
use crate::config::SunConfig;

/// Lowest accepted pitch share.
pub const MIN_SUN_OFFSET: f64 = 0.1;

/// Highest accepted pitch share.
pub const MAX_SUN_OFFSET: f64 = 0.9;

/// Degrees the sun is behind the horizon at hour 0.
const MIDNIGHT_ANGLE: f64 = 270.0;

/// Degrees per simulated hour.
const DEGREES_PER_HOUR: f64 = 15.0;

/// Errors that can occur when configuring the sun.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SunError {
    /// The pitch share is outside `[0.1, 0.9]`.
    #[error("invalid sun configuration: {reason}")]
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

/// Euler angles of the sun, in degrees within `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SunAngles {
    /// Rotation about the horizontal axis.
    pub pitch: f64,
    /// Rotation about the vertical axis.
    pub yaw: f64,
}

/// Rotates the sun at a rate derived from the day length.
#[derive(Debug, Clone, PartialEq)]
pub struct SunRig {
    pitch_rate: f64,
    yaw_rate: f64,
    angles: SunAngles,
}

impl SunRig {
    /// Build the rig and set its starting angle from the clock's hour.
    ///
    /// # Errors
    ///
    /// Returns [`SunError::InvalidConfig`] if the offset is outside
    /// `[0.1, 0.9]`.
    pub fn new(config: &SunConfig, clock: &CycleClock) -> Result<Self, SunError> {
        let offset = config.offset;
        if !(MIN_SUN_OFFSET..=MAX_SUN_OFFSET).contains(&offset) {
            return Err(SunError::InvalidConfig {
                reason: format!("offset must be in [0.1, 0.9], got {offset}"),
            });
        }

        let rate = clock.degrees_per_second();
        let start = f64::from(clock.hour_of_day())
            .mul_add(DEGREES_PER_HOUR, MIDNIGHT_ANGLE)
            .rem_euclid(360.0);

        Ok(Self {
            pitch_rate: rate * offset,
            yaw_rate: rate * (1.0 - offset),
            angles: SunAngles {
                pitch: start * offset,
                yaw: start * (1.0 - offset),
            },
        })
    }

    /// Turn the sun by `dt` seconds and return its new angles.
    ///
    /// # Errors
    ///
    /// Returns [`SunError::InvalidArgument`] if `dt` is negative or not
    /// finite; the sun does not move.
    pub fn rotate(&mut self, dt: f32) -> Result<SunAngles, SunError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(SunError::InvalidArgument {
                reason: format!("dt must be a non-negative number of seconds, got {dt}"),
            });
        }
        let dt = f64::from(dt);
        self.angles.pitch = self.pitch_rate.mul_add(dt, self.angles.pitch).rem_euclid(360.0);
        self.angles.yaw = self.yaw_rate.mul_add(dt, self.angles.yaw).rem_euclid(360.0);
        Ok(self.angles)
    }

    /// Current Euler angles.
    pub const fn euler_degrees(&self) -> SunAngles {
        self.angles
    }

    /// Degrees per second on `(pitch, yaw)`.
    pub const fn axis_rates(&self) -> (f64, f64) {
        (self.pitch_rate, self.yaw_rate)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1.0e-6
    }

    #[test]
    fn rates_split_by_offset() {
        let clock = CycleClock::from_parts(360.0, 0.0).unwrap();
        let rig = SunRig::new(&SunConfig { offset: 0.75 }, &clock).unwrap();
        let (pitch, yaw) = rig.axis_rates();
        assert!(close(pitch, 0.75));
        assert!(close(yaw, 0.25));
    }

    #[test]
    fn noon_start_angle() {
        // (12 * 15 + 270) % 360 = 90
        let clock = CycleClock::from_parts(24.0, 12.0).unwrap();
        let rig = SunRig::new(&SunConfig { offset: 0.5 }, &clock).unwrap();
        let angles = rig.euler_degrees();
        assert!(close(angles.pitch, 45.0));
        assert!(close(angles.yaw, 45.0));
    }

    #[test]
    fn rotation_wraps() {
        let clock = CycleClock::from_parts(360.0, 0.0).unwrap();
        let mut rig = SunRig::new(&SunConfig { offset: 0.9 }, &clock).unwrap();
        for _ in 0..10 {
            let angles = rig.rotate(100.0).unwrap();
            assert!((0.0..360.0).contains(&angles.pitch));
            assert!((0.0..360.0).contains(&angles.yaw));
        }
    }

    #[test]
    fn full_day_turns_each_axis_by_its_share() {
        let clock = CycleClock::from_parts(100.0, 0.0).unwrap();
        let mut rig = SunRig::new(&SunConfig { offset: 0.5 }, &clock).unwrap();
        // Midnight: 270 degrees split evenly.
        assert!(close(rig.euler_degrees().pitch, 135.0));
        for _ in 0..4 {
            rig.rotate(25.0).unwrap();
        }
        let end = rig.euler_degrees();
        assert!(close(end.pitch, 315.0));
        assert!(close(end.yaw, 315.0));
    }

    #[test]
    fn backwards_step_does_not_move_the_sun() {
        let clock = CycleClock::from_parts(100.0, 30.0).unwrap();
        let mut rig = SunRig::new(&SunConfig { offset: 0.5 }, &clock).unwrap();
        let before = rig.euler_degrees();
        assert!(matches!(
            rig.rotate(-5.0),
            Err(SunError::InvalidArgument { .. })
        ));
        assert!(rig.rotate(f32::NAN).is_err());
        assert_eq!(rig.euler_degrees(), before);
    }

    #[test]
    fn offset_out_of_range_is_rejected() {
        let clock = CycleClock::from_parts(100.0, 0.0).unwrap();
        for offset in [0.0, 0.95, f64::NAN] {
            assert!(SunRig::new(&SunConfig { offset }, &clock).is_err());
        }
    }
}
