//! Fuel reservoir for a single fire.
//!
//! A [`FuelState`] counts down burn time while lit. It never terminates
//! itself: the owner watches [`FuelState::is_depleted`] and runs the
//! extinguish path, so notifying collaborators stays outside this type.
//!
//! Capacity semantics:
//!
//! - any capacity below 1 second burns forever, except
//! - a capacity of exactly 0, which is finite and depleted on ignition.

use crate::error::{FireError, check_seconds};

/// Capacity sentinel for a fire that never runs out.
pub const INFINITE_BURN: f32 = -1.0;

/// Fuel reservoir measured in seconds of burn time.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelState {
    /// Maximum burn duration in seconds.
    burn_capacity_seconds: f32,

    /// Seconds of burn time left. Meaningless while infinite.
    remaining_fuel_seconds: f32,

    /// Whether the fire is burning.
    is_lit: bool,

    /// Whether the fire burns forever. Refreshed on every ignition.
    is_infinite: bool,
}

impl FuelState {
    /// Create an unlit reservoir with the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::InvalidConfiguration`] if the capacity is below
    /// [`INFINITE_BURN`] or not finite.
    pub fn new(burn_capacity_seconds: f32) -> Result<Self, FireError> {
        if !burn_capacity_seconds.is_finite() || burn_capacity_seconds < INFINITE_BURN {
            return Err(FireError::InvalidConfiguration {
                reason: format!(
                    "burn capacity must be at least {INFINITE_BURN} seconds, got {burn_capacity_seconds}"
                ),
            });
        }
        Ok(Self {
            burn_capacity_seconds,
            remaining_fuel_seconds: 0.0,
            is_lit: false,
            is_infinite: capacity_is_infinite(burn_capacity_seconds),
        })
    }

    /// Light the fire and refill it to full capacity.
    pub fn ignite(&mut self) {
        self.is_infinite = capacity_is_infinite(self.burn_capacity_seconds);
        self.remaining_fuel_seconds = self.burn_capacity_seconds.max(0.0);
        self.is_lit = true;
    }

    /// Burn `dt` seconds of fuel. No effect while unlit or infinite.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::InvalidArgument`] for a negative `dt`; fuel is
    /// left unchanged.
    pub fn consume(&mut self, dt: f32) -> Result<(), FireError> {
        let dt = check_seconds(dt, "burn time step")?;
        if self.is_lit && !self.is_infinite {
            self.remaining_fuel_seconds = (self.remaining_fuel_seconds - dt).max(0.0);
        }
        Ok(())
    }

    /// Add `amount` seconds of fuel, capped at capacity. No effect while
    /// infinite.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::InvalidArgument`] for a negative `amount`.
    pub fn replenish(&mut self, amount: f32) -> Result<(), FireError> {
        let amount = check_seconds(amount, "fuel amount")?;
        if !self.is_infinite {
            self.remaining_fuel_seconds =
                (self.remaining_fuel_seconds + amount).min(self.burn_capacity_seconds);
        }
        Ok(())
    }

    /// Put the fire out. Remaining fuel is kept.
    pub const fn extinguish(&mut self) {
        self.is_lit = false;
    }

    /// Remaining fuel as a fraction of capacity, used to dim visuals.
    ///
    /// Infinite fires report `1.0`; a zero-capacity fire reports `0.0`.
    pub fn remaining_fraction(&self) -> f32 {
        if self.is_infinite {
            1.0
        } else if self.burn_capacity_seconds > 0.0 {
            (self.remaining_fuel_seconds / self.burn_capacity_seconds).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Lit, finite, and out of fuel. The owner should extinguish.
    pub fn is_depleted(&self) -> bool {
        self.is_lit && !self.is_infinite && self.remaining_fuel_seconds <= 0.0
    }

    /// Configured capacity in seconds.
    pub const fn burn_capacity_seconds(&self) -> f32 {
        self.burn_capacity_seconds
    }

    /// Seconds of fuel left.
    pub const fn remaining_fuel_seconds(&self) -> f32 {
        self.remaining_fuel_seconds
    }

    /// Whether the fire is burning.
    pub const fn is_lit(&self) -> bool {
        self.is_lit
    }

    /// Whether the fire burns forever.
    pub const fn is_infinite(&self) -> bool {
        self.is_infinite
    }
}

/// Capacities under one second burn forever; exactly zero does not.
fn capacity_is_infinite(capacity: f32) -> bool {
    capacity < 1.0 && capacity != 0.0
}
