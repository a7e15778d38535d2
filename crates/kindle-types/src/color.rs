//! Linear RGB colour used for ambient light.

use serde::{Deserialize, Serialize};

/// Tolerance used when checking whether two colours are the same.
const COLOR_EPSILON: f32 = 1.0e-5;

/// A linear RGB colour with channels nominally in `[0, 1]`.
///
/// Alpha is not modelled; ambient light is opaque.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Color {
    /// Pure black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Pure white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Pure blue.
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// The engine's stock yellow (`1, 0.92, 0.016`).
    pub const YELLOW: Self = Self::rgb(1.0, 0.92, 0.016);

    /// Build a colour from its three channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Linearly interpolate towards `to`. `t` is clamped to `[0, 1]`.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: (to.r - self.r).mul_add(t, self.r),
            g: (to.g - self.g).mul_add(t, self.g),
            b: (to.b - self.b).mul_add(t, self.b),
        }
    }

    /// Whether every channel is within a small tolerance of `other`.
    pub fn approx_eq(self, other: Self) -> bool {
        (self.r - other.r).abs() <= COLOR_EPSILON
            && (self.g - other.g).abs() <= COLOR_EPSILON
            && (self.b - other.b).abs() <= COLOR_EPSILON
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "RGB({:.3}, {:.3}, {:.3})", self.r, self.g, self.b)
    }
}
