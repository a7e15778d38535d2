//! Enumeration types for the Kindle simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Ambient light
// ---------------------------------------------------------------------------

/// A named lighting mood tied to a band of hours in the day.
///
/// Each band fades in from the band before it: Sunrise from Night, Day from
/// Sunrise, Sunset from Day, and Night from Sunset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AmbientBand {
    /// Early morning, hours 6 to 10.
    Sunrise,
    /// Full daylight, hours 10 to 17.
    Day,
    /// Evening, hours 17 to 20.
    Sunset,
    /// After hour 20.
    Night,
}

impl AmbientBand {
    /// All bands in the order they occur through the day.
    pub const ALL: [Self; 4] = [Self::Sunrise, Self::Day, Self::Sunset, Self::Night];

    /// The band this one fades in from.
    pub const fn previous(self) -> Self {
        match self {
            Self::Sunrise => Self::Night,
            Self::Day => Self::Sunrise,
            Self::Sunset => Self::Day,
            Self::Night => Self::Sunset,
        }
    }

    /// Human-readable band name used in debug output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunrise => "Sunrise",
            Self::Day => "Day",
            Self::Sunset => "Sunset",
            Self::Night => "Night",
        }
    }
}

impl core::fmt::Display for AmbientBand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Fire lights
// ---------------------------------------------------------------------------

/// How a flickering light picks its next intensity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlickerMethod {
    /// Discrete random steps at a fixed cadence.
    #[default]
    Random,
    /// Smooth wandering through a 2D value-noise field.
    Noise,
}

// ---------------------------------------------------------------------------
// Tides
// ---------------------------------------------------------------------------

/// Whether the water surface is currently moving up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TideDirection {
    /// Water is rising towards high tide.
    Rising,
    /// Water is falling towards low tide.
    Falling,
}

impl core::fmt::Display for TideDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rising => f.write_str("rising"),
            Self::Falling => f.write_str("falling"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_chain_back_around_the_day() {
        assert_eq!(AmbientBand::Sunrise.previous(), AmbientBand::Night);
        assert_eq!(AmbientBand::Day.previous(), AmbientBand::Sunrise);
        assert_eq!(AmbientBand::Sunset.previous(), AmbientBand::Day);
        assert_eq!(AmbientBand::Night.previous(), AmbientBand::Sunset);
    }

    #[test]
    fn flicker_method_uses_snake_case() {
        let json = serde_json::to_string(&FlickerMethod::Noise).unwrap_or_default();
        assert_eq!(json, "\"noise\"");
        let parsed: Result<FlickerMethod, _> = serde_json::from_str("\"random\"");
        assert!(matches!(parsed, Ok(FlickerMethod::Random)));
    }
}
