//! Shared value types for the Kindle environment simulation.
//!
//! Every crate in the workspace speaks in these types: colours for the
//! ambient light, the named ambient bands of the day, flicker methods for
//! fire lights, tide direction, and strongly-typed entity identifiers.
//!
//! # Modules
//!
//! - [`color`] -- Linear RGB colour with interpolation
//! - [`enums`] -- Enumeration types (ambient bands, flicker methods, tide direction)
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers

pub mod color;
pub mod enums;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use color::Color;
pub use enums::{AmbientBand, FlickerMethod, TideDirection};
pub use ids::FireId;
