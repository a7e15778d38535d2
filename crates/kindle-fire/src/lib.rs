//! Combustion state, fire visuals, and light flicker for the Kindle simulation.
//!
//! A fire is a fuel reservoir that burns down while lit, plus the lights
//! and particle emitters that dim with it. Nothing here touches a renderer:
//! the dimmed values and ignite/extinguish edges are handed to a
//! [`FireEffects`] collaborator supplied by the host.
//!
//! # Modules
//!
//! - [`combustible`] -- [`Combustible`] entity, contacts, and the
//!   [`FireEffects`] collaborator trait.
//! - [`config`] -- Designer-set fire, light, emitter, and flicker parameters.
//! - [`error`] -- Error types for fire setup and stepping.
//! - [`flicker`] -- Random and noise-driven light intensity flicker.
//! - [`fuel`] -- [`FuelState`]: burn time, ignition, and depletion.
//! - [`visuals`] -- Light and emitter descriptors and linear dimming.

pub mod combustible;
pub mod config;
pub mod error;
pub mod flicker;
pub mod fuel;
pub mod visuals;

// Re-export primary types at crate root.
pub use combustible::{
    Combustible, Contact, ContactOutcome, FireEffects, FireEvent, NullEffects, WATER_TAG,
};
pub use config::{EmitterConfig, FireConfig, FlickerConfig, LightConfig};
pub use error::FireError;
pub use flicker::Flicker;
pub use fuel::{FuelState, INFINITE_BURN};
pub use visuals::{FireEmitter, FireLight, FireVisuals, PARTICLE_RATE_FLOOR};
