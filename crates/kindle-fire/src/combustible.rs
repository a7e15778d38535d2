//! A burning entity: fuel, visuals, and the collaborator that renders them.
//!
//! [`Combustible`] is what the host engine attaches to a scene object. Once
//! per frame the host calls [`Combustible::update`]; when the object touches
//! something the host calls [`Combustible::on_contact`]. Edge events and the
//! dimmed light/particle values are pushed to a [`FireEffects`]
//! implementation so rendering and audio stay outside this crate.

use kindle_types::FireId;
use tracing::{debug, info};

use crate::config::FireConfig;
use crate::error::{FireError, check_seconds};
use crate::fuel::FuelState;
use crate::visuals::FireVisuals;

/// Name or tag that marks an object as water.
pub const WATER_TAG: &str = "Water";

/// Receives a fire's visual and audio state.
///
/// Implementations switch lights, start and stop particle systems, and
/// play or stop the looped burning sound.
pub trait FireEffects: Send {
    /// The fire was lit: lights on, particles playing, audio loop started.
    fn on_ignite(&mut self, fire: FireId, visuals: &FireVisuals);

    /// The fire went out: lights off, particles stopped, audio stopped.
    fn on_extinguish(&mut self, fire: FireId, visuals: &FireVisuals);

    /// Dimmed light and particle values for this frame.
    fn apply_dim(&mut self, fire: FireId, visuals: &FireVisuals);
}

/// A [`FireEffects`] that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEffects;

impl FireEffects for NullEffects {
    fn on_ignite(&mut self, _fire: FireId, _visuals: &FireVisuals) {}
    fn on_extinguish(&mut self, _fire: FireId, _visuals: &FireVisuals) {}
    fn apply_dim(&mut self, _fire: FireId, _visuals: &FireVisuals) {}
}

/// Something a fire touched, as reported by the host's trigger system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact<'a> {
    /// Scene name of the other object.
    pub name: &'a str,
    /// Scene tag of the other object.
    pub tag: &'a str,
    /// `Some(lit)` if the other object is itself combustible.
    pub combustible: Option<bool>,
}

impl<'a> Contact<'a> {
    /// Contact with another combustible object.
    pub const fn fire(lit: bool) -> Self {
        Self {
            name: "",
            tag: "",
            combustible: Some(lit),
        }
    }

    /// Contact with a water object.
    pub const fn water() -> Self {
        Self {
            name: WATER_TAG,
            tag: WATER_TAG,
            combustible: None,
        }
    }

    /// Contact with an arbitrary scene object.
    pub const fn object(name: &'a str, tag: &'a str) -> Self {
        Self {
            name,
            tag,
            combustible: None,
        }
    }

    /// Whether the other object counts as water.
    pub fn is_water(&self) -> bool {
        self.name == WATER_TAG || self.tag == WATER_TAG
    }
}

/// What a contact did to the fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactOutcome {
    /// The contact lit this fire.
    pub ignited: bool,
    /// The contact put this fire out.
    pub extinguished: bool,
}

/// Notable changes produced by one [`Combustible::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireEvent {
    /// The fire ran out of fuel and went out this frame.
    BurnedOut,
}

/// A fire attached to a scene object.
pub struct Combustible {
    id: FireId,
    name: String,
    fuel: FuelState,
    visuals: FireVisuals,
    water_proof: bool,
    effects: Box<dyn FireEffects>,
}

impl core::fmt::Debug for Combustible {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Combustible")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("fuel", &self.fuel)
            .field("visuals", &self.visuals)
            .field("water_proof", &self.water_proof)
            .finish_non_exhaustive()
    }
}

impl Combustible {
    /// Build a fire from its configuration and start it lit or out.
    ///
    /// A fire configured as lit is ignited immediately; otherwise the
    /// extinguish path runs so collaborators start from a known state.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::InvalidConfiguration`] if the burn time is
    /// invalid or any light or emitter is missing.
    pub fn new(config: &FireConfig, effects: Box<dyn FireEffects>) -> Result<Self, FireError> {
        let fuel = FuelState::new(config.burn_time_seconds)?;
        let visuals = FireVisuals::from_config(config)?;
        let mut fire = Self {
            id: FireId::new(),
            name: config.name.clone(),
            fuel,
            visuals,
            water_proof: config.water_proof,
            effects,
        };
        if config.lit {
            fire.ignite();
        } else {
            fire.go_out();
        }
        Ok(fire)
    }

    /// Advance the fire by `dt` seconds.
    ///
    /// Dims visuals by the remaining fuel, burns fuel, puts the fire out
    /// when it runs dry, and steps light flicker.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::InvalidArgument`] for a negative `dt`; nothing
    /// changes.
    pub fn update(&mut self, dt: f32) -> Result<Option<FireEvent>, FireError> {
        let dt = check_seconds(dt, "frame time step")?;
        let burns = self.fuel.is_lit() && self.fuel.burn_capacity_seconds() > 0.0;

        if burns && !self.fuel.is_infinite() {
            self.visuals.dim(self.fuel.remaining_fraction());
            self.effects.apply_dim(self.id, &self.visuals);
        }
        if burns {
            self.fuel.consume(dt)?;
        }

        let event = if self.fuel.is_depleted() {
            info!(fire = %self.id, name = %self.name, "Fire burned out");
            self.go_out();
            Some(FireEvent::BurnedOut)
        } else {
            None
        };

        self.visuals.step_flickers(dt);
        Ok(event)
    }

    /// Light the fire at full fuel and notify collaborators.
    pub fn ignite(&mut self) {
        self.visuals.restart();
        self.fuel.ignite();
        debug!(
            fire = %self.id,
            name = %self.name,
            fuel = self.fuel.remaining_fuel_seconds(),
            infinite = self.fuel.is_infinite(),
            "Fire lit"
        );
        self.effects.on_ignite(self.id, &self.visuals);
    }

    /// Put the fire out and notify collaborators. Fuel is kept.
    pub fn go_out(&mut self) {
        self.visuals.shut_down();
        self.fuel.extinguish();
        debug!(fire = %self.id, name = %self.name, "Fire out");
        self.effects.on_extinguish(self.id, &self.visuals);
    }

    /// React to touching another object.
    ///
    /// A lit combustible sets this fire alight. Water puts it out unless
    /// the fire is water-proof.
    pub fn on_contact(&mut self, contact: &Contact<'_>) -> ContactOutcome {
        let mut outcome = ContactOutcome::default();
        if contact.combustible == Some(true) {
            self.ignite();
            outcome.ignited = true;
        }
        if !self.water_proof && contact.is_water() {
            self.go_out();
            outcome.extinguished = true;
        }
        debug!(
            fire = %self.id,
            other = contact.name,
            ignited = outcome.ignited,
            extinguished = outcome.extinguished,
            "Trigger contact"
        );
        outcome
    }

    /// Add fuel to the fire.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::InvalidArgument`] for a negative amount.
    pub fn replenish(&mut self, seconds: f32) -> Result<(), FireError> {
        self.fuel.replenish(seconds)
    }

    /// Identifier of this fire.
    pub const fn id(&self) -> FireId {
        self.id
    }

    /// Name from configuration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fuel reservoir.
    pub const fn fuel(&self) -> &FuelState {
        &self.fuel
    }

    /// Current light and particle state.
    pub const fn visuals(&self) -> &FireVisuals {
        &self.visuals
    }

    /// Whether the fire is burning.
    pub const fn is_lit(&self) -> bool {
        self.fuel.is_lit()
    }

    /// Whether water contact is ignored.
    pub const fn is_water_proof(&self) -> bool {
        self.water_proof
    }
}
