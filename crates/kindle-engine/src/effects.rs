//! Log-backed collaborators for running without a renderer.
//!
//! [`LogEffects`] and [`LogAmbientSink`] stand in for the host engine's
//! lights, particle systems, and audio. They write what a renderer would
//! have been told to the structured log.

use kindle_core::ambient::AmbientSink;
use kindle_fire::{FireConfig, FireEffects, FireVisuals};
use kindle_types::{Color, FireId};
use tracing::{debug, info, trace};

/// Logs a fire's ignite, extinguish, and dim events.
#[derive(Debug, Clone)]
pub struct LogEffects {
    name: String,
}

impl LogEffects {
    /// Create effects for the fire described by `config`.
    pub fn for_fire(config: &FireConfig) -> Box<dyn FireEffects> {
        Box::new(Self {
            name: config.name.clone(),
        })
    }
}

impl FireEffects for LogEffects {
    fn on_ignite(&mut self, fire: FireId, visuals: &FireVisuals) {
        info!(
            %fire,
            name = %self.name,
            lights = visuals.lights().len(),
            emitters = visuals.emitters().len(),
            "Lights on, particles playing, burning loop started"
        );
    }

    fn on_extinguish(&mut self, fire: FireId, _visuals: &FireVisuals) {
        info!(%fire, name = %self.name, "Lights off, particles stopped, burning loop stopped");
    }

    fn apply_dim(&mut self, fire: FireId, visuals: &FireVisuals) {
        trace!(
            %fire,
            name = %self.name,
            intensity = visuals.total_intensity(),
            "Dimmed"
        );
    }
}

/// Logs the ambient colour whenever it changes.
#[derive(Debug, Clone, Default)]
pub struct LogAmbientSink {
    last: Option<Color>,
}

impl LogAmbientSink {
    /// Colour most recently applied.
    pub const fn last(&self) -> Option<Color> {
        self.last
    }
}

impl AmbientSink for LogAmbientSink {
    fn set_ambient(&mut self, color: Color) {
        if self.last.is_some_and(|last| last.approx_eq(color)) {
            return;
        }
        debug!(%color, "Ambient light");
        self.last = Some(color);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sink_keeps_the_latest_colour() {
        let mut sink = LogAmbientSink::default();
        assert!(sink.last().is_none());
        sink.set_ambient(Color::BLUE);
        sink.set_ambient(Color::YELLOW);
        assert_eq!(sink.last(), Some(Color::YELLOW));
    }

    #[test]
    fn effects_accept_every_event() {
        let config = FireConfig::default();
        let mut effects = LogEffects::for_fire(&config);
        let visuals = FireVisuals::from_config(&config).unwrap();
        let fire = FireId::new();
        effects.on_ignite(fire, &visuals);
        effects.apply_dim(fire, &visuals);
        effects.on_extinguish(fire, &visuals);
    }
}
