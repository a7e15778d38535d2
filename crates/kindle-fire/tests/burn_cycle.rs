//! Integration tests for a fire declared in YAML and burned frame by frame.

#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]

use kindle_fire::{Combustible, Contact, FireConfig, FireEvent, NullEffects, PARTICLE_RATE_FLOOR};

const BRAZIER: &str = r#"
name: "brazier"
lit: true
burn_time_seconds: 10
seed: 3
lights:
  - handle: "brazier/light"
    flicker:
      rate: 0.5
      min: 2.0
      max: 4.0
      method: noise
emitters:
  - handle: "brazier/flames"
    start_size: 2.0
    emission_rate: 30
"#;

fn brazier() -> Combustible {
    let config: FireConfig = serde_yml::from_str(BRAZIER).unwrap();
    Combustible::new(&config, Box::new(NullEffects)).unwrap()
}

#[test]
fn visuals_fade_as_fuel_runs_down() {
    let mut fire = brazier();
    let mut last_rate = f32::MAX;
    let mut event = None;

    for _ in 0..20 {
        event = fire.update(0.5).unwrap();
        if event.is_some() {
            break;
        }
        let emitter = &fire.visuals().emitters()[0];
        assert!(emitter.rate() <= last_rate);
        assert!(emitter.rate() >= PARTICLE_RATE_FLOOR);
        last_rate = emitter.rate();

        let light = &fire.visuals().lights()[0];
        let (min, max) = light.bounds();
        assert!(light.intensity() >= min - 1.0e-4 && light.intensity() <= max + 1.0e-4);
    }

    assert_eq!(event, Some(FireEvent::BurnedOut));
    assert!(!fire.is_lit());
    assert_eq!(fire.visuals().total_intensity(), 0.0);
}

#[test]
fn contact_lights_and_water_douses() {
    let mut fire = brazier();
    fire.go_out();
    assert!(!fire.is_lit());

    let unlit_neighbour = fire.on_contact(&Contact::fire(false));
    assert!(!unlit_neighbour.ignited);

    assert!(fire.on_contact(&Contact::fire(true)).ignited);
    assert!(fire.is_lit());

    assert!(!fire.on_contact(&Contact::object("Rock", "Untagged")).extinguished);
    assert!(fire.on_contact(&Contact::object("Lake", "Water")).extinguished);
    assert!(!fire.is_lit());
}

#[test]
fn replenish_extends_the_burn() {
    let mut fire = brazier();
    fire.update(8.0).unwrap();
    fire.replenish(100.0).unwrap();
    assert_eq!(fire.fuel().remaining_fuel_seconds(), 10.0);
    assert!(fire.replenish(-1.0).is_err());
}
