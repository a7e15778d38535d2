//! Day/night clock, ambient light, tides, and tick cycle for the Kindle
//! simulation.
//!
//! This crate owns the per-step update that drives the environment: the
//! clock advances, the sun turns, the ambient colour fades between hour
//! bands, the tide moves, and every fire burns.
//!
//! # Modules
//!
//! - [`ambient`] -- Hour bands, colour targets, and the fade task, plus the
//!   [`AmbientSink`] collaborator trait.
//! - [`clock`] -- [`CycleClock`] with day length, hour, minute, and day
//!   number.
//! - [`config`] -- Configuration loading from `kindle-config.yaml` into
//!   strongly-typed structs.
//! - [`debug`] -- Periodic environment reports.
//! - [`runner`] -- Fixed-step async loop with tick limits and shutdown.
//! - [`sun`] -- Sun rotation from the day length.
//! - [`tick`] -- One step of the whole environment.
//! - [`tide`] -- Triangular-wave tide height.
//!
//! [`AmbientSink`]: ambient::AmbientSink
//! [`CycleClock`]: clock::CycleClock

pub mod ambient;
pub mod clock;
pub mod config;
pub mod debug;
pub mod runner;
pub mod sun;
pub mod tick;
pub mod tide;
