//! Fixed-step gameplay simulation for Nexus Trials.
//!
//! Hosts a roster of characters and drives them one fixed step at a time.
//! Each step advances the clock and runs the registered systems in order:
//! effect timers fire, cooldowns advance, and landings deal fall damage.
//! Everything a character does is reported to the event log.

/// Characters: the acting entities driven by the simulation.
pub mod character;
/// Simulation clock for tracking steps and elapsed time.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Mutable context passed to systems each tick.
pub mod context;
/// Error types for the simulation crate.
pub mod error;
/// Top-level simulation orchestrator.
pub mod simulation;
/// The trait that all simulation systems implement.
pub mod system;
/// Built-in systems.
pub mod systems;
/// `tracing` subscriber setup.
pub mod telemetry;

/// Re-export of [`character::Character`].
pub use character::Character;
/// Re-export of [`clock::SimClock`].
pub use clock::SimClock;
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-export of [`simulation::Simulation`].
pub use simulation::Simulation;
/// Re-export of [`system::System`].
pub use system::System;
/// Re-exports of the built-in systems.
pub use systems::{CooldownSystem, EffectTimerSystem, FallDamageSystem};
/// Re-export of [`telemetry::init_tracing`].
pub use telemetry::init_tracing;
