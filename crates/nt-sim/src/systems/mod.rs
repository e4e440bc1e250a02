//! Built-in systems, listed in the order the simulation registers them.

mod cooldown;
mod fall;
mod timers;

pub use cooldown::CooldownSystem;
pub use fall::FallDamageSystem;
pub use timers::EffectTimerSystem;
