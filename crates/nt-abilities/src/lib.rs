//! Abilities and power-ups for Nexus Trials.
//!
//! An [`Ability`] is a cooldown state machine wrapped around an
//! [`AbilityBehavior`]. Characters own their abilities through an
//! [`AbilityComponent`]; the [`PowerUpPolicy`] decides which built-in
//! ability is active at any time. Persistent effects (invincibility, damage
//! and growth buffs) live in [`effects`].

pub mod ability;
pub mod actor;
pub mod component;
pub mod context;
pub mod effects;
pub mod power_up;
pub mod tuning;

pub use ability::{Ability, AbilityBehavior, AbilityKind, AbilityState, NoEffect};
pub use actor::{CharacterState, Instigator, Prop};
pub use component::AbilityComponent;
pub use context::{AbilityContext, EffectExpired};
pub use effects::{DamageMultiplier, GrowthBuff, TimedInvincibility};
pub use power_up::{CollectionTracker, PowerUp, PowerUpPolicy};
pub use tuning::AbilityTuning;
