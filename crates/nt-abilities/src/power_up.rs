//! Power-up selection and the per-level collection counter.

use std::fmt;

use serde::{Deserialize, Serialize};

use nt_core::GameplayEventKind;

use crate::ability::AbilityKind;
use crate::actor::Instigator;
use crate::component::AbilityComponent;
use crate::context::AbilityContext;

/// Collections per level needed for the one-time bonus.
pub const DEFAULT_COLLECTION_THRESHOLD: u32 = 3;

/// The character's current power-up. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerUp {
    /// No power-up.
    #[default]
    Small,
    /// Growth and bonus health.
    VigorSeed,
    /// Doubled damage.
    InfernoShard,
    /// Timed invincibility.
    AegisCharm,
}

impl PowerUp {
    /// The ability that carries this power-up's effect.
    pub fn ability_kind(self) -> Option<AbilityKind> {
        match self {
            Self::Small => None,
            Self::VigorSeed => Some(AbilityKind::VigorSeed),
            Self::InfernoShard => Some(AbilityKind::InfernoShard),
            Self::AegisCharm => Some(AbilityKind::AegisCharm),
        }
    }
}

impl fmt::Display for PowerUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Small => write!(f, "small"),
            Self::VigorSeed => write!(f, "vigor seed"),
            Self::InfernoShard => write!(f, "inferno shard"),
            Self::AegisCharm => write!(f, "aegis charm"),
        }
    }
}

/// Applies power-ups to a character's ability component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerUpPolicy {
    state: PowerUp,
}

impl PowerUpPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `category`.
    ///
    /// Does nothing at all without an ability component. Otherwise ends the
    /// current category's effect when the category changes, adds the new
    /// category's ability if missing, and activates it. The new category is
    /// recorded only when its effect is live afterwards; a refused
    /// activation leaves the character [`PowerUp::Small`]. Returns whether
    /// activation succeeded (`true` for [`PowerUp::Small`], which has no
    /// ability).
    pub fn apply(
        &mut self,
        category: PowerUp,
        abilities: Option<&mut AbilityComponent>,
        instigator: &mut dyn Instigator,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        let Some(abilities) = abilities else {
            tracing::warn!(power_up = %category, "no ability component, power-up ignored");
            return false;
        };

        let replaced = self.state.ability_kind().filter(|_| self.state != category);
        if let Some(previous) = replaced {
            abilities.deactivate_ability(previous, instigator, ctx);
        }

        let (activated, live) = match category.ability_kind() {
            Some(kind) => {
                if !abilities.contains(kind) {
                    abilities.add_ability(kind);
                }
                let activated = abilities.activate_ability(kind, instigator, None, ctx);
                let live = abilities
                    .get_ability(kind)
                    .is_some_and(|ability| ability.is_effect_active());
                (activated, activated || live)
            }
            None => (true, true),
        };

        if !live {
            self.state = PowerUp::Small;
            tracing::debug!(power_up = %category, "power-up not applied, back to small");
            return false;
        }

        self.state = category;
        ctx.events.notify(GameplayEventKind::PowerUpApplied {
            power_up: category.to_string(),
        });
        tracing::debug!(power_up = %category, activated, "power-up applied");
        activated
    }

    pub fn state(&self) -> PowerUp {
        self.state
    }

    pub fn has_vigor_seed(&self) -> bool {
        self.state == PowerUp::VigorSeed
    }

    pub fn has_inferno_shard(&self) -> bool {
        self.state == PowerUp::InfernoShard
    }

    pub fn has_aegis_charm(&self) -> bool {
        self.state == PowerUp::AegisCharm
    }

    /// Drop back to [`PowerUp::Small`] if `kind` backs the current
    /// power-up. Call after that ability's effect has ended. Returns whether
    /// the state changed.
    pub fn end_current(&mut self, kind: AbilityKind) -> bool {
        if self.state.ability_kind() != Some(kind) {
            return false;
        }
        self.state = PowerUp::Small;
        true
    }

    /// Forget the current power-up without touching any ability.
    pub fn reset(&mut self) {
        self.state = PowerUp::Small;
    }
}

/// Counts collections within a level and grants one bonus per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionTracker {
    count: u32,
    bonus_granted: bool,
    threshold: u32,
}

impl Default for CollectionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION_THRESHOLD)
    }
}

impl CollectionTracker {
    /// A tracker granting its bonus at `threshold` collections.
    pub fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            bonus_granted: false,
            threshold,
        }
    }

    /// Add to the counter. Returns `true` on the one call per level that
    /// crosses the threshold.
    pub fn add(&mut self, amount: u32) -> bool {
        self.count = self.count.saturating_add(amount);
        if self.count >= self.threshold && !self.bonus_granted {
            self.bonus_granted = true;
            return true;
        }
        false
    }

    /// Start a new level.
    pub fn reset(&mut self) {
        self.count = 0;
        self.bonus_granted = false;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn bonus_granted(&self) -> bool {
        self.bonus_granted
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}
