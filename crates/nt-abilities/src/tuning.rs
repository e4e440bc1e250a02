use serde::{Deserialize, Serialize};

use crate::ability::{Ability, AbilityBehavior, AbilityKind, DEFAULT_COOLDOWN};
use crate::effects::{DamageMultiplier, GrowthBuff, TimedInvincibility};

/// Shortest allowed invincibility (seconds).
pub const MIN_INVINCIBILITY_DURATION: f32 = 1.0;
/// Longest allowed invincibility (seconds).
pub const MAX_INVINCIBILITY_DURATION: f32 = 60.0;

/// Numbers used to build the built-in abilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityTuning {
    /// Cooldown for abilities that don't set their own (seconds).
    pub default_cooldown: f32,
    /// Cooldown of the built-in power-up abilities (seconds).
    pub power_up_cooldown: f32,
    /// How long timed invincibility lasts (seconds, 1 to 60).
    pub invincibility_duration: f32,
    /// Factor the damage buff applies.
    pub damage_multiplier: f32,
    /// Health cap increase of the growth buff.
    pub health_bonus: f32,
    /// Scale factor of the growth buff.
    pub scale_multiplier: f32,
}

impl Default for AbilityTuning {
    fn default() -> Self {
        Self {
            default_cooldown: DEFAULT_COOLDOWN,
            power_up_cooldown: 0.0,
            invincibility_duration: 10.0,
            damage_multiplier: 2.0,
            health_bonus: 50.0,
            scale_multiplier: 1.5,
        }
    }
}

impl AbilityTuning {
    /// Set the fallback cooldown.
    pub fn with_default_cooldown(mut self, seconds: f32) -> Self {
        self.default_cooldown = seconds;
        self
    }

    /// Set the power-up cooldown.
    pub fn with_power_up_cooldown(mut self, seconds: f32) -> Self {
        self.power_up_cooldown = seconds;
        self
    }

    /// Set the invincibility duration, clamped to 1..=60 seconds.
    pub fn with_invincibility_duration(mut self, seconds: f32) -> Self {
        self.invincibility_duration =
            seconds.clamp(MIN_INVINCIBILITY_DURATION, MAX_INVINCIBILITY_DURATION);
        self
    }

    /// Set the damage buff factor.
    pub fn with_damage_multiplier(mut self, multiplier: f32) -> Self {
        self.damage_multiplier = multiplier;
        self
    }

    /// Set the growth buff's health bonus.
    pub fn with_health_bonus(mut self, bonus: f32) -> Self {
        self.health_bonus = bonus;
        self
    }

    /// Set the growth buff's scale factor.
    pub fn with_scale_multiplier(mut self, multiplier: f32) -> Self {
        self.scale_multiplier = multiplier;
        self
    }

    /// Invincibility duration as actually applied. Deserialized values
    /// bypass the builder, so the clamp is enforced here too.
    pub fn effective_invincibility_duration(&self) -> f32 {
        self.invincibility_duration
            .clamp(MIN_INVINCIBILITY_DURATION, MAX_INVINCIBILITY_DURATION)
    }

    /// Check every value is usable. Returns a description of the first
    /// problem found.
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("default_cooldown", self.default_cooldown),
            ("power_up_cooldown", self.power_up_cooldown),
            ("health_bonus", self.health_bonus),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{field} must be a finite value >= 0, got {value}"));
            }
        }

        let positive = [
            ("invincibility_duration", self.invincibility_duration),
            ("damage_multiplier", self.damage_multiplier),
            ("scale_multiplier", self.scale_multiplier),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{field} must be a finite value > 0, got {value}"));
            }
        }
        Ok(())
    }

    /// Construct a built-in ability of `kind`. `Custom` kinds have no
    /// recipe and yield `None`.
    pub fn build(&self, kind: AbilityKind) -> Option<Ability> {
        let ability = match kind {
            AbilityKind::VigorSeed | AbilityKind::Mushroom => Ability::new(
                kind,
                GrowthBuff::new(self.health_bonus, self.scale_multiplier),
            ),
            AbilityKind::InfernoShard | AbilityKind::FireFlower => {
                Ability::new(kind, DamageMultiplier::new(self.damage_multiplier))
            }
            AbilityKind::AegisCharm | AbilityKind::StarInvincibility => Ability::new(
                kind,
                TimedInvincibility::new(kind, self.effective_invincibility_duration()),
            ),
            AbilityKind::Custom(_) => return None,
        };
        Some(ability.with_cooldown(self.power_up_cooldown))
    }

    /// A host-defined ability using the fallback cooldown.
    pub fn custom(&self, name: &'static str, behavior: impl AbilityBehavior + 'static) -> Ability {
        Ability::new(AbilityKind::Custom(name), behavior).with_cooldown(self.default_cooldown)
    }
}
