use nt_core::EntityId;

use crate::ability::AbilityBehavior;
use crate::actor::Instigator;
use crate::context::AbilityContext;

/// Grows the instigator and raises its health cap until the effect ends.
///
/// Raising the cap re-initializes the attribute set, which also restores
/// full health and resets damage and movement speed to their defaults.
/// Ending the effect does the same at the original cap.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthBuff {
    /// Added to the health cap, then healed.
    pub health_bonus: f32,
    /// Factor applied to the original scale on every axis.
    pub scale_multiplier: f32,
    original_scale: Option<[f32; 3]>,
    original_max_health: Option<f32>,
}

impl GrowthBuff {
    pub fn new(health_bonus: f32, scale_multiplier: f32) -> Self {
        Self {
            health_bonus,
            scale_multiplier,
            original_scale: None,
            original_max_health: None,
        }
    }

    /// Health cap captured at activation, while the effect is active.
    pub fn original_max_health(&self) -> Option<f32> {
        self.original_max_health
    }
}

impl AbilityBehavior for GrowthBuff {
    fn on_activate(
        &mut self,
        instigator: &mut dyn Instigator,
        _target: Option<EntityId>,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        let Some(character) = instigator.as_character_mut() else {
            return false;
        };

        let max_health = *self
            .original_max_health
            .get_or_insert(character.attributes.max_health());
        let scale = *self.original_scale.get_or_insert(character.scale());

        character
            .attributes
            .set_max_health(max_health + self.health_bonus);
        character.attributes.heal(self.health_bonus, ctx.events);
        character.set_scale(scale.map(|axis| axis * self.scale_multiplier));

        tracing::debug!(
            max_health = character.attributes.max_health(),
            "growth applied"
        );
        true
    }

    fn end_effect(&mut self, instigator: &mut dyn Instigator, _ctx: &mut AbilityContext<'_>) {
        let scale = self.original_scale.take();
        let max_health = self.original_max_health.take();
        let Some(character) = instigator.as_character_mut() else {
            return;
        };
        if let Some(scale) = scale {
            character.set_scale(scale);
        }
        if let Some(max_health) = max_health {
            character.attributes.set_max_health(max_health);
        }
    }

    fn is_effect_active(&self) -> bool {
        self.original_max_health.is_some()
    }
}
