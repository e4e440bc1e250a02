use nt_core::{AttributeKind, EntityId};

use crate::ability::AbilityBehavior;
use crate::actor::Instigator;
use crate::context::AbilityContext;

/// Multiplies the instigator's damage attribute until the effect ends.
///
/// The original damage is captured once, when no effect is active, so
/// re-activating does not compound the multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageMultiplier {
    /// Factor applied to the original damage.
    pub multiplier: f32,
    original_damage: Option<f32>,
}

impl DamageMultiplier {
    pub fn new(multiplier: f32) -> Self {
        Self {
            multiplier,
            original_damage: None,
        }
    }

    /// Damage value captured at activation, while the effect is active.
    pub fn original_damage(&self) -> Option<f32> {
        self.original_damage
    }
}

impl AbilityBehavior for DamageMultiplier {
    fn on_activate(
        &mut self,
        instigator: &mut dyn Instigator,
        _target: Option<EntityId>,
        _ctx: &mut AbilityContext<'_>,
    ) -> bool {
        let Some(character) = instigator.as_character_mut() else {
            return false;
        };

        let attributes = &mut character.attributes;
        let original = *self.original_damage.get_or_insert(attributes.damage());
        attributes.set_base_value(AttributeKind::Damage, original * self.multiplier);
        tracing::debug!(original, boosted = attributes.damage(), "damage multiplied");
        true
    }

    fn end_effect(&mut self, instigator: &mut dyn Instigator, _ctx: &mut AbilityContext<'_>) {
        let Some(original) = self.original_damage.take() else {
            return;
        };
        if let Some(character) = instigator.as_character_mut() {
            character
                .attributes
                .set_base_value(AttributeKind::Damage, original);
        }
    }

    fn is_effect_active(&self) -> bool {
        self.original_damage.is_some()
    }
}
