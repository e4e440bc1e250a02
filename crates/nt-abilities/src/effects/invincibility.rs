use nt_core::{EntityId, GameplayEventKind, TimerHandle};

use crate::ability::{AbilityBehavior, AbilityKind};
use crate::actor::Instigator;
use crate::context::{AbilityContext, EffectExpired};

/// Makes the instigator immune to damage for a fixed duration.
///
/// Activation raises the instigator's invincibility flag and schedules an
/// [`EffectExpired`] timer. The effect ends when that timer fires or when it
/// is ended by hand, whichever comes first; ending clears the flag and
/// cancels the timer.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedInvincibility {
    kind: AbilityKind,
    /// Seconds the flag stays raised.
    pub duration: f32,
    instigator: Option<EntityId>,
    timer: TimerHandle,
}

impl TimedInvincibility {
    /// Invincibility owned by the ability of `kind`, lasting `duration` seconds.
    pub fn new(kind: AbilityKind, duration: f32) -> Self {
        Self {
            kind,
            duration,
            instigator: None,
            timer: TimerHandle::INVALID,
        }
    }

    /// The entity currently protected, if any.
    pub fn instigator(&self) -> Option<EntityId> {
        self.instigator
    }

    /// Handle of the pending expiry timer.
    pub fn timer(&self) -> TimerHandle {
        self.timer
    }
}

impl AbilityBehavior for TimedInvincibility {
    fn on_activate(
        &mut self,
        instigator: &mut dyn Instigator,
        _target: Option<EntityId>,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        let Some(character) = instigator.as_character_mut() else {
            return false;
        };

        let entity = character.id();
        self.instigator = Some(entity);
        character.set_invincible(true);
        ctx.events
            .notify(GameplayEventKind::InvincibilityChanged { active: true });

        // A second activation restarts the clock
        ctx.scheduler.cancel(&mut self.timer);
        self.timer = ctx.scheduler.schedule_once(
            self.duration,
            EffectExpired {
                entity,
                ability: self.kind,
            },
        );
        tracing::debug!(entity = %entity, duration = self.duration, "invincibility started");
        true
    }

    fn end_effect(&mut self, instigator: &mut dyn Instigator, ctx: &mut AbilityContext<'_>) {
        if let Some(character) = instigator.as_character_mut() {
            character.set_invincible(false);
            ctx.events
                .notify(GameplayEventKind::InvincibilityChanged { active: false });
        }
        ctx.scheduler.cancel(&mut self.timer);
        self.instigator = None;
    }

    fn is_effect_active(&self) -> bool {
        self.instigator.is_some()
    }
}
