use nt_core::{EntityId, NotificationSink, Scheduler};

use crate::ability::AbilityKind;

/// Timer payload fired when a timed effect runs out.
///
/// Holds the instigator by id only; the host resolves it when the timer
/// fires and drops the payload if the entity no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectExpired {
    /// The entity whose effect ran out.
    pub entity: EntityId,
    /// The ability that owns the effect.
    pub ability: AbilityKind,
}

/// Collaborators an ability may use while activating or ending an effect.
pub struct AbilityContext<'a> {
    /// Schedules effect expiry.
    pub scheduler: &'a mut dyn Scheduler<EffectExpired>,
    /// Receives gameplay notifications.
    pub events: &'a mut dyn NotificationSink,
}

impl<'a> AbilityContext<'a> {
    /// Bundle a scheduler and a notification sink.
    pub fn new(
        scheduler: &'a mut dyn Scheduler<EffectExpired>,
        events: &'a mut dyn NotificationSink,
    ) -> Self {
        Self { scheduler, events }
    }
}

impl std::fmt::Debug for AbilityContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityContext").finish_non_exhaustive()
    }
}
