use std::collections::BTreeMap;

use nt_abilities::{AbilityContext, EffectExpired};
use nt_core::{EntityId, EventLog, GameplayEvent, GameplayEventKind, TimerQueue};

use crate::character::Character;
use crate::clock::SimClock;
use crate::config::SimConfig;

/// Mutable context passed to each system during a tick.
pub struct SimContext<'a> {
    pub roster: &'a mut BTreeMap<EntityId, Character>,
    pub clock: &'a SimClock,
    pub config: &'a SimConfig,
    pub timers: &'a mut TimerQueue<EffectExpired>,
    pub events: &'a mut EventLog,
}

impl SimContext<'_> {
    /// Record an event for `entity` at the current tick.
    pub fn emit(&mut self, entity: EntityId, kind: GameplayEventKind) {
        self.events
            .push(GameplayEvent::new(self.clock.tick(), entity, kind));
    }

    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Seconds covered by this tick.
    pub fn delta(&self) -> f32 {
        self.clock.fixed_delta()
    }

    /// Run `f` on the character `id` with an ability context whose
    /// notifications are logged against that character. `None` if the
    /// character is gone.
    pub fn with_character<R>(
        &mut self,
        id: EntityId,
        f: impl FnOnce(&mut Character, &mut AbilityContext<'_>) -> R,
    ) -> Option<R> {
        let tick = self.clock.tick();
        let character = self.roster.get_mut(&id)?;
        let mut sink = self.events.scoped(id, tick);
        let mut ctx = AbilityContext::new(&mut *self.timers, &mut sink);
        Some(f(character, &mut ctx))
    }

    /// Run `f` on every character in id order.
    pub fn for_each_character(
        &mut self,
        mut f: impl FnMut(&mut Character, &mut AbilityContext<'_>),
    ) {
        let tick = self.clock.tick();
        for (id, character) in self.roster.iter_mut() {
            let mut sink = self.events.scoped(*id, tick);
            let mut ctx = AbilityContext::new(&mut *self.timers, &mut sink);
            f(character, &mut ctx);
        }
    }
}
