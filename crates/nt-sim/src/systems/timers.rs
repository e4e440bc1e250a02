use crate::context::SimContext;
use crate::error::SimResult;
use crate::system::System;

/// Advances the effect timer queue and hands each expiry to its character.
///
/// Expiries for characters that have left the roster are dropped.
#[derive(Debug, Default)]
pub struct EffectTimerSystem {
    dispatched: u64,
    dropped: u64,
}

impl EffectTimerSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expiries delivered to a live character so far.
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Expiries discarded because their character was gone.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl System for EffectTimerSystem {
    fn name(&self) -> &str {
        "effect_timers"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let delta = ctx.delta();
        let fired = ctx.timers.advance(delta);

        for expired in fired {
            let handled = ctx.with_character(expired.entity, |character, actx| {
                character.handle_effect_expired(expired, actx)
            });
            if handled.is_some() {
                self.dispatched += 1;
            } else {
                tracing::trace!(
                    entity = %expired.entity,
                    ability = %expired.ability,
                    "expiry for missing character dropped"
                );
                self.dropped += 1;
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
