use nt_core::FallDamage;

use crate::context::SimContext;
use crate::error::SimResult;
use crate::system::System;

/// Samples each character's vertical velocity and applies landing damage
/// through the invincibility-gated damage entry point.
#[derive(Debug, Default)]
pub struct FallDamageSystem {
    fall: FallDamage,
}

impl FallDamageSystem {
    pub fn new(fall: FallDamage) -> Self {
        Self { fall }
    }

    pub fn fall(&self) -> &FallDamage {
        &self.fall
    }
}

impl System for FallDamageSystem {
    fn name(&self) -> &str {
        "fall_damage"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let delta = ctx.delta();
        let fall = self.fall;
        ctx.for_each_character(|character, actx| {
            character.apply_fall_sample(&fall, delta, actx.events);
        });
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
