use crate::context::SimContext;
use crate::error::SimResult;
use crate::system::System;

/// Runs every ability component's per-step driver, the only place
/// cooldowns advance.
#[derive(Debug, Default)]
pub struct CooldownSystem;

impl CooldownSystem {
    pub fn new() -> Self {
        Self
    }
}

impl System for CooldownSystem {
    fn name(&self) -> &str {
        "cooldowns"
    }

    fn tick(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()> {
        let delta = ctx.delta();
        for character in ctx.roster.values_mut() {
            character.abilities_mut().tick(delta);
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
