use std::collections::BTreeMap;

use nt_abilities::{AbilityContext, AbilityKind, EffectExpired, PowerUp};
use nt_core::{EntityId, EventLog, TimerQueue};

use crate::character::Character;
use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::error::{SimError, SimResult};
use crate::system::System;
use crate::systems::{CooldownSystem, EffectTimerSystem, FallDamageSystem};

/// The top-level simulation orchestrator.
///
/// Owns the character roster, clock, effect timers, event log, and
/// registered systems. Commands act on one character immediately; `step`
/// advances time and runs every system once.
pub struct Simulation {
    roster: BTreeMap<EntityId, Character>,
    clock: SimClock,
    config: SimConfig,
    timers: TimerQueue<EffectExpired>,
    events: EventLog,
    systems: Vec<Box<dyn System>>,
    initialized: bool,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.clock.tick())
            .field("characters", &self.roster.len())
            .field("systems", &self.systems.len())
            .field("pending_timers", &self.timers.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create an empty simulation with no systems registered.
    pub fn new(config: SimConfig) -> Self {
        let clock = SimClock::new(config.fixed_delta);
        let events = EventLog::new(config.max_events);
        Self {
            roster: BTreeMap::new(),
            clock,
            config,
            timers: TimerQueue::new(),
            events,
            systems: Vec::new(),
            initialized: false,
        }
    }

    /// Create a simulation with the built-in systems registered: effect
    /// timers, then cooldowns, then fall damage.
    pub fn with_default_systems(config: SimConfig) -> Self {
        let fall = config.fall_damage;
        let mut sim = Self::new(config);
        sim.add_system(EffectTimerSystem::new());
        sim.add_system(CooldownSystem::new());
        sim.add_system(FallDamageSystem::new(fall));
        sim
    }

    /// Register a system. Systems are ticked in registration order.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(Box::new(system));
    }

    /// Initialize all registered systems.
    pub fn init(&mut self) -> SimResult<()> {
        if self.initialized {
            return Ok(());
        }
        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                roster: &mut self.roster,
                clock: &self.clock,
                config: &self.config,
                timers: &mut self.timers,
                events: &mut self.events,
            };
            let result = system.init(&mut ctx);
            self.systems[i] = system;
            result?;
        }
        self.initialized = true;
        Ok(())
    }

    /// Advance the simulation by one fixed step.
    pub fn step(&mut self) -> SimResult<()> {
        if !self.initialized {
            self.init()?;
        }

        self.clock.advance();

        for i in 0..self.systems.len() {
            let mut system = std::mem::replace(&mut self.systems[i], Box::new(NoopSystem));
            let mut ctx = SimContext {
                roster: &mut self.roster,
                clock: &self.clock,
                config: &self.config,
                timers: &mut self.timers,
                events: &mut self.events,
            };
            let result = system.tick(&mut ctx);
            self.systems[i] = system;
            result?;
        }
        Ok(())
    }

    /// Advance the simulation by `n` steps.
    pub fn run(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Add a character built from the configuration. Returns its id.
    pub fn spawn_character(&mut self, name: impl Into<String>) -> EntityId {
        let character = Character::new(name, &self.config);
        let id = character.id();
        tracing::debug!(entity = %id, name = character.name(), "character spawned");
        self.roster.insert(id, character);
        id
    }

    /// Remove a character. Its pending effect timers fire into nothing.
    pub fn despawn(&mut self, id: EntityId) -> Option<Character> {
        self.roster.remove(&id)
    }

    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.roster.get(&id)
    }

    pub fn character_mut(&mut self, id: EntityId) -> Option<&mut Character> {
        self.roster.get_mut(&id)
    }

    /// All characters in id order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.roster.values()
    }

    /// Run `f` on character `id` with an ability context logging to the
    /// event log at the current tick.
    fn command<R>(
        &mut self,
        id: EntityId,
        f: impl FnOnce(&mut Character, &mut AbilityContext<'_>) -> R,
    ) -> SimResult<R> {
        let tick = self.clock.tick();
        let character = self
            .roster
            .get_mut(&id)
            .ok_or(SimError::EntityNotFound(id))?;
        let mut sink = self.events.scoped(id, tick);
        let mut ctx = AbilityContext::new(&mut self.timers, &mut sink);
        Ok(f(character, &mut ctx))
    }

    /// Damage through the invincibility gate. Returns the damage dealt.
    pub fn apply_damage(&mut self, id: EntityId, amount: f32) -> SimResult<f32> {
        self.command(id, |character, ctx| character.take_damage(amount, ctx.events))
    }

    /// Returns the amount healed.
    pub fn heal(&mut self, id: EntityId, amount: f32) -> SimResult<f32> {
        self.command(id, |character, ctx| character.heal(amount, ctx.events))
    }

    /// Revive a character at the configured health cap, with no power-up.
    pub fn revive(&mut self, id: EntityId) -> SimResult<()> {
        let max_health = self.config.max_health;
        self.command(id, |character, ctx| character.revive(max_health, ctx))
    }

    pub fn apply_power_up(&mut self, id: EntityId, category: PowerUp) -> SimResult<bool> {
        self.command(id, |character, ctx| character.apply_power_up(category, ctx))
    }

    pub fn activate_ability(
        &mut self,
        id: EntityId,
        kind: AbilityKind,
        target: Option<EntityId>,
    ) -> SimResult<bool> {
        self.command(id, |character, ctx| {
            character.activate_ability(kind, target, ctx)
        })
    }

    pub fn activate_ability_by_index(
        &mut self,
        id: EntityId,
        index: usize,
        target: Option<EntityId>,
    ) -> SimResult<bool> {
        self.command(id, |character, ctx| {
            character.activate_ability_by_index(index, target, ctx)
        })
    }

    /// End an ability's persistent effect by hand.
    pub fn deactivate_ability(&mut self, id: EntityId, kind: AbilityKind) -> SimResult<bool> {
        self.command(id, |character, ctx| character.deactivate_ability(kind, ctx))
    }

    /// Returns `true` when the pickup earned an extra life.
    pub fn add_collection(&mut self, id: EntityId, amount: u32) -> SimResult<bool> {
        self.command(id, |character, ctx| {
            character.add_collection(amount, ctx.events)
        })
    }

    pub fn reset_collections(&mut self, id: EntityId) -> SimResult<()> {
        self.command(id, |character, _| character.reset_collections())
    }

    pub fn set_vertical_velocity(&mut self, id: EntityId, velocity_z: f32) -> SimResult<()> {
        self.command(id, |character, _| {
            character.set_vertical_velocity(velocity_z)
        })
    }

    pub fn set_abilities_enabled(&mut self, id: EntityId, enabled: bool) -> SimResult<()> {
        self.command(id, |character, _| {
            character.abilities_mut().set_abilities_enabled(enabled)
        })
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Effect timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Access a system by downcasting to a concrete type.
    pub fn get_system<T: System + 'static>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Access a system mutably by downcasting to a concrete type.
    pub fn get_system_mut<T: System + 'static>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }
}

/// Placeholder system used during the swap-and-tick pattern.
#[derive(Debug)]
struct NoopSystem;

impl System for NoopSystem {
    fn name(&self) -> &str {
        "noop"
    }
    fn tick(&mut self, _ctx: &mut SimContext<'_>) -> SimResult<()> {
        Ok(())
    }
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
