//! A simulated character: the acting entity that owns attributes,
//! abilities, and power-up state.

use nt_abilities::{
    AbilityComponent, AbilityContext, AbilityKind, CharacterState, CollectionTracker,
    EffectExpired, Instigator, PowerUp, PowerUpPolicy,
};
use nt_core::{AttributeComponent, EntityId, FallDamage, GameplayEventKind, NotificationSink};

use crate::config::SimConfig;

/// One character in the roster.
///
/// Damage from every source enters through [`take_damage`](Self::take_damage),
/// which honours the invincibility flag before touching attributes.
#[derive(Debug)]
pub struct Character {
    name: String,
    state: CharacterState,
    abilities: AbilityComponent,
    power_up: PowerUpPolicy,
    collections: CollectionTracker,
    lives: u32,
    fall_accumulator: f32,
    vertical_velocity: f32,
}

impl Character {
    /// A fresh character at full health, with an ability component bound
    /// to it and no power-up.
    pub fn new(name: impl Into<String>, config: &SimConfig) -> Self {
        let id = EntityId::new();
        Self {
            name: name.into(),
            state: CharacterState::new(id, config.max_health),
            abilities: AbilityComponent::with_owner(id, config.abilities),
            power_up: PowerUpPolicy::new(),
            collections: CollectionTracker::new(config.extra_life_threshold),
            lives: config.starting_lives,
            fall_accumulator: 0.0,
            vertical_velocity: 0.0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.state.id()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn attributes(&self) -> &AttributeComponent {
        &self.state.attributes
    }

    pub fn abilities(&self) -> &AbilityComponent {
        &self.abilities
    }

    pub fn abilities_mut(&mut self) -> &mut AbilityComponent {
        &mut self.abilities
    }

    /// The current power-up.
    pub fn power_up(&self) -> PowerUp {
        self.power_up.state()
    }

    pub fn power_up_policy(&self) -> &PowerUpPolicy {
        &self.power_up
    }

    pub fn collections(&self) -> &CollectionTracker {
        &self.collections
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_invincible(&self) -> bool {
        self.state.is_invincible()
    }

    pub fn is_alive(&self) -> bool {
        self.state.attributes.is_alive()
    }

    /// Downward travel accumulated during the current fall.
    pub fn fall_accumulator(&self) -> f32 {
        self.fall_accumulator
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Latest vertical velocity sample (cm/s, negative = falling).
    pub fn set_vertical_velocity(&mut self, velocity_z: f32) {
        self.vertical_velocity = velocity_z;
    }

    /// The damage entry point. Returns the damage actually dealt.
    ///
    /// A dead character takes nothing. While invincible, positive damage is
    /// absorbed and reported as `DamageBlocked`. A killing blow disables the
    /// ability component.
    pub fn take_damage(&mut self, amount: f32, sink: &mut dyn NotificationSink) -> f32 {
        if self.state.attributes.is_dead() {
            return 0.0;
        }
        if amount > 0.0 && self.state.is_invincible() {
            tracing::debug!(entity = %self.id(), amount, "damage blocked by invincibility");
            sink.notify(GameplayEventKind::DamageBlocked { amount });
            return 0.0;
        }

        let actual = self.state.attributes.take_damage(amount, sink);
        if actual > 0.0 && self.state.attributes.is_dead() {
            self.abilities.set_abilities_enabled(false);
            tracing::info!(entity = %self.id(), name = %self.name, "character died");
        }
        actual
    }

    /// Returns the amount actually healed.
    pub fn heal(&mut self, amount: f32, sink: &mut dyn NotificationSink) -> f32 {
        self.state.attributes.heal(amount, sink)
    }

    /// Bring a dead character back at `max_health` with no power-up and
    /// abilities re-enabled. Live effects end before health is reset so
    /// none of them restores a stale snapshot later.
    pub fn revive(&mut self, max_health: f32, ctx: &mut AbilityContext<'_>) {
        let ended = self.abilities.end_all_effects(&mut self.state, ctx);
        if ended > 0 {
            tracing::debug!(entity = %self.id(), ended, "effects ended on revive");
        }
        self.power_up.reset();
        self.state.attributes.set_max_health(max_health);
        self.abilities.set_abilities_enabled(true);
        self.fall_accumulator = 0.0;
    }

    pub fn apply_power_up(&mut self, category: PowerUp, ctx: &mut AbilityContext<'_>) -> bool {
        self.power_up
            .apply(category, Some(&mut self.abilities), &mut self.state, ctx)
    }

    pub fn activate_ability(
        &mut self,
        kind: AbilityKind,
        target: Option<EntityId>,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        self.abilities
            .activate_ability(kind, &mut self.state, target, ctx)
    }

    pub fn activate_ability_by_index(
        &mut self,
        index: usize,
        target: Option<EntityId>,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        self.abilities
            .activate_ability_by_index(index, &mut self.state, target, ctx)
    }

    /// End an ability's persistent effect by hand. Ending the ability behind
    /// the current power-up drops the character back to [`PowerUp::Small`].
    pub fn deactivate_ability(&mut self, kind: AbilityKind, ctx: &mut AbilityContext<'_>) -> bool {
        let ended = self
            .abilities
            .deactivate_ability(kind, &mut self.state, ctx);
        if ended {
            self.power_up.end_current(kind);
        }
        ended
    }

    /// Dispatch a fired effect timer. When the aegis charm runs out the
    /// character drops back to [`PowerUp::Small`].
    pub fn handle_effect_expired(
        &mut self,
        expired: EffectExpired,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        let ended = self
            .abilities
            .handle_effect_expired(expired, &mut self.state, ctx);
        if ended {
            self.power_up.end_current(expired.ability);
        }
        ended
    }

    /// Count a pickup. Returns `true` when it earned the level's extra life.
    pub fn add_collection(&mut self, amount: u32, sink: &mut dyn NotificationSink) -> bool {
        let granted = self.collections.add(amount);
        sink.notify(GameplayEventKind::CollectionAdded {
            count: self.collections.count(),
        });
        if granted {
            self.lives = self.lives.saturating_add(1);
            sink.notify(GameplayEventKind::ExtraLifeGranted { lives: self.lives });
            tracing::info!(entity = %self.id(), lives = self.lives, "extra life granted");
        }
        granted
    }

    /// Start a new level's collection count.
    pub fn reset_collections(&mut self) {
        self.collections.reset();
    }

    /// Feed this step's vertical velocity through `fall` and apply any
    /// resulting damage. Returns the damage actually dealt.
    pub fn apply_fall_sample(
        &mut self,
        fall: &FallDamage,
        delta: f32,
        sink: &mut dyn NotificationSink,
    ) -> f32 {
        let damage = fall.accumulate(self.vertical_velocity, delta, &mut self.fall_accumulator);
        if damage <= 0.0 {
            return 0.0;
        }
        tracing::debug!(entity = %self.id(), damage, "landed from a fall");
        self.take_damage(damage, sink)
    }
}
