//! A single ability: its cooldown state machine and activation contract.
//!
//! ```text
//! Idle --activate--> Active --(same call)--> OnCooldown --cooldown over--> Idle
//!   \                                                                    /
//!    `---------------- Blocked (forced externally) ---------------------'
//! ```
//!
//! `activate` runs both the activation hook and the synchronous deactivation
//! hook before it returns, so an ability never rests in `Active`. Effects
//! that must persist (invincibility, buffs) start inside `on_activate` and
//! are torn down later through [`AbilityBehavior::end_effect`], driven by
//! their own timer or by whoever replaces them.

use std::fmt;

use nt_core::{EntityId, GameplayEventKind};

use crate::actor::Instigator;
use crate::context::AbilityContext;

/// Cooldown given to abilities that don't specify one (seconds).
pub const DEFAULT_COOLDOWN: f32 = 0.5;

/// Where an ability is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AbilityState {
    /// Ready to activate once any cooldown has run out.
    #[default]
    Idle,
    /// Inside an `activate` call.
    Active,
    /// Waiting for the cooldown to run out.
    OnCooldown,
    /// Forced unavailable from outside, regardless of cooldown.
    Blocked,
}

impl fmt::Display for AbilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "not active"),
            Self::Active => write!(f, "active"),
            Self::OnCooldown => write!(f, "on cooldown"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// Stable tag identifying an ability type. An ability component holds at
/// most one ability per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    /// Growth and bonus health.
    VigorSeed,
    /// Growth and bonus health (legacy name).
    Mushroom,
    /// Damage multiplier.
    InfernoShard,
    /// Damage multiplier (legacy name).
    FireFlower,
    /// Timed invincibility.
    AegisCharm,
    /// Timed invincibility (legacy name).
    StarInvincibility,
    /// A host-defined ability, inserted pre-built.
    Custom(&'static str),
}

impl AbilityKind {
    /// Every kind the ability component can construct from its tag alone.
    pub const BUILT_IN: [AbilityKind; 6] = [
        Self::VigorSeed,
        Self::Mushroom,
        Self::InfernoShard,
        Self::FireFlower,
        Self::AegisCharm,
        Self::StarInvincibility,
    ];
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VigorSeed => write!(f, "Vigor Seed"),
            Self::Mushroom => write!(f, "Mushroom Power-Up"),
            Self::InfernoShard => write!(f, "Inferno Shard Power-Up"),
            Self::FireFlower => write!(f, "Fire Flower Power-Up"),
            Self::AegisCharm => write!(f, "Aegis Charm"),
            Self::StarInvincibility => write!(f, "Star Invincibility"),
            Self::Custom(name) => write!(f, "{name}"),
        }
    }
}

/// What an ability actually does.
///
/// All hooks default to doing nothing and succeeding, which suits abilities
/// whose whole effect is the cooldown bookkeeping.
pub trait AbilityBehavior: fmt::Debug + Send {
    /// Start the effect. Returning `false` reports failure; the hook must
    /// leave everything untouched in that case.
    fn on_activate(
        &mut self,
        _instigator: &mut dyn Instigator,
        _target: Option<EntityId>,
        _ctx: &mut AbilityContext<'_>,
    ) -> bool {
        true
    }

    /// Runs synchronously right after a successful `on_activate`, on the
    /// same `activate` call.
    fn on_deactivate(&mut self, _instigator: &mut dyn Instigator, _ctx: &mut AbilityContext<'_>) {}

    /// Tear down a persistent effect (manual deactivation, timer expiry,
    /// or replacement).
    fn end_effect(&mut self, _instigator: &mut dyn Instigator, _ctx: &mut AbilityContext<'_>) {}

    /// Whether a persistent effect is currently applied.
    fn is_effect_active(&self) -> bool {
        false
    }
}

/// A behavior with no effect of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoEffect;

impl AbilityBehavior for NoEffect {}

/// One ability owned by an ability component slot.
#[derive(Debug)]
pub struct Ability {
    /// Display name.
    pub name: String,
    /// Seconds after activation before the ability can be used again.
    pub cooldown_duration: f32,
    /// Cost to activate; 0 = free. Informational, the core charges nothing.
    pub activation_cost: f32,
    /// Damage this ability deals; 0 = none.
    pub damage_amount: f32,
    /// Activation fails without a target.
    pub requires_target: bool,
    kind: AbilityKind,
    state: AbilityState,
    cooldown_end_time: f64,
    behavior: Box<dyn AbilityBehavior>,
}

impl Ability {
    /// A new idle ability of `kind` driven by `behavior`.
    pub fn new(kind: AbilityKind, behavior: impl AbilityBehavior + 'static) -> Self {
        Self {
            name: kind.to_string(),
            cooldown_duration: DEFAULT_COOLDOWN,
            activation_cost: 0.0,
            damage_amount: 0.0,
            requires_target: false,
            kind,
            state: AbilityState::Idle,
            cooldown_end_time: 0.0,
            behavior: Box::new(behavior),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_cooldown(mut self, seconds: f32) -> Self {
        self.cooldown_duration = seconds;
        self
    }

    pub fn with_activation_cost(mut self, cost: f32) -> Self {
        self.activation_cost = cost;
        self
    }

    pub fn with_damage_amount(mut self, damage: f32) -> Self {
        self.damage_amount = damage;
        self
    }

    /// Make activation fail when no target is supplied.
    pub fn requiring_target(mut self) -> Self {
        self.requires_target = true;
        self
    }

    pub fn kind(&self) -> AbilityKind {
        self.kind
    }

    pub fn state(&self) -> AbilityState {
        self.state
    }

    /// Simulation time the current cooldown ends (0 = none started).
    pub fn cooldown_end_time(&self) -> f64 {
        self.cooldown_end_time
    }

    pub fn behavior(&self) -> &dyn AbilityBehavior {
        self.behavior.as_ref()
    }

    /// Whether the behavior's persistent effect is applied.
    pub fn is_effect_active(&self) -> bool {
        self.behavior.is_effect_active()
    }

    /// No cooldown remains and the ability is not blocked.
    pub fn can_activate(&self, now: f64) -> bool {
        self.remaining_cooldown(now) <= 0.0 && self.state != AbilityState::Blocked
    }

    /// Seconds of cooldown left at `now`, never negative.
    pub fn remaining_cooldown(&self, now: f64) -> f32 {
        (self.cooldown_end_time - now).max(0.0) as f32
    }

    /// Try to activate at simulation time `now`.
    ///
    /// Refuses without touching state when the ability can't activate or a
    /// required target is missing. Otherwise runs `on_activate`; on success
    /// the cooldown starts and `on_deactivate` runs before this returns.
    /// The ability ends up `OnCooldown` whether or not the hook succeeded.
    pub fn activate(
        &mut self,
        now: f64,
        instigator: &mut dyn Instigator,
        target: Option<EntityId>,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        if !self.can_activate(now) {
            tracing::trace!(ability = %self.kind, "activation refused: not ready");
            return false;
        }
        if self.requires_target && target.is_none() {
            tracing::trace!(ability = %self.kind, "activation refused: no target");
            return false;
        }

        self.state = AbilityState::Active;
        let success = self.behavior.on_activate(instigator, target, ctx);

        if success {
            self.start_cooldown(now);
            self.behavior.on_deactivate(instigator, ctx);
            ctx.events.notify(GameplayEventKind::AbilityActivated {
                ability: self.name.clone(),
            });
            tracing::debug!(ability = %self.kind, entity = %instigator.id(), "ability activated");
        } else {
            tracing::debug!(ability = %self.kind, entity = %instigator.id(), "activation hook failed");
        }

        self.state = AbilityState::OnCooldown;
        success
    }

    /// Tear down the behavior's persistent effect, if one is applied.
    /// Returns whether there was anything to end.
    pub fn end_effect(
        &mut self,
        instigator: &mut dyn Instigator,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        if !self.behavior.is_effect_active() {
            return false;
        }
        self.behavior.end_effect(instigator, ctx);
        ctx.events.notify(GameplayEventKind::AbilityEffectEnded {
            ability: self.name.clone(),
        });
        tracing::debug!(ability = %self.kind, entity = %instigator.id(), "ability effect ended");
        true
    }

    fn start_cooldown(&mut self, now: f64) {
        self.cooldown_end_time = now + f64::from(self.cooldown_duration);
    }

    /// Per-step driver: leave `OnCooldown` once the cooldown has run out.
    pub fn update_cooldown(&mut self, now: f64) {
        if self.state == AbilityState::OnCooldown && self.remaining_cooldown(now) <= 0.0 {
            self.state = AbilityState::Idle;
        }
    }

    /// Clear any cooldown and return to `Idle`.
    pub fn reset_cooldown(&mut self) {
        self.cooldown_end_time = 0.0;
        self.state = AbilityState::Idle;
    }

    /// Force the ability unavailable until [`unblock`](Self::unblock).
    pub fn block(&mut self) {
        self.state = AbilityState::Blocked;
    }

    /// Lift a block. Resumes the cooldown if one is still running.
    pub fn unblock(&mut self, now: f64) {
        if self.state != AbilityState::Blocked {
            return;
        }
        self.state = if self.remaining_cooldown(now) > 0.0 {
            AbilityState::OnCooldown
        } else {
            AbilityState::Idle
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{CharacterState, Prop};
    use crate::context::EffectExpired;
    use nt_core::TimerQueue;

    const STEP: f64 = 1.0 / 60.0;

    #[derive(Debug, Default)]
    struct Counting {
        activations: u32,
        deactivations: u32,
        fail: bool,
    }

    impl AbilityBehavior for Counting {
        fn on_activate(
            &mut self,
            _instigator: &mut dyn Instigator,
            _target: Option<EntityId>,
            _ctx: &mut AbilityContext<'_>,
        ) -> bool {
            self.activations += 1;
            !self.fail
        }

        fn on_deactivate(&mut self, _instigator: &mut dyn Instigator, _ctx: &mut AbilityContext<'_>) {
            self.deactivations += 1;
        }
    }

    fn fixtures() -> (CharacterState, TimerQueue<EffectExpired>, Vec<GameplayEventKind>) {
        (
            CharacterState::new(EntityId::new(), 100.0),
            TimerQueue::new(),
            Vec::new(),
        )
    }

    #[test]
    fn fresh_ability_is_idle_and_ready() {
        let ability = Ability::new(AbilityKind::Custom("slash"), NoEffect);
        assert_eq!(ability.state(), AbilityState::Idle);
        assert!(ability.can_activate(0.0));
        assert_eq!(ability.remaining_cooldown(0.0), 0.0);
        assert_eq!(ability.name, "slash");
        assert_eq!(ability.cooldown_duration, DEFAULT_COOLDOWN);
    }

    #[test]
    fn activation_round_trip_through_cooldown() {
        let (mut hero, mut timers, mut events) = fixtures();
        let mut ctx = AbilityContext::new(&mut timers, &mut events);
        let mut ability = Ability::new(AbilityKind::Custom("slash"), NoEffect).with_cooldown(0.5);

        let mut now = 0.0;
        assert!(ability.activate(now, &mut hero, None, &mut ctx));
        assert_eq!(ability.state(), AbilityState::OnCooldown);
        assert!(!ability.can_activate(now));
        assert!(!ability.activate(now, &mut hero, None, &mut ctx));

        let mut steps = 0;
        while !ability.can_activate(now) {
            now += STEP;
            ability.update_cooldown(now);
            steps += 1;
            assert!(steps <= 31, "cooldown should be over after ~30 steps");
        }
        assert!(now >= 0.5);
        assert_eq!(ability.state(), AbilityState::Idle);
        assert!(ability.activate(now, &mut hero, None, &mut ctx));
    }

    #[test]
    fn deactivation_runs_on_the_same_call() {
        let (mut hero, mut timers, mut events) = fixtures();
        let mut ctx = AbilityContext::new(&mut timers, &mut events);
        let mut ability = Ability::new(AbilityKind::Custom("probe"), Counting::default());
        assert!(ability.activate(0.0, &mut hero, None, &mut ctx));
        let debug = format!("{:?}", ability.behavior());
        assert!(debug.contains("activations: 1"));
        assert!(debug.contains("deactivations: 1"));
    }

    #[test]
    fn failed_hook_skips_cooldown_but_ends_on_cooldown_state() {
        let (mut hero, mut timers, mut events) = fixtures();
        let mut ctx = AbilityContext::new(&mut timers, &mut events);
        let behavior = Counting {
            fail: true,
            ..Default::default()
        };
        let mut ability = Ability::new(AbilityKind::Custom("probe"), behavior);

        assert!(!ability.activate(1.0, &mut hero, None, &mut ctx));
        assert_eq!(ability.state(), AbilityState::OnCooldown);
        assert_eq!(ability.cooldown_end_time(), 0.0);
        assert!(ability.can_activate(1.0));
        assert!(format!("{:?}", ability.behavior()).contains("deactivations: 0"));

        ability.update_cooldown(1.0);
        assert_eq!(ability.state(), AbilityState::Idle);
    }

    #[test]
    fn missing_target_refuses_without_state_change() {
        let (mut hero, mut timers, mut events) = fixtures();
        let mut ctx = AbilityContext::new(&mut timers, &mut events);
        let mut ability = Ability::new(AbilityKind::Custom("bolt"), NoEffect)
            .with_damage_amount(25.0)
            .requiring_target();

        assert!(!ability.activate(0.0, &mut hero, None, &mut ctx));
        assert_eq!(ability.state(), AbilityState::Idle);
        assert!(ability.activate(0.0, &mut hero, Some(EntityId::new()), &mut ctx));
    }

    #[test]
    fn blocked_ability_cannot_activate() {
        let (mut hero, mut timers, mut events) = fixtures();
        let mut ctx = AbilityContext::new(&mut timers, &mut events);
        let mut ability = Ability::new(AbilityKind::Custom("slash"), NoEffect);

        ability.block();
        assert!(!ability.can_activate(100.0));
        assert!(!ability.activate(100.0, &mut hero, None, &mut ctx));
        ability.update_cooldown(100.0);
        assert_eq!(ability.state(), AbilityState::Blocked);

        ability.unblock(100.0);
        assert_eq!(ability.state(), AbilityState::Idle);
        assert!(ability.activate(100.0, &mut hero, None, &mut ctx));
    }

    #[test]
    fn unblock_resumes_running_cooldown() {
        let (mut hero, mut timers, mut events) = fixtures();
        let mut ctx = AbilityContext::new(&mut timers, &mut events);
        let mut ability = Ability::new(AbilityKind::Custom("slash"), NoEffect).with_cooldown(2.0);
        ability.activate(0.0, &mut hero, None, &mut ctx);
        ability.block();
        ability.unblock(1.0);
        assert_eq!(ability.state(), AbilityState::OnCooldown);
    }

    #[test]
    fn reset_cooldown_makes_ready() {
        let (mut hero, mut timers, mut events) = fixtures();
        let mut ctx = AbilityContext::new(&mut timers, &mut events);
        let mut ability = Ability::new(AbilityKind::Custom("slash"), NoEffect).with_cooldown(30.0);
        ability.activate(0.0, &mut hero, None, &mut ctx);
        assert!((ability.remaining_cooldown(10.0) - 20.0).abs() < 1e-4);
        ability.reset_cooldown();
        assert_eq!(ability.state(), AbilityState::Idle);
        assert!(ability.can_activate(10.0));
    }

    #[test]
    fn successful_activation_notifies() {
        let (mut hero, mut timers, mut events) = fixtures();
        {
            let mut ctx = AbilityContext::new(&mut timers, &mut events);
            let mut ability = Ability::new(AbilityKind::Custom("slash"), NoEffect);
            ability.activate(0.0, &mut hero, None, &mut ctx);
        }
        assert_eq!(
            events,
            vec![GameplayEventKind::AbilityActivated {
                ability: "slash".into()
            }]
        );
    }

    #[test]
    fn default_hooks_work_for_any_instigator() {
        let mut prop = Prop::new();
        let mut timers: TimerQueue<EffectExpired> = TimerQueue::new();
        let mut events: Vec<GameplayEventKind> = Vec::new();
        let mut ctx = AbilityContext::new(&mut timers, &mut events);
        let mut ability = Ability::new(AbilityKind::Custom("lever"), NoEffect);
        assert!(ability.activate(0.0, &mut prop, None, &mut ctx));
        assert!(!ability.end_effect(&mut prop, &mut ctx));
    }

    #[test]
    fn kind_names() {
        assert_eq!(AbilityKind::AegisCharm.to_string(), "Aegis Charm");
        assert_eq!(AbilityKind::Custom("dash").to_string(), "dash");
        assert_eq!(AbilityState::Idle.to_string(), "not active");
    }
}
