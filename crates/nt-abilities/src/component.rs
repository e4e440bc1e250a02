//! The per-character ability container.

use nt_core::EntityId;

use crate::ability::{Ability, AbilityKind};
use crate::actor::Instigator;
use crate::context::{AbilityContext, EffectExpired};
use crate::tuning::AbilityTuning;

/// Holds a character's abilities, at most one per [`AbilityKind`].
///
/// The component keeps its own elapsed-time counter, advanced by
/// [`tick`](Self::tick); every activation and cooldown check is measured
/// against it. Activation requires a bound owner and only accepts that
/// owner as instigator.
#[derive(Debug)]
pub struct AbilityComponent {
    owner: Option<EntityId>,
    abilities: Vec<Ability>,
    enabled: bool,
    time: f64,
    tuning: AbilityTuning,
}

impl Default for AbilityComponent {
    fn default() -> Self {
        Self::new(AbilityTuning::default())
    }
}

impl AbilityComponent {
    /// An unbound, enabled component. Nothing can be added until an owner
    /// is bound.
    pub fn new(tuning: AbilityTuning) -> Self {
        Self {
            owner: None,
            abilities: Vec::new(),
            enabled: true,
            time: 0.0,
            tuning,
        }
    }

    /// An enabled component bound to `owner`.
    pub fn with_owner(owner: EntityId, tuning: AbilityTuning) -> Self {
        let mut component = Self::new(tuning);
        component.bind_owner(owner);
        component
    }

    pub fn bind_owner(&mut self, owner: EntityId) {
        self.owner = Some(owner);
    }

    pub fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    pub fn tuning(&self) -> &AbilityTuning {
        &self.tuning
    }

    /// Construct and add the built-in ability of `kind`.
    ///
    /// Returns `None` without changing anything when no owner is bound, an
    /// ability of that kind is already present, or `kind` is `Custom`.
    pub fn add_ability(&mut self, kind: AbilityKind) -> Option<&mut Ability> {
        if self.owner.is_none() {
            tracing::warn!(ability = %kind, "add_ability without an owner");
            return None;
        }
        if self.contains(kind) {
            tracing::debug!(ability = %kind, "ability already present");
            return None;
        }
        let ability = self.tuning.build(kind)?;
        self.push(ability)
    }

    /// Add a pre-built ability. Same refusals as
    /// [`add_ability`](Self::add_ability) minus the `Custom` restriction.
    pub fn insert_ability(&mut self, ability: Ability) -> Option<&mut Ability> {
        if self.owner.is_none() || self.contains(ability.kind()) {
            return None;
        }
        self.push(ability)
    }

    fn push(&mut self, ability: Ability) -> Option<&mut Ability> {
        tracing::debug!(ability = %ability.kind(), "ability added");
        self.abilities.push(ability);
        self.abilities.last_mut()
    }

    pub fn contains(&self, kind: AbilityKind) -> bool {
        self.get_ability(kind).is_some()
    }

    pub fn get_ability(&self, kind: AbilityKind) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.kind() == kind)
    }

    pub fn get_ability_mut(&mut self, kind: AbilityKind) -> Option<&mut Ability> {
        self.abilities.iter_mut().find(|a| a.kind() == kind)
    }

    pub fn get_ability_by_index(&self, index: usize) -> Option<&Ability> {
        self.abilities.get(index)
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    /// Abilities in the order they were added.
    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    /// Activate the ability of `kind`. Fails when it is missing, the
    /// component is disabled, or `instigator` is not the bound owner.
    pub fn activate_ability(
        &mut self,
        kind: AbilityKind,
        instigator: &mut dyn Instigator,
        target: Option<EntityId>,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        let index = self.abilities.iter().position(|a| a.kind() == kind);
        match index {
            Some(index) => self.activate_at(index, instigator, target, ctx),
            None => {
                tracing::trace!(ability = %kind, "activation refused: ability missing");
                false
            }
        }
    }

    /// [`activate_ability`](Self::activate_ability) by position.
    pub fn activate_ability_by_index(
        &mut self,
        index: usize,
        instigator: &mut dyn Instigator,
        target: Option<EntityId>,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        if index >= self.abilities.len() {
            return false;
        }
        self.activate_at(index, instigator, target, ctx)
    }

    fn activate_at(
        &mut self,
        index: usize,
        instigator: &mut dyn Instigator,
        target: Option<EntityId>,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        if !self.enabled {
            tracing::trace!("activation refused: abilities disabled");
            return false;
        }
        if self.owner != Some(instigator.id()) {
            tracing::warn!(instigator = %instigator.id(), "activation refused: not the owner");
            return false;
        }
        let now = self.time;
        self.abilities[index].activate(now, instigator, target, ctx)
    }

    /// End the persistent effect of the ability of `kind` by hand.
    /// Returns whether an effect was ended.
    pub fn deactivate_ability(
        &mut self,
        kind: AbilityKind,
        instigator: &mut dyn Instigator,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        if self.owner != Some(instigator.id()) {
            return false;
        }
        self.get_ability_mut(kind)
            .is_some_and(|ability| ability.end_effect(instigator, ctx))
    }

    /// End every live effect, for example when the owner is revived.
    /// Returns how many effects were ended.
    pub fn end_all_effects(
        &mut self,
        instigator: &mut dyn Instigator,
        ctx: &mut AbilityContext<'_>,
    ) -> usize {
        if self.owner != Some(instigator.id()) {
            return 0;
        }
        let mut ended = 0;
        for ability in &mut self.abilities {
            if ability.end_effect(instigator, ctx) {
                ended += 1;
            }
        }
        ended
    }

    /// Dispatch a fired effect timer. Payloads for another owner or a
    /// missing ability are ignored.
    pub fn handle_effect_expired(
        &mut self,
        expired: EffectExpired,
        instigator: &mut dyn Instigator,
        ctx: &mut AbilityContext<'_>,
    ) -> bool {
        if self.owner != Some(expired.entity) {
            return false;
        }
        self.deactivate_ability(expired.ability, instigator, ctx)
    }

    /// Global gate on future activations.
    pub fn set_abilities_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn abilities_enabled(&self) -> bool {
        self.enabled
    }

    /// Per-step driver: advance the clock and let every ability leave its
    /// cooldown.
    pub fn tick(&mut self, delta: f32) {
        self.time += f64::from(delta);
        let now = self.time;
        for ability in &mut self.abilities {
            ability.update_cooldown(now);
        }
    }

    /// Elapsed seconds seen by this component.
    pub fn time(&self) -> f64 {
        self.time
    }
}
