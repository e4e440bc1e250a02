//! The acting entity as seen by abilities.

use nt_core::{AttributeComponent, EntityId};

/// Whoever performs an activation.
///
/// Behaviors resolve the instigator with [`as_character_mut`]; an
/// instigator that is not a character makes every built-in behavior refuse
/// to activate.
///
/// [`as_character_mut`]: Instigator::as_character_mut
pub trait Instigator {
    /// Stable identity used for weak back-references.
    fn id(&self) -> EntityId;

    /// Resolve to the character state, if this instigator is a character.
    fn as_character_mut(&mut self) -> Option<&mut CharacterState> {
        None
    }
}

/// Ability-facing state of a character: attributes, the invincibility
/// flag consulted by the damage entry point, and visual scale.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterState {
    id: EntityId,
    /// The character's attributes.
    pub attributes: AttributeComponent,
    invincible: bool,
    scale: [f32; 3],
}

impl CharacterState {
    /// A fresh character at full health with unit scale.
    pub fn new(id: EntityId, max_health: f32) -> Self {
        Self {
            id,
            attributes: AttributeComponent::new(max_health),
            invincible: false,
            scale: [1.0; 3],
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// Set the flag the damage entry point checks before applying damage.
    pub fn set_invincible(&mut self, invincible: bool) {
        self.invincible = invincible;
    }

    pub fn scale(&self) -> [f32; 3] {
        self.scale
    }

    pub fn set_scale(&mut self, scale: [f32; 3]) {
        self.scale = scale;
    }
}

impl Instigator for CharacterState {
    fn id(&self) -> EntityId {
        self.id
    }

    fn as_character_mut(&mut self) -> Option<&mut CharacterState> {
        Some(self)
    }
}

/// A non-character instigator such as a trap or scripted trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prop {
    /// Identity of the prop.
    pub id: EntityId,
}

impl Prop {
    /// A prop with a fresh id.
    pub fn new() -> Self {
        Self { id: EntityId::new() }
    }
}

impl Default for Prop {
    fn default() -> Self {
        Self::new()
    }
}

impl Instigator for Prop {
    fn id(&self) -> EntityId {
        self.id
    }
}
