//! Raw numeric attributes and the attribute set that owns them.
//!
//! An [`Attribute`] carries a base value and a current value. There is no
//! modifier stack: changing the base value recomputes the current value
//! directly, and damage/healing adjust the current value in place.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum health a freshly created attribute set starts with.
pub const DEFAULT_MAX_HEALTH: f32 = 100.0;
/// Damage value restored by [`AttributeSet::initialize`].
pub const DEFAULT_DAMAGE: f32 = 10.0;
/// Movement speed multiplier restored by [`AttributeSet::initialize`].
pub const DEFAULT_MOVEMENT_SPEED: f32 = 1.0;

/// A single numeric gameplay stat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Effective value used by gameplay.
    pub current_value: f32,
    /// Value the current value is recomputed from.
    pub base_value: f32,
}

impl Attribute {
    /// Create an attribute whose current value equals `base`.
    pub fn new(base: f32) -> Self {
        Self {
            current_value: base,
            base_value: base,
        }
    }

    /// The effective value.
    pub fn value(&self) -> f32 {
        self.current_value
    }

    /// Replace the base value and recompute the current value from it.
    pub fn set_base_value(&mut self, base: f32) {
        self.base_value = base;
        self.recalculate();
    }

    /// Recompute the current value from the base value.
    pub fn recalculate(&mut self) {
        self.current_value = self.base_value;
    }

    /// Restrict the current value to `[min, max]`.
    ///
    /// Does not panic on an inverted range; `min` wins in that case.
    pub fn clamp(&mut self, min: f32, max: f32) {
        self.current_value = self.current_value.min(max).max(min);
    }
}

/// Names the attributes in an [`AttributeSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Hit points.
    Health,
    /// Outgoing damage.
    Damage,
    /// Movement speed multiplier.
    MovementSpeed,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Health => write!(f, "health"),
            Self::Damage => write!(f, "damage"),
            Self::MovementSpeed => write!(f, "movement speed"),
        }
    }
}

/// The character stats: health, damage, and movement speed, plus the
/// health cap.
///
/// Invariant: `0 <= health.current_value <= max_health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    /// Hit points.
    pub health: Attribute,
    /// Outgoing damage.
    pub damage: Attribute,
    /// Movement speed multiplier.
    pub movement_speed: Attribute,
    pub(crate) max_health: f32,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEALTH)
    }
}

impl AttributeSet {
    /// Create an initialized set with the given health cap.
    pub fn new(max_health: f32) -> Self {
        let mut set = Self {
            health: Attribute::default(),
            damage: Attribute::default(),
            movement_speed: Attribute::default(),
            max_health,
        };
        set.initialize();
        set
    }

    /// Reset every attribute to its default. Health is seeded from the
    /// current health cap, so this is a full heal.
    pub fn initialize(&mut self) {
        self.health.set_base_value(self.max_health);
        self.damage.set_base_value(DEFAULT_DAMAGE);
        self.movement_speed.set_base_value(DEFAULT_MOVEMENT_SPEED);
    }

    /// Subtract up to `amount` from health. Returns the damage actually
    /// dealt; non-positive amounts deal nothing.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 {
            return 0.0;
        }

        let actual = amount.min(self.health.current_value);
        self.health.current_value -= actual;
        self.health.clamp(0.0, self.max_health);
        actual
    }

    /// Add up to `amount` to health without exceeding the cap. Returns the
    /// amount actually healed. The dead cannot be healed.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 || self.is_dead() {
            return 0.0;
        }

        let actual = amount.min(self.max_health - self.health.current_value).max(0.0);
        self.health.current_value += actual;
        self.health.clamp(0.0, self.max_health);
        actual
    }

    /// Health has reached zero.
    pub fn is_dead(&self) -> bool {
        self.health.current_value <= 0.0
    }

    /// Health is above zero.
    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// Current health as a fraction of the cap, or 0 when the cap is not
    /// positive.
    pub fn health_percentage(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        self.health.current_value / self.max_health
    }

    /// The health cap.
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Look up an attribute by kind.
    pub fn get(&self, kind: AttributeKind) -> &Attribute {
        match kind {
            AttributeKind::Health => &self.health,
            AttributeKind::Damage => &self.damage,
            AttributeKind::MovementSpeed => &self.movement_speed,
        }
    }

    pub(crate) fn get_mut(&mut self, kind: AttributeKind) -> &mut Attribute {
        match kind {
            AttributeKind::Health => &mut self.health,
            AttributeKind::Damage => &mut self.damage,
            AttributeKind::MovementSpeed => &mut self.movement_speed,
        }
    }
}
