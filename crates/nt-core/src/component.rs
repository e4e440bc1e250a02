use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeKind, AttributeSet};
use crate::event::{GameplayEventKind, NotificationSink};

/// Owns a character's [`AttributeSet`] and is the only way to mutate it.
///
/// Damage and healing go through [`take_damage`](Self::take_damage) and
/// [`heal`](Self::heal), which report health changes and death to a
/// [`NotificationSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeComponent {
    set: AttributeSet,
    previous_health: f32,
}

impl Default for AttributeComponent {
    fn default() -> Self {
        Self::new(crate::attribute::DEFAULT_MAX_HEALTH)
    }
}

impl AttributeComponent {
    /// Create a component with an initialized set at full health.
    pub fn new(max_health: f32) -> Self {
        let set = AttributeSet::new(max_health);
        let previous_health = set.health.current_value;
        Self {
            set,
            previous_health,
        }
    }

    /// Apply damage. Returns the damage actually dealt.
    ///
    /// The dead take no damage. A `HealthChanged` notification follows any
    /// damage above zero, and a `Died` notification follows the hit that
    /// brings health to zero.
    pub fn take_damage(&mut self, amount: f32, sink: &mut dyn NotificationSink) -> f32 {
        if self.is_dead() {
            return 0.0;
        }

        self.previous_health = self.set.health.current_value;
        let actual = self.set.take_damage(amount);

        if actual > 0.0 {
            self.notify_health_changed(sink);
            if self.is_dead() {
                tracing::debug!(damage = actual, "attribute component died");
                sink.notify(GameplayEventKind::Died);
            }
        }

        actual
    }

    /// Apply healing. Returns the amount actually healed.
    pub fn heal(&mut self, amount: f32, sink: &mut dyn NotificationSink) -> f32 {
        if self.is_dead() {
            return 0.0;
        }

        self.previous_health = self.set.health.current_value;
        let actual = self.set.heal(amount);

        if actual > 0.0 {
            self.notify_health_changed(sink);
        }

        actual
    }

    /// Replace the health cap. Non-positive caps are ignored.
    ///
    /// Re-initializes the whole set, so this also restores health to the
    /// new cap and resets damage and movement speed to their defaults.
    pub fn set_max_health(&mut self, max_health: f32) {
        if max_health <= 0.0 {
            return;
        }
        self.set.max_health = max_health;
        self.set.initialize();
        self.previous_health = self.set.health.current_value;
    }

    /// Replace an attribute's base value.
    pub fn set_base_value(&mut self, kind: AttributeKind, value: f32) {
        self.set.get_mut(kind).set_base_value(value);
    }

    fn notify_health_changed(&self, sink: &mut dyn NotificationSink) {
        let new_health = self.set.health.current_value;
        sink.notify(GameplayEventKind::HealthChanged {
            new_health,
            old_health: self.previous_health,
            delta: new_health - self.previous_health,
        });
    }

    pub fn health(&self) -> f32 {
        self.set.health.current_value
    }

    pub fn max_health(&self) -> f32 {
        self.set.max_health()
    }

    pub fn health_percentage(&self) -> f32 {
        self.set.health_percentage()
    }

    pub fn is_dead(&self) -> bool {
        self.set.is_dead()
    }

    pub fn is_alive(&self) -> bool {
        self.set.is_alive()
    }

    /// Health before the most recent damage, heal, or cap change.
    pub fn previous_health(&self) -> f32 {
        self.previous_health
    }

    /// Current value of the damage attribute.
    pub fn damage(&self) -> f32 {
        self.set.damage.value()
    }

    pub fn attribute(&self, kind: AttributeKind) -> &Attribute {
        self.set.get(kind)
    }

    /// Read-only view of the owned set.
    pub fn attribute_set(&self) -> &AttributeSet {
        &self.set
    }
}
