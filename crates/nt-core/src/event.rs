use std::fmt;

use serde::Serialize;

use crate::entity::EntityId;

/// What kind of gameplay notification occurred.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameplayEventKind {
    // Attributes
    /// Health changed through damage or healing.
    HealthChanged {
        /// Health after the change.
        new_health: f32,
        /// Health before the change.
        old_health: f32,
        /// `new_health - old_health`.
        delta: f32,
    },
    /// Health reached zero.
    Died,
    /// Invincibility absorbed incoming damage.
    DamageBlocked {
        /// The damage that was absorbed.
        amount: f32,
    },

    // Abilities
    /// An ability completed a successful activation.
    AbilityActivated {
        /// Display name of the ability.
        ability: String,
    },
    /// A persistent ability effect was torn down.
    AbilityEffectEnded {
        /// Display name of the ability.
        ability: String,
    },
    /// The invincibility flag was switched on or off.
    InvincibilityChanged {
        /// The new flag value.
        active: bool,
    },

    // Power-ups and collectibles
    /// A power-up category was applied.
    PowerUpApplied {
        /// Name of the power-up category.
        power_up: String,
    },
    /// A collectible was picked up.
    CollectionAdded {
        /// Collectibles gathered this level.
        count: u32,
    },
    /// The per-level collection bonus was granted.
    ExtraLifeGranted {
        /// Lives after the grant.
        lives: u32,
    },
}

impl fmt::Display for GameplayEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HealthChanged {
                new_health,
                old_health,
                delta,
            } => write!(f, "health {old_health:.1} -> {new_health:.1} ({delta:+.1})"),
            Self::Died => write!(f, "died"),
            Self::DamageBlocked { amount } => write!(f, "invincibility blocked {amount:.1} damage"),
            Self::AbilityActivated { ability } => write!(f, "{ability} activated"),
            Self::AbilityEffectEnded { ability } => write!(f, "{ability} ended"),
            Self::InvincibilityChanged { active: true } => write!(f, "became invincible"),
            Self::InvincibilityChanged { active: false } => write!(f, "vulnerable again"),
            Self::PowerUpApplied { power_up } => write!(f, "power-up applied: {power_up}"),
            Self::CollectionAdded { count } => write!(f, "collected {count} this level"),
            Self::ExtraLifeGranted { lives } => write!(f, "extra life granted ({lives} lives)"),
        }
    }
}

/// Receives gameplay notifications.
///
/// UI, audio and VFX hang off this; the core never prints or depends on a
/// global logger to report gameplay outcomes.
pub trait NotificationSink {
    /// Deliver one notification.
    fn notify(&mut self, event: GameplayEventKind);
}

impl NotificationSink for Vec<GameplayEventKind> {
    fn notify(&mut self, event: GameplayEventKind) {
        self.push(event);
    }
}

/// A record of a notification, stamped with when and to whom it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameplayEvent {
    /// The simulation tick when this event occurred.
    pub tick: u64,
    /// The entity the event concerns.
    pub entity: EntityId,
    /// The specific kind of event that occurred.
    pub kind: GameplayEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl GameplayEvent {
    /// Create a new event; the description is derived from `kind`.
    pub fn new(tick: u64, entity: EntityId, kind: GameplayEventKind) -> Self {
        let description = kind.to_string();
        Self {
            tick,
            entity,
            kind,
            description,
        }
    }
}

/// Accumulates events during a simulation run.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<GameplayEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: GameplayEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// A sink that records notifications for `entity` at `tick`.
    pub fn scoped(&mut self, entity: EntityId, tick: u64) -> ScopedSink<'_> {
        ScopedSink {
            log: self,
            entity,
            tick,
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[GameplayEvent] {
        &self.events
    }

    /// Return all events that occurred at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&GameplayEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all events concerning the given entity.
    pub fn events_for_entity(&self, id: EntityId) -> Vec<&GameplayEvent> {
        self.events.iter().filter(|e| e.entity == id).collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Borrowed view of an [`EventLog`] that stamps every notification with a
/// fixed entity and tick.
#[derive(Debug)]
pub struct ScopedSink<'a> {
    log: &'a mut EventLog,
    entity: EntityId,
    tick: u64,
}

impl NotificationSink for ScopedSink<'_> {
    fn notify(&mut self, event: GameplayEventKind) {
        tracing::trace!(entity = %self.entity, tick = self.tick, %event, "gameplay event");
        self.log
            .push(GameplayEvent::new(self.tick, self.entity, event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn died() -> GameplayEventKind {
        GameplayEventKind::Died
    }

    #[test]
    fn scoped_sink_stamps_entity_and_tick() {
        let mut log = EventLog::new(0);
        let id = EntityId::new();
        log.scoped(id, 7).notify(died());
        assert_eq!(log.len(), 1);
        assert_eq!(log.events()[0].tick, 7);
        assert_eq!(log.events()[0].entity, id);
        assert_eq!(log.events_at_tick(7).len(), 1);
        assert_eq!(log.events_for_entity(id).len(), 1);
    }

    #[test]
    fn event_log_max_events_trims() {
        let mut log = EventLog::new(2);
        let id = EntityId::new();
        for tick in 0..5 {
            log.scoped(id, tick).notify(died());
        }
        assert_eq!(log.len(), 2);
        // Oldest events were dropped, newest remain
        assert_eq!(log.events()[0].tick, 3);
        assert_eq!(log.events()[1].tick, 4);
    }

    #[test]
    fn event_log_filters_by_entity() {
        let mut log = EventLog::new(0);
        let a = EntityId::new();
        let b = EntityId::new();
        log.scoped(a, 1).notify(died());
        log.scoped(b, 1)
            .notify(GameplayEventKind::DamageBlocked { amount: 5.0 });
        log.scoped(a, 2)
            .notify(GameplayEventKind::CollectionAdded { count: 1 });

        assert_eq!(log.events_at_tick(1).len(), 2);
        assert_eq!(log.events_for_entity(a).len(), 2);
        assert_eq!(log.events_for_entity(b).len(), 1);
    }

    #[test]
    fn event_log_clear() {
        let mut log = EventLog::new(0);
        log.scoped(EntityId::new(), 0).notify(died());
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn vec_sink_collects() {
        let mut sink: Vec<GameplayEventKind> = Vec::new();
        sink.notify(died());
        assert_eq!(sink, vec![GameplayEventKind::Died]);
    }

    #[test]
    fn health_change_description() {
        let kind = GameplayEventKind::HealthChanged {
            new_health: 50.0,
            old_health: 100.0,
            delta: -50.0,
        };
        insta::assert_snapshot!(kind.to_string(), @"health 100.0 -> 50.0 (-50.0)");
    }

    #[test]
    fn status_descriptions() {
        let lines = [
            GameplayEventKind::DamageBlocked { amount: 50.0 },
            GameplayEventKind::InvincibilityChanged { active: false },
            GameplayEventKind::ExtraLifeGranted { lives: 4 },
        ]
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
        insta::assert_snapshot!(lines, @r"
        invincibility blocked 50.0 damage
        vulnerable again
        extra life granted (4 lives)
        ");
    }
}
