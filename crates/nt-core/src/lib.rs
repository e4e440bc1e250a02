//! Core gameplay types for Nexus Trials.
//!
//! Everything here is engine-free and deterministic: numeric attributes and
//! the component that guards them, the notification sink gameplay reports
//! through, the fall-damage calculator, and the one-shot timer contract used
//! by effects that outlive a single call.

/// Attributes and the attribute set.
pub mod attribute;
/// The attribute component: damage/heal entry points with notifications.
pub mod component;
/// Entity identifiers.
pub mod entity;
/// Gameplay notifications, sinks, and the event log.
pub mod event;
/// Fall-damage calculator.
pub mod fall;
/// One-shot timer scheduling.
pub mod timer;

pub use attribute::{Attribute, AttributeKind, AttributeSet};
pub use component::AttributeComponent;
pub use entity::EntityId;
pub use event::{EventLog, GameplayEvent, GameplayEventKind, NotificationSink, ScopedSink};
pub use fall::{FallDamage, accumulate_fall_damage};
pub use timer::{Scheduler, TimerHandle, TimerQueue};
