//! Fall damage from accumulated downward velocity.
//!
//! While an entity falls, `|velocity_z| * delta_time` is accumulated into a
//! caller-owned value. The step the entity stops falling, the accumulated
//! value is converted into damage and the accumulator is reset.

use serde::{Deserialize, Serialize};

/// Accumulated fall value at or below which no damage is dealt (cm).
pub const FALL_DAMAGE_THRESHOLD: f32 = 1000.0;

/// Damage per unit of accumulated fall value above the threshold.
pub const FALL_DAMAGE_MULTIPLIER: f32 = 0.1;

/// Fall damage tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallDamage {
    /// Accumulated value that must be exceeded before damage applies.
    pub threshold: f32,
    /// Damage per unit of accumulated value above `threshold`.
    pub multiplier: f32,
}

impl Default for FallDamage {
    fn default() -> Self {
        Self {
            threshold: FALL_DAMAGE_THRESHOLD,
            multiplier: FALL_DAMAGE_MULTIPLIER,
        }
    }
}

impl FallDamage {
    /// Set the damage threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the damage multiplier.
    pub fn with_multiplier(mut self, multiplier: f32) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Feed one velocity sample into `accumulator`.
    ///
    /// Falling (`velocity_z < 0`) accumulates and returns 0. Anything else
    /// converts the accumulator to damage, resets it, and returns the damage.
    pub fn accumulate(&self, velocity_z: f32, delta_time: f32, accumulator: &mut f32) -> f32 {
        if velocity_z < 0.0 {
            *accumulator += velocity_z.abs() * delta_time;
            return 0.0;
        }

        let damage = self.compute_damage(*accumulator);
        *accumulator = 0.0;
        damage
    }

    /// Damage for an accumulated fall value.
    pub fn compute_damage(&self, accumulated: f32) -> f32 {
        if accumulated <= self.threshold {
            return 0.0;
        }
        (accumulated - self.threshold) * self.multiplier
    }
}

/// [`FallDamage::accumulate`] with the default tuning.
pub fn accumulate_fall_damage(velocity_z: f32, delta_time: f32, accumulator: &mut f32) -> f32 {
    FallDamage::default().accumulate(velocity_z, delta_time, accumulator)
}
