use serde::{Deserialize, Serialize};

use nt_abilities::AbilityTuning;
use nt_abilities::power_up::DEFAULT_COLLECTION_THRESHOLD;
use nt_core::FallDamage;
use nt_core::attribute::DEFAULT_MAX_HEALTH;

use crate::error::{SimError, SimResult};

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seconds covered by one simulation step.
    pub fixed_delta: f32,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Health cap of newly spawned characters.
    pub max_health: f32,
    /// Collections per level needed for an extra life.
    pub extra_life_threshold: u32,
    /// Lives newly spawned characters start with.
    pub starting_lives: u32,
    /// Fall damage tuning.
    pub fall_damage: FallDamage,
    /// Tuning for the built-in abilities.
    pub abilities: AbilityTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_delta: 1.0 / 60.0,
            max_events: 0,
            max_health: DEFAULT_MAX_HEALTH,
            extra_life_threshold: DEFAULT_COLLECTION_THRESHOLD,
            starting_lives: 3,
            fall_damage: FallDamage::default(),
            abilities: AbilityTuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON configuration. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        if !self.fixed_delta.is_finite() || self.fixed_delta <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "fixed_delta must be > 0, got {}",
                self.fixed_delta
            )));
        }
        if !self.max_health.is_finite() || self.max_health <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "max_health must be > 0, got {}",
                self.max_health
            )));
        }
        if self.extra_life_threshold == 0 {
            return Err(SimError::InvalidConfig(
                "extra_life_threshold must be > 0".into(),
            ));
        }
        if self.fall_damage.threshold < 0.0 || self.fall_damage.multiplier < 0.0 {
            return Err(SimError::InvalidConfig(
                "fall_damage threshold and multiplier must be >= 0".into(),
            ));
        }
        self.abilities.validate().map_err(SimError::InvalidConfig)
    }

    /// Set the step length in seconds.
    pub fn with_fixed_delta(mut self, seconds: f32) -> Self {
        self.fixed_delta = seconds;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set the health cap of newly spawned characters.
    pub fn with_max_health(mut self, max_health: f32) -> Self {
        self.max_health = max_health;
        self
    }

    /// Set how many collections earn an extra life.
    pub fn with_extra_life_threshold(mut self, threshold: u32) -> Self {
        self.extra_life_threshold = threshold;
        self
    }

    /// Set the starting lives of newly spawned characters.
    pub fn with_starting_lives(mut self, lives: u32) -> Self {
        self.starting_lives = lives;
        self
    }

    /// Set the fall damage tuning.
    pub fn with_fall_damage(mut self, fall_damage: FallDamage) -> Self {
        self.fall_damage = fall_damage;
        self
    }

    /// Set the ability tuning.
    pub fn with_abilities(mut self, abilities: AbilityTuning) -> Self {
        self.abilities = abilities;
        self
    }
}
