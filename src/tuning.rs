//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a build can be rebalanced
//! from JSON without touching gameplay code. Missing fields fall back to the
//! defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Balance parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_offset: f32,
    pub starting_lives: u8,
    pub max_lives: u8,

    pub invincibility_ms: f64,
    pub shield_hit_grace_ms: f64,
    pub shield_duration_ms: f64,
    pub max_shield_charges: u8,

    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub max_obstacles: usize,

    pub item_size: f32,
    pub item_speed: f32,
    pub item_spawn_interval_ms: f64,
    /// Chance in [0, 1] that an item is a life rather than a shield
    pub item_life_weight: f64,
    pub max_items: usize,

    pub score_rate: f64,
    pub speed_growth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            starting_lives: STARTING_LIVES,
            max_lives: MAX_LIVES,

            invincibility_ms: INVINCIBILITY_DURATION_MS,
            shield_hit_grace_ms: SHIELD_HIT_GRACE_MS,
            shield_duration_ms: SHIELD_DURATION_MS,
            max_shield_charges: MAX_SHIELD_CHARGES,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            max_obstacles: MAX_OBSTACLES,

            item_size: ITEM_SIZE,
            item_speed: ITEM_SPEED,
            item_spawn_interval_ms: ITEM_SPAWN_INTERVAL_MS,
            item_life_weight: ITEM_LIFE_WEIGHT,
            max_items: MAX_ITEMS,

            score_rate: SCORE_RATE,
            speed_growth: SPEED_GROWTH,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Self =
            serde_json::from_str(json).map_err(|e| GameError::TuningParse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), GameError> {
        fn positive(field: &'static str, value: f64) -> Result<(), GameError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(GameError::InvalidTuning {
                    field,
                    reason: "must be positive",
                })
            }
        }

        positive("field_width", self.field_width as f64)?;
        positive("field_height", self.field_height as f64)?;
        positive("player_width", self.player_width as f64)?;
        positive("player_height", self.player_height as f64)?;
        positive("obstacle_width", self.obstacle_width as f64)?;
        positive("obstacle_height", self.obstacle_height as f64)?;
        positive("item_size", self.item_size as f64)?;
        positive("item_speed", self.item_speed as f64)?;
        positive("item_spawn_interval_ms", self.item_spawn_interval_ms)?;
        positive("shield_duration_ms", self.shield_duration_ms)?;
        positive("score_rate", self.score_rate)?;

        if self.player_width > self.field_width
            || self.obstacle_width > self.field_width
            || self.item_size > self.field_width
        {
            return Err(GameError::InvalidTuning {
                field: "field_width",
                reason: "must fit the player, obstacles and items",
            });
        }
        if self.max_lives == 0 || self.starting_lives == 0 || self.starting_lives > self.max_lives {
            return Err(GameError::InvalidTuning {
                field: "starting_lives",
                reason: "must be within 1..=max_lives",
            });
        }
        if self.max_obstacles == 0 || self.max_items == 0 {
            return Err(GameError::InvalidTuning {
                field: "max_obstacles",
                reason: "entity caps must be non-zero",
            });
        }
        if !(0.0..=1.0).contains(&self.item_life_weight) {
            return Err(GameError::InvalidTuning {
                field: "item_life_weight",
                reason: "must be within [0, 1]",
            });
        }
        if self.speed_growth < 0.0 || self.invincibility_ms < 0.0 || self.shield_hit_grace_ms < 0.0
        {
            return Err(GameError::InvalidTuning {
                field: "speed_growth",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}
