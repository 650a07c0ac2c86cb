//! Invincibility and shield state machine
//!
//! Expiries are stored as timestamps and polled once per tick, so the state
//! only changes inside `tick` and a test can drive it with any clock values.

use serde::{Deserialize, Serialize};

use super::state::ItemKind;
use crate::tuning::Tuning;

/// Observable status of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectState {
    Normal,
    /// Post-hit grace period, obstacles pass through
    Invincible,
    /// At least one shield charge is active
    Shielded,
}

/// Result of an obstacle reaching the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Player was invincible, nothing happened
    Ignored,
    /// A shield charge took the hit
    Absorbed,
    /// A life was lost and a grace period started
    Damaged,
    /// The last life was lost
    Fatal,
}

/// Shield charges and the expiry of the charge currently in use
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShieldState {
    charges: u8,
    /// Set exactly while `charges > 0`
    expires_at: Option<f64>,
}

impl ShieldState {
    pub fn charges(&self) -> u8 {
        self.charges
    }

    pub fn expires_at(&self) -> Option<f64> {
        self.expires_at
    }

    pub fn is_active(&self) -> bool {
        self.charges > 0
    }

    /// Milliseconds left on the active charge
    pub fn remaining_ms(&self, now_ms: f64) -> Option<f64> {
        self.expires_at
            .map(|at| at - now_ms)
            .filter(|remaining| *remaining > 0.0)
    }

    /// Use up the active charge and arm the next one if any remain
    fn consume(&mut self, now_ms: f64, duration_ms: f64) {
        self.charges = self.charges.saturating_sub(1);
        self.expires_at = if self.charges > 0 {
            Some(now_ms + duration_ms)
        } else {
            None
        };
    }
}

/// Timed effects owned by the player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    invincible_until: Option<f64>,
    shield: ShieldState,
}

impl StatusEffects {
    pub fn is_invincible(&self) -> bool {
        self.invincible_until.is_some()
    }

    pub fn is_shielded(&self) -> bool {
        self.shield.is_active()
    }

    pub fn shield(&self) -> &ShieldState {
        &self.shield
    }

    pub fn invincible_until(&self) -> Option<f64> {
        self.invincible_until
    }

    pub fn state(&self) -> EffectState {
        if self.is_shielded() {
            EffectState::Shielded
        } else if self.is_invincible() {
            EffectState::Invincible
        } else {
            EffectState::Normal
        }
    }

    /// Start (or extend) a grace period lasting `duration_ms` from `now_ms`
    fn grant_invincibility(&mut self, now_ms: f64, duration_ms: f64) {
        let until = now_ms + duration_ms;
        self.invincible_until = Some(self.invincible_until.map_or(until, |t| t.max(until)));
    }

    /// Resolve an obstacle collision
    pub fn on_obstacle_hit(&mut self, now_ms: f64, lives: &mut u8, tuning: &Tuning) -> HitOutcome {
        if self.is_invincible() {
            return HitOutcome::Ignored;
        }

        if self.is_shielded() {
            self.shield.consume(now_ms, tuning.shield_duration_ms);
            self.grant_invincibility(now_ms, tuning.shield_hit_grace_ms);
            return HitOutcome::Absorbed;
        }

        *lives = lives.saturating_sub(1);
        if *lives == 0 {
            return HitOutcome::Fatal;
        }
        self.grant_invincibility(now_ms, tuning.invincibility_ms);
        HitOutcome::Damaged
    }

    /// Add a shield charge; returns false when already at the cap
    pub fn add_shield_charge(&mut self, now_ms: f64, tuning: &Tuning) -> bool {
        if self.shield.charges >= tuning.max_shield_charges {
            return false;
        }
        let was_active = self.shield.is_active();
        self.shield.charges += 1;
        if !was_active {
            self.shield.expires_at = Some(now_ms + tuning.shield_duration_ms);
        }
        true
    }

    /// Apply a picked-up item; returns whether it changed anything
    pub fn apply_item(
        &mut self,
        kind: ItemKind,
        now_ms: f64,
        lives: &mut u8,
        tuning: &Tuning,
    ) -> bool {
        match kind {
            ItemKind::Life => {
                if *lives < tuning.max_lives {
                    *lives += 1;
                    true
                } else {
                    false
                }
            }
            ItemKind::Shield => self.add_shield_charge(now_ms, tuning),
        }
    }

    /// Expire whatever has run out by `now_ms`
    pub fn update(&mut self, now_ms: f64, tuning: &Tuning) {
        if self.invincible_until.is_some_and(|until| now_ms >= until) {
            self.invincible_until = None;
        }

        if self.shield.expires_at.is_some_and(|at| now_ms > at) {
            self.shield.consume(now_ms, tuning.shield_duration_ms);
        }
    }
}
