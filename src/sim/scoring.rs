//! Time-based score and the obstacle speed ramp

use super::state::GameState;

/// Score as shown to the player
#[inline]
pub fn display_score(score: f64) -> u32 {
    score.max(0.0).floor() as u32
}

/// Score after surviving another `delta_ms`
#[inline]
pub fn accumulate(score: f64, delta_ms: f64, rate: f64) -> f64 {
    score + delta_ms.max(0.0) * rate
}

/// Obstacle fall speed for a tier base speed at a displayed score
#[inline]
pub fn obstacle_speed(base_speed: f32, display_score: u32, growth: f32) -> f32 {
    base_speed + display_score as f32 * growth
}

/// Add this frame's score and recompute the obstacle speed for the next frame
pub fn update_score(state: &mut GameState, delta_ms: f64) {
    state.score = accumulate(state.score, delta_ms, state.tuning.score_rate);
    state.obstacle_speed = obstacle_speed(
        state.profile().base_speed,
        state.display_score(),
        state.tuning.speed_growth,
    );
}
