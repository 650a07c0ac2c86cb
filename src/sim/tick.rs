//! Per-frame simulation tick and player commands
//!
//! The update order inside a tick is fixed: motion, collision, effects,
//! scoring. Collision must see this frame's positions and a speed change from
//! scoring only applies to the next frame's motion.

use super::collision::{collect_items, first_obstacle_hit};
use super::effects::HitOutcome;
use super::motion::{advance_items, advance_obstacles, move_player};
use super::scoring::update_score;
use super::spawner::run_spawners;
use super::state::{Difficulty, GameEvent, GamePhase, GameState};
use crate::consts::MAX_FRAME_DELTA_MS;

/// Commands produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    StopMoving,
    StartOrRestart,
    SelectDifficulty(Difficulty),
}

/// Apply a player command
///
/// Returns true when the command started a new run.
pub fn handle_command(state: &mut GameState, command: Command, now_ms: f64) -> bool {
    match command {
        Command::MoveLeft => state.player.vel_x = -state.player.speed,
        Command::MoveRight => state.player.vel_x = state.player.speed,
        Command::StopMoving => state.player.vel_x = 0.0,
        Command::StartOrRestart => {
            if state.phase != GamePhase::Running {
                state.start(now_ms);
                return true;
            }
        }
        Command::SelectDifficulty(difficulty) => state.change_difficulty(difficulty, now_ms),
    }
    false
}

/// Fire due spawns, then advance one frame
pub fn frame(state: &mut GameState, now_ms: f64) -> Vec<GameEvent> {
    run_spawners(state, now_ms);
    tick(state, now_ms)
}

/// Advance the game state by one animation frame at timestamp `now_ms`
pub fn tick(state: &mut GameState, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    let delta = state.clock.delta(now_ms, MAX_FRAME_DELTA_MS);
    state.now_ms = now_ms;

    // 1. Motion
    move_player(&mut state.player, delta, state.tuning.field_width);
    advance_obstacles(
        &mut state.obstacles,
        state.obstacle_speed,
        delta,
        state.tuning.field_height,
    );
    advance_items(&mut state.items, delta, state.tuning.field_height);

    // 2. Collision
    if first_obstacle_hit(&state.player, &state.obstacles).is_some() {
        let outcome = state
            .player
            .effects
            .on_obstacle_hit(now_ms, &mut state.lives, &state.tuning);
        match outcome {
            HitOutcome::Ignored => {}
            HitOutcome::Absorbed => events.push(GameEvent::ShieldAbsorbed {
                charges_left: state.player.effects.shield().charges(),
            }),
            HitOutcome::Damaged => events.push(GameEvent::LifeLost {
                remaining: state.lives,
            }),
            HitOutcome::Fatal => {
                events.push(GameEvent::LifeLost { remaining: 0 });
                let summary = state.end(now_ms);
                events.push(GameEvent::GameOver(summary));
                return events;
            }
        }
    }

    for kind in collect_items(&state.player, &mut state.items) {
        state
            .player
            .effects
            .apply_item(kind, now_ms, &mut state.lives, &state.tuning);
        events.push(GameEvent::ItemCollected(kind));
    }

    // 3. Effects
    state.player.effects.update(now_ms, &state.tuning);

    // 4. Scoring
    update_score(state, delta);

    events
}
