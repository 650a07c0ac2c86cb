//! Frame-rate independent motion
//!
//! Speeds are expressed per 60 Hz reference frame and scaled by the real
//! elapsed time, so a 30 Hz and a 144 Hz display cover the same distance per
//! second.

use super::state::{Item, Obstacle, Player};
use crate::frame_scale;

/// Move the player horizontally and keep it inside the field
pub fn move_player(player: &mut Player, delta_ms: f64, field_width: f32) {
    player.pos.x += player.vel_x * frame_scale(delta_ms);
    let max_x = (field_width - player.size.x).max(0.0);
    player.pos.x = player.pos.x.clamp(0.0, max_x);
}

/// Drop every obstacle by `speed` and discard those below the field
pub fn advance_obstacles(
    obstacles: &mut Vec<Obstacle>,
    speed: f32,
    delta_ms: f64,
    field_height: f32,
) {
    let distance = speed * frame_scale(delta_ms);
    obstacles.retain_mut(|o| {
        o.pos.y += distance;
        o.pos.y <= field_height
    });
}

/// Drop every item by its own speed and discard those below the field
pub fn advance_items(items: &mut Vec<Item>, delta_ms: f64, field_height: f32) {
    let scale = frame_scale(delta_ms);
    items.retain_mut(|item| {
        item.pos.y += item.speed * scale;
        item.pos.y <= field_height
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::REFERENCE_FRAME_MS;
    use crate::sim::state::ItemKind;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn obstacle(y: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(10.0, y),
            size: Vec2::new(70.0, 26.0),
        }
    }

    #[test]
    fn test_one_reference_frame_moves_by_speed() {
        let mut obstacles = vec![obstacle(0.0)];
        advance_obstacles(&mut obstacles, 3.0, REFERENCE_FRAME_MS, 640.0);
        assert!((obstacles[0].pos.y - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_distance_independent_of_frame_rate() {
        let mut fast = vec![obstacle(0.0)];
        let mut slow = vec![obstacle(0.0)];
        for _ in 0..4 {
            advance_obstacles(&mut fast, 4.0, 8.0, 640.0);
        }
        for _ in 0..2 {
            advance_obstacles(&mut slow, 4.0, 16.0, 640.0);
        }
        assert!((fast[0].pos.y - slow[0].pos.y).abs() < 1e-3);
    }

    #[test]
    fn test_offscreen_entities_removed_without_skipping() {
        let mut obstacles = vec![
            obstacle(639.0),
            obstacle(639.5),
            obstacle(100.0),
            obstacle(700.0),
        ];
        advance_obstacles(&mut obstacles, 3.0, REFERENCE_FRAME_MS, 640.0);
        assert_eq!(obstacles.len(), 1);
        assert!((obstacles[0].pos.y - 103.0).abs() < 1e-3);
    }

    #[test]
    fn test_items_use_their_own_speed() {
        let mut items = vec![
            Item {
                pos: Vec2::ZERO,
                size: Vec2::splat(30.0),
                speed: 3.0,
                kind: ItemKind::Life,
            },
            Item {
                pos: Vec2::ZERO,
                size: Vec2::splat(30.0),
                speed: 6.0,
                kind: ItemKind::Shield,
            },
        ];
        advance_items(&mut items, REFERENCE_FRAME_MS * 2.0, 640.0);
        assert!((items[0].pos.y - 6.0).abs() < 1e-4);
        assert!((items[1].pos.y - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_move_left_at_edge_stays_at_zero() {
        let mut player = Player::new(&Tuning::default(), 7.0);
        player.pos.x = 0.0;
        player.vel_x = -player.speed;
        move_player(&mut player, REFERENCE_FRAME_MS, 480.0);
        assert_eq!(player.pos.x, 0.0);
    }

    #[test]
    fn test_move_right_clamps_to_field() {
        let mut player = Player::new(&Tuning::default(), 7.0);
        player.pos.x = 438.0;
        player.vel_x = player.speed;
        move_player(&mut player, REFERENCE_FRAME_MS, 480.0);
        assert_eq!(player.pos.x, 440.0);
    }

    proptest! {
        #[test]
        fn prop_player_always_inside_field(
            steps in prop::collection::vec((-20.0..20.0f32, 0.0..100.0f64), 1..100)
        ) {
            let mut player = Player::new(&Tuning::default(), 7.0);
            for (vel, delta) in steps {
                player.vel_x = vel;
                move_player(&mut player, delta, 480.0);
                prop_assert!(player.pos.x >= 0.0);
                prop_assert!(player.pos.x <= 480.0 - player.size.x);
            }
        }
    }
}
