//! Axis-aligned collision detection
//!
//! Everything in the field is a rectangle in screen space (y grows downward).

use glam::Vec2;

use super::state::{Item, ItemKind, Obstacle, Player};

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Strict overlap test: rectangles that only share an edge do not collide
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Index of the first obstacle touching the player
///
/// Only one obstacle hit is resolved per frame.
pub fn first_obstacle_hit(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    let player_rect = player.rect();
    obstacles
        .iter()
        .position(|o| overlaps(&player_rect, &o.rect()))
}

/// Remove every item touching the player, returning their kinds
///
/// Kinds are reported from the back of the list forward.
pub fn collect_items(player: &Player, items: &mut Vec<Item>) -> Vec<ItemKind> {
    let player_rect = player.rect();
    let collected: Vec<ItemKind> = items
        .iter()
        .rev()
        .filter(|item| overlaps(&player_rect, &item.rect()))
        .map(|item| item.kind)
        .collect();
    if !collected.is_empty() {
        items.retain(|item| !overlaps(&player_rect, &item.rect()));
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Player;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    fn player_at(x: f32, y: f32) -> Player {
        let mut player = Player::new(&Tuning::default(), 7.0);
        player.pos = Vec2::new(x, y);
        player
    }

    #[test]
    fn test_overlap_basic() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(overlaps(&a, &rect(5.0, 5.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &rect(20.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &rect(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &rect(0.0, 10.0, 10.0, 10.0)));
        assert!(!overlaps(&a, &rect(-10.0, -10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(40.0, 40.0, 5.0, 5.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_first_obstacle_hit_stops_at_first() {
        let player = player_at(100.0, 500.0);
        let obstacles = vec![
            Obstacle {
                pos: Vec2::new(300.0, 500.0),
                size: Vec2::new(70.0, 26.0),
            },
            Obstacle {
                pos: Vec2::new(90.0, 510.0),
                size: Vec2::new(70.0, 26.0),
            },
            Obstacle {
                pos: Vec2::new(110.0, 520.0),
                size: Vec2::new(70.0, 26.0),
            },
        ];
        assert_eq!(first_obstacle_hit(&player, &obstacles), Some(1));
        assert_eq!(first_obstacle_hit(&player, &obstacles[..1]), None);
    }

    #[test]
    fn test_collect_items_takes_all_overlapping() {
        let player = player_at(100.0, 500.0);
        let item = |x: f32, kind| Item {
            pos: Vec2::new(x, 510.0),
            size: Vec2::splat(30.0),
            speed: 3.0,
            kind,
        };
        let mut items = vec![
            item(90.0, ItemKind::Life),
            item(300.0, ItemKind::Shield),
            item(120.0, ItemKind::Shield),
        ];

        let collected = collect_items(&player, &mut items);
        assert_eq!(collected, vec![ItemKind::Shield, ItemKind::Life]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].pos.x, 300.0);
    }

    fn any_rect() -> impl Strategy<Value = Rect> {
        (-500.0..500.0f32, -500.0..500.0f32, 0.5..200.0f32, 0.5..200.0f32)
            .prop_map(|(x, y, w, h)| rect(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(a in any_rect(), b in any_rect()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_overlap_reflexive(a in any_rect()) {
            prop_assert!(overlaps(&a, &a));
        }
    }
}
