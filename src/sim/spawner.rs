//! Periodic entity spawning
//!
//! Each entity class has its own `SpawnTimer`. Timers run on the same clock as
//! the frame tick and are polled right before it, so a spawn that fell due
//! since the last frame is already in the field when collisions are checked.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Item, ItemKind, Obstacle};
use crate::tuning::Tuning;

/// A cancellable repeating timer
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    interval_ms: f64,
    /// Next fire time, `None` while stopped
    next_due_ms: Option<f64>,
}

impl SpawnTimer {
    /// Create a stopped timer
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn next_due_ms(&self) -> Option<f64> {
        self.next_due_ms
    }

    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Begin firing every interval, first fire one interval from `now_ms`
    pub fn start(&mut self, now_ms: f64) {
        self.next_due_ms = Some(now_ms + self.interval_ms);
    }

    pub fn stop(&mut self) {
        self.next_due_ms = None;
    }

    /// Drop the old schedule and start again with a new period
    pub fn restart(&mut self, now_ms: f64, interval_ms: f64) {
        self.stop();
        self.interval_ms = interval_ms;
        self.start(now_ms);
    }

    /// Change the period without starting the timer
    pub fn set_interval(&mut self, interval_ms: f64) {
        self.interval_ms = interval_ms;
    }

    /// Returns true if the timer fired since the previous poll
    ///
    /// After a stall longer than one period the timer fires once and
    /// resynchronises to `now_ms` instead of replaying every missed period.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let Some(due) = self.next_due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }
        let next = due + self.interval_ms;
        self.next_due_ms = Some(if next <= now_ms {
            now_ms + self.interval_ms
        } else {
            next
        });
        true
    }
}

/// Uniform x such that an entity of `width` lies fully inside the field
fn random_x<R: Rng + ?Sized>(rng: &mut R, field_width: f32, width: f32) -> f32 {
    let span = (field_width - width).max(0.0);
    rng.random::<f32>() * span
}

/// Item kind for a roll in [0, 1)
pub fn item_kind_for_roll(roll: f64, life_weight: f64) -> ItemKind {
    if roll < life_weight {
        ItemKind::Life
    } else {
        ItemKind::Shield
    }
}

/// Create an obstacle just above the visible field
pub fn spawn_obstacle<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Obstacle {
    let x = random_x(rng, tuning.field_width, tuning.obstacle_width);
    Obstacle {
        pos: Vec2::new(x, -tuning.obstacle_height),
        size: Vec2::new(tuning.obstacle_width, tuning.obstacle_height),
    }
}

/// Create an item just above the visible field
pub fn spawn_item<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Item {
    let kind = item_kind_for_roll(rng.random::<f64>(), tuning.item_life_weight);
    let x = random_x(rng, tuning.field_width, tuning.item_size);
    Item {
        pos: Vec2::new(x, -tuning.item_size),
        size: Vec2::splat(tuning.item_size),
        speed: tuning.item_speed,
        kind,
    }
}

/// Fire any spawn timers that are due at `now_ms`
pub fn run_spawners(state: &mut GameState, now_ms: f64) {
    if !state.is_running() {
        return;
    }

    if state.obstacle_timer.poll(now_ms) {
        if state.obstacles.len() < state.tuning.max_obstacles {
            let obstacle = spawn_obstacle(&mut state.rng, &state.tuning);
            state.obstacles.push(obstacle);
        } else {
            log::debug!("Obstacle cap ({}) reached, spawn skipped", state.tuning.max_obstacles);
        }
    }

    if state.item_timer.poll(now_ms) {
        if state.items.len() < state.tuning.max_items {
            let item = spawn_item(&mut state.rng, &state.tuning);
            log::debug!("Spawned {:?} item at x={:.0}", item.kind, item.pos.x);
            state.items.push(item);
        } else {
            log::debug!("Item cap ({}) reached, spawn skipped", state.tuning.max_items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Difficulty;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_timer_fires_on_period() {
        let mut timer = SpawnTimer::new(900.0);
        assert!(!timer.poll(10_000.0));

        timer.start(0.0);
        assert!(!timer.poll(899.0));
        assert!(timer.poll(900.0));
        assert!(!timer.poll(900.0));
        assert!(timer.poll(1801.0));
        assert_eq!(timer.next_due_ms(), Some(2700.0));
    }

    #[test]
    fn test_timer_resyncs_after_stall() {
        let mut timer = SpawnTimer::new(500.0);
        timer.start(0.0);
        assert!(timer.poll(5000.0));
        assert!(!timer.poll(5100.0));
        assert_eq!(timer.next_due_ms(), Some(5500.0));
    }

    #[test]
    fn test_restart_replaces_schedule() {
        let mut timer = SpawnTimer::new(900.0);
        timer.start(0.0);
        timer.restart(600.0, 520.0);
        // The old 900 ms slot no longer fires
        assert!(!timer.poll(900.0));
        assert!(timer.poll(1120.0));
        assert!(!timer.poll(1200.0));
    }

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = SpawnTimer::new(100.0);
        timer.start(0.0);
        timer.stop();
        assert!(!timer.poll(1_000_000.0));
    }

    #[test]
    fn test_item_kind_weights() {
        assert_eq!(item_kind_for_roll(0.0, 0.3), ItemKind::Life);
        assert_eq!(item_kind_for_roll(0.299, 0.3), ItemKind::Life);
        assert_eq!(item_kind_for_roll(0.3, 0.3), ItemKind::Shield);
        assert_eq!(item_kind_for_roll(0.99, 0.3), ItemKind::Shield);
        assert_eq!(item_kind_for_roll(0.5, 0.0), ItemKind::Shield);
    }

    #[test]
    fn test_spawned_entities_fit_in_field() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let o = spawn_obstacle(&mut rng, &tuning);
            assert!(o.pos.x >= 0.0 && o.pos.x + o.size.x <= tuning.field_width);
            assert_eq!(o.pos.y, -tuning.obstacle_height);

            let item = spawn_item(&mut rng, &tuning);
            assert!(item.pos.x >= 0.0 && item.pos.x + item.size.x <= tuning.field_width);
            assert_eq!(item.pos.y, -tuning.item_size);
            assert_eq!(item.speed, tuning.item_speed);
        }
    }

    #[test]
    fn test_item_mix_follows_weight() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let lives = (0..2000)
            .filter(|_| spawn_item(&mut rng, &tuning).kind == ItemKind::Life)
            .count();
        // 30% of 2000 with generous slack
        assert!((450..750).contains(&lives), "got {lives} lives");
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(spawn_item(&mut a, &tuning), spawn_item(&mut b, &tuning));
        }
    }

    #[test]
    fn test_run_spawners_respects_phase_and_caps() {
        let mut state = GameState::new(1, Tuning::default(), Difficulty::Hard);
        run_spawners(&mut state, 10_000.0);
        assert!(state.obstacles.is_empty());

        state.start(0.0);
        run_spawners(&mut state, 520.0);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.items.is_empty());

        run_spawners(&mut state, 10_000.0);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.items.len(), 1);

        state.tuning.max_obstacles = 2;
        run_spawners(&mut state, 20_000.0);
        assert_eq!(state.obstacles.len(), 2);
    }
}
