//! HUD and overlay text
//!
//! Pure formatting of the numbers the DOM shows; the wasm entry point only
//! copies these strings into elements.

use crate::sim::{GamePhase, GameState, RunSummary};

/// Text for every HUD element, captured once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub score: String,
    pub high_score: String,
    pub lives: String,
    pub shield: String,
}

impl HudSnapshot {
    pub fn capture(state: &GameState, high_score: u32) -> Self {
        let shield = state.player.effects.shield();
        let shield_text = if shield.charges() == 0 {
            "Shield: none".to_string()
        } else {
            let mut text = format!("Shield: {}", "🛡".repeat(shield.charges() as usize));
            if let Some(remaining) = shield.remaining_ms(state.now_ms) {
                let secs = (remaining / 1000.0).ceil() as u32;
                text.push_str(&format!(" ({}s)", secs));
            }
            text
        };

        Self {
            score: format!("Score: {}", state.display_score()),
            high_score: format!("Best: {}", high_score),
            lives: format!("Lives: {}", "❤️".repeat(state.lives as usize)),
            shield: shield_text,
        }
    }
}

/// Title/body shown over the canvas when no run is active
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub title: String,
    pub body: String,
}

impl Overlay {
    /// Overlay for the current phase, `None` while running
    pub fn for_phase(phase: GamePhase, summary: Option<&RunSummary>) -> Option<Self> {
        match (phase, summary) {
            (GamePhase::Running, _) => None,
            (GamePhase::GameOver, Some(summary)) => Some(Self::game_over(summary)),
            _ => Some(Self::title()),
        }
    }

    pub fn title() -> Self {
        Self {
            title: "Neon Dodge".to_string(),
            body: "Pick a difficulty, then press Start or Space to play.".to_string(),
        }
    }

    pub fn game_over(summary: &RunSummary) -> Self {
        let (title, prompt) = if summary.new_record {
            ("New record!", "Press Space or Start to try again.")
        } else {
            ("Game over", "Press Space or Start to restart.")
        };
        Self {
            title: title.to_string(),
            body: format!(
                "Difficulty: {}\nScore: {}\n\n{}",
                summary.label(),
                summary.score,
                prompt
            ),
        }
    }
}
