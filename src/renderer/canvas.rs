//! Neon shapes on a `CanvasRenderingContext2d`

use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use crate::sim::{EffectState, GameState, Item, ItemKind, Obstacle, Player};

/// Blink period while invincible (ms)
const BLINK_PERIOD_MS: f64 = 300.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    /// Draw one frame
    pub fn render(&self, state: &GameState) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        self.draw_player(&state.player, state.now_ms)?;
        for obstacle in &state.obstacles {
            self.draw_obstacle(obstacle)?;
        }
        for item in &state.items {
            match item.kind {
                ItemKind::Life => self.draw_heart(item),
                ItemKind::Shield => self.draw_shield_icon(item)?,
            }
        }
        Ok(())
    }

    fn gradient(
        &self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        stops: &[(f32, &str)],
    ) -> Result<CanvasGradient, JsValue> {
        let gradient = self.ctx.create_linear_gradient(x0, y0, x1, y1);
        for &(offset, color) in stops {
            gradient.add_color_stop(offset, color)?;
        }
        Ok(gradient)
    }

    fn rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let r = r.min(w / 2.0).min(h / 2.0);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.line_to(x + w - r, y);
        ctx.quadratic_curve_to(x + w, y, x + w, y + r);
        ctx.line_to(x + w, y + h - r);
        ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
        ctx.line_to(x + r, y + h);
        ctx.quadratic_curve_to(x, y + h, x, y + h - r);
        ctx.line_to(x, y + r);
        ctx.quadratic_curve_to(x, y, x + r, y);
        ctx.close_path();
    }

    fn draw_player(&self, player: &Player, now_ms: f64) -> Result<(), JsValue> {
        let (x, y) = (player.pos.x as f64, player.pos.y as f64);
        let (w, h) = (player.size.x as f64, player.size.y as f64);
        let ctx = &self.ctx;

        if player.is_invincible() && now_ms % BLINK_PERIOD_MS < BLINK_PERIOD_MS / 2.0 {
            ctx.set_global_alpha(0.4);
        }

        let (stops, glow, core): ([(f32, &str); 3], &str, &str) = match player.effects.state() {
            EffectState::Shielded => (
                [(0.0, "#9cff57"), (0.5, "#4ce0ff"), (1.0, "#2ecc71")],
                "#9cff57",
                "#9cff57",
            ),
            EffectState::Invincible => (
                [(0.0, "#ffffff"), (0.5, "#ffe66a"), (1.0, "#ff6ac1")],
                "#ffffff",
                "#ffe66a",
            ),
            EffectState::Normal => (
                [(0.0, "#4ce0ff"), (0.5, "#ffe66a"), (1.0, "#ff6ac1")],
                "#4ce0ff",
                "#4ce0ff",
            ),
        };

        // Outer capsule
        ctx.save();
        ctx.set_shadow_color(glow);
        ctx.set_shadow_blur(18.0);
        self.rounded_rect(x, y, w, h, 20.0);
        ctx.set_fill_style_canvas_gradient(&self.gradient(x, y, x + w, y + h, &stops)?);
        ctx.fill();
        ctx.restore();

        // Inner core
        ctx.save();
        ctx.set_global_alpha(ctx.global_alpha() * 0.9);
        let core_gradient = ctx.create_radial_gradient(
            x + w / 2.0,
            y + h / 2.0,
            4.0,
            x + w / 2.0,
            y + h / 2.0,
            h / 2.0,
        )?;
        core_gradient.add_color_stop(0.0, "#ffffff")?;
        core_gradient.add_color_stop(1.0, core)?;
        ctx.set_fill_style_canvas_gradient(&core_gradient);
        self.rounded_rect(x + 8.0, y + 10.0, w - 16.0, h - 20.0, 14.0);
        ctx.fill();
        ctx.restore();

        ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn draw_obstacle(&self, obstacle: &Obstacle) -> Result<(), JsValue> {
        let (x, y) = (obstacle.pos.x as f64, obstacle.pos.y as f64);
        let (w, h) = (obstacle.size.x as f64, obstacle.size.y as f64);
        let gradient = self.gradient(x, y, x + w, y + h, &[(0.0, "#ff6ac1"), (1.0, "#ffe66a")])?;

        let ctx = &self.ctx;
        ctx.save();
        ctx.set_shadow_color("#ff6ac1");
        ctx.set_shadow_blur(16.0);
        self.rounded_rect(x, y, w, h, 12.0);
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill();
        ctx.restore();
        Ok(())
    }

    fn draw_heart(&self, item: &Item) {
        let size = item.size.x as f64;
        // Heart is drawn around a vertical centre line
        let x = item.pos.x as f64 + size / 2.0;
        let y = item.pos.y as f64;
        let top = size * 0.3;
        let mid = y + (size + top) / 2.0;

        let ctx = &self.ctx;
        ctx.set_fill_style_str("deeppink");
        ctx.begin_path();
        ctx.move_to(x, y + top);
        ctx.bezier_curve_to(x, y, x - size / 2.0, y, x - size / 2.0, y + top);
        ctx.bezier_curve_to(x - size / 2.0, mid, x, mid, x, y + size);
        ctx.bezier_curve_to(x, mid, x + size / 2.0, mid, x + size / 2.0, y + top);
        ctx.bezier_curve_to(x + size / 2.0, y, x, y, x, y + top);
        ctx.close_path();
        ctx.fill();
    }

    fn draw_shield_icon(&self, item: &Item) -> Result<(), JsValue> {
        let size = item.size.x as f64;
        let (x, y) = (item.pos.x as f64, item.pos.y as f64);
        let cx = x + size / 2.0;
        let bottom = y + size;
        let ctx = &self.ctx;

        ctx.save();
        ctx.begin_path();
        ctx.move_to(cx, y);
        ctx.line_to(x + size - 4.0, y + size * 0.35);
        ctx.line_to(cx, bottom);
        ctx.line_to(x + 4.0, y + size * 0.35);
        ctx.close_path();

        let gradient = self.gradient(
            x,
            y,
            x + size,
            bottom,
            &[(0.0, "#9cff57"), (0.5, "#4ce0ff"), (1.0, "#2ecc71")],
        )?;
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.set_shadow_color("#9cff57");
        ctx.set_shadow_blur(12.0);
        ctx.fill();

        ctx.set_line_width(2.0);
        ctx.set_stroke_style_str("rgba(255,255,255,0.85)");
        ctx.stroke();

        // Cross
        ctx.set_shadow_blur(0.0);
        ctx.set_stroke_style_str("rgba(255,255,255,0.9)");
        ctx.begin_path();
        ctx.move_to(cx, y + size * 0.25);
        ctx.line_to(cx, y + size * 0.7);
        ctx.move_to(x + size * 0.35, y + size * 0.47);
        ctx.line_to(x + size * 0.65, y + size * 0.47);
        ctx.stroke();
        ctx.restore();
        Ok(())
    }
}
