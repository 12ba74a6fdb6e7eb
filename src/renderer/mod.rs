//! Canvas 2D render pass
//!
//! Draws a `RenderSnapshot`. Makes no decisions about game state.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::sim::{Bounded, PowerUpKind, RenderSnapshot};

/// Spread-shot pickups blink against white on this period (host time)
const PICKUP_BLINK_MS: f64 = 200.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Draw one frame. `now_ms` is host time, used only for pickup blinking.
    pub fn draw(&self, snapshot: &RenderSnapshot<'_>, now_ms: f64) {
        let ctx = &self.ctx;
        ctx.clear_rect(
            0.0,
            0.0,
            snapshot.field_width as f64,
            snapshot.field_height as f64,
        );

        self.fill_rect(snapshot.player.bounds(), snapshot.player.color.css_color());

        for obstacle in snapshot.obstacles {
            self.fill_rect(obstacle.bounds(), obstacle.tier.css_color());
        }

        for pu in snapshot.power_ups {
            match pu.kind {
                PowerUpKind::SingleShot => self.fill_rect(pu.bounds(), pu.kind.css_color()),
                PowerUpKind::SpreadShot => {
                    let color = if (now_ms / PICKUP_BLINK_MS).floor() as i64 % 2 == 0 {
                        pu.kind.css_color()
                    } else {
                        "white"
                    };
                    let center = pu.bounds().center();
                    self.fill_circle(center.x, center.y, pu.size / 2.0, color);
                }
            }
        }

        for bullet in snapshot.bullets.iter().chain(snapshot.enemy_bullets) {
            self.fill_rect(bullet.bounds(), "white");
        }

        for (pos, p) in snapshot.orbit_positions() {
            self.fill_circle(pos.x, pos.y, p.size, p.color.css_color());
        }

        ctx.set_fill_style_str("white");
        for p in snapshot.ambient {
            ctx.set_global_alpha(p.opacity as f64);
            ctx.fill_rect(p.pos.x as f64, p.pos.y as f64, p.size as f64, p.size as f64);
        }
        ctx.set_global_alpha(1.0);
    }

    fn fill_rect(&self, rect: crate::sim::Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_circle(&self, x: f32, y: f32, radius: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        if self
            .ctx
            .arc(x as f64, y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }
}
