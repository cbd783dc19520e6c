//! Render pass
//!
//! Reads a finished tick's state and issues draw primitives. Runs after all
//! mutation for the tick, never mutates anything itself.

use glam::Vec2;

use super::RenderError;
use super::shapes;
use super::vertex::{Color, Vertex, colors};
use crate::consts::{AIM_LINE_LENGTH, AIM_LINE_WIDTH, HEALTH_BAR_HEIGHT, HEALTH_BAR_ORIGIN};
use crate::from_angle;
use crate::sim::{GameState, Sprite};

/// Drawable surface consumed by the render pass
pub trait Canvas {
    /// Start a new frame filled with `color`
    fn clear(&mut self, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
    /// Axis-aligned rectangle with its top-left corner at `origin`
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    /// Show the finished frame
    fn present(&mut self) -> Result<(), RenderError>;
}

/// Draw one frame of `state` onto `canvas` and present it
pub fn draw_frame<C: Canvas + ?Sized>(state: &GameState, canvas: &mut C) -> Result<(), RenderError> {
    canvas.clear(colors::BACKGROUND);

    for sprite in state.sprites() {
        match sprite {
            Sprite::Avatar {
                pos,
                radius,
                facing,
            } => {
                canvas.fill_circle(pos, radius, colors::AVATAR);
                let tip = pos + from_angle(facing, AIM_LINE_LENGTH);
                canvas.line(pos, tip, AIM_LINE_WIDTH, colors::AIM_LINE);
            }
            Sprite::Adversary { pos, size } => {
                let half = Vec2::splat(size / 2.0);
                canvas.fill_rect(pos - half, Vec2::splat(size), colors::ADVERSARY);
            }
            Sprite::Projectile { pos, radius } => {
                canvas.fill_circle(pos, radius, colors::PROJECTILE);
            }
        }
    }

    // HUD: bar width tracks remaining health
    let width = state.avatar.health.max(0) as f32;
    if width > 0.0 {
        let (x, y) = HEALTH_BAR_ORIGIN;
        canvas.fill_rect(
            Vec2::new(x, y),
            Vec2::new(width, HEALTH_BAR_HEIGHT),
            colors::HEALTH_BAR,
        );
    }

    canvas.present()
}

/// Accumulates tessellated primitives for one frame
#[derive(Debug, Clone)]
pub struct VertexBatch {
    pub clear_color: Color,
    pub vertices: Vec<Vertex>,
}

impl Default for VertexBatch {
    fn default() -> Self {
        Self {
            clear_color: colors::BACKGROUND,
            vertices: Vec::new(),
        }
    }
}

impl VertexBatch {
    pub fn reset(&mut self, clear_color: Color) {
        self.clear_color = clear_color;
        self.vertices.clear();
    }

    pub fn push_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices
            .extend(shapes::circle(center, radius, color, shapes::CIRCLE_SEGMENTS));
    }

    pub fn push_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.vertices.extend(shapes::line(from, to, width, color));
    }

    pub fn push_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.vertices.extend(shapes::rect(origin, size, color));
    }
}
