//! Shape generation for 2D primitives
//!
//! Everything is emitted in window pixels (y down); the pipeline maps to NDC.

use glam::{IVec2, Vec2};

use super::vertex::{Vertex, colors};
use crate::consts::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::sim::mask::Mask;
use crate::sim::sprite::SpriteKind;

/// Flat color for a sprite kind
pub fn sprite_color(kind: SpriteKind) -> [f32; 4] {
    match kind {
        SpriteKind::Hills => colors::HILLS,
        SpriteKind::Ground => colors::GROUND,
        SpriteKind::Player => colors::PLAYER,
        SpriteKind::Obstacle { variant: 0 } => colors::ROCK,
        SpriteKind::Obstacle { .. } => colors::CRYSTAL,
    }
}

/// Axis-aligned rectangle as two triangles, with separate top and bottom colors
pub fn quad(min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Append a mask as one quad per horizontal run of opaque pixels
///
/// Runs wholly outside the window are skipped. Returns the number of
/// vertices written.
pub fn mask_runs(out: &mut Vec<Vertex>, mask: &Mask, top_left: IVec2, color: [f32; 4]) -> usize {
    let start = out.len();
    let origin = top_left.as_vec2();
    for (y, x0, x1) in mask.runs() {
        let min = origin + Vec2::new(x0 as f32, y as f32);
        let max = origin + Vec2::new(x1 as f32, y as f32 + 1.0);
        if max.x <= 0.0 || min.x >= WINDOW_WIDTH || max.y <= 0.0 || min.y >= WINDOW_HEIGHT {
            continue;
        }
        out.extend_from_slice(&quad(min, max, color, color));
    }
    out.len() - start
}

/// Full-window vertical sky gradient
pub fn sky() -> [Vertex; 6] {
    quad(
        Vec2::ZERO,
        Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        colors::SKY_TOP,
        colors::SKY_HORIZON,
    )
}
