//! Endless horizontal scrolling for the background and ground

use serde::{Deserialize, Serialize};

/// A horizontally tiled layer moving left at constant speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollingLayer {
    /// Left edge of the first tile; always in `(-tile_width, 0]`
    pub offset_x: f32,
    pub tile_width: f32,
    /// Pixels per second
    pub speed: f32,
}

impl ScrollingLayer {
    pub fn new(tile_width: f32, speed: f32) -> Self {
        Self {
            offset_x: 0.0,
            tile_width,
            speed,
        }
    }

    /// Move left by `speed * dt`, wrapping back by whole tiles once a tile
    /// has fully left the view
    pub fn advance(&mut self, dt: f32) {
        let step = self.speed * dt;
        if !step.is_finite() {
            return;
        }
        self.offset_x -= step;
        if self.offset_x <= -self.tile_width {
            self.offset_x %= self.tile_width;
            // `%` keeps the sign; an exact multiple lands on -0.0
            if self.offset_x <= -self.tile_width || self.offset_x == 0.0 {
                self.offset_x = 0.0;
            }
        }
    }
}
