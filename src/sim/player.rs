//! The player's airplane: gravity, jump impulse, tilt and propeller animation

use std::rc::Rc;

use glam::Vec2;

use super::mask::{Collider, Mask};
use crate::consts::*;
use crate::to_pixel;

/// The player-controlled body
///
/// Physics only touches `position.y` and `velocity_y`. Tilt and animation are
/// cosmetic, but the collision mask is the tilted silhouette of the current
/// animation frame, so they do shape hit-testing.
#[derive(Debug, Clone)]
pub struct PlayerBody {
    /// Top-left of the untilted sprite
    pub position: Vec2,
    /// Pixels per second, positive = falling
    pub velocity_y: f32,
    pub gravity: f32,
    /// Velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    pub alive: bool,
    /// Free-running animation counter in frames
    frame_index: f32,
    frames: Rc<[Mask]>,
    /// Tilted silhouette of the current frame
    mask: Mask,
}

impl PlayerBody {
    pub fn new(position: Vec2, gravity: f32, jump_impulse: f32, frames: Rc<[Mask]>) -> Self {
        let mask = frames[0].clone();
        Self {
            position,
            velocity_y: 0.0,
            gravity,
            jump_impulse,
            alive: true,
            frame_index: 0.0,
            frames,
            mask,
        }
    }

    /// Integrate one step: velocity first, then position
    pub fn apply_gravity(&mut self, dt: f32) {
        self.velocity_y += self.gravity * dt;
        self.position.y += self.velocity_y * dt;
    }

    /// Overwrite vertical velocity with the jump impulse
    pub fn jump(&mut self) {
        self.velocity_y = self.jump_impulse;
    }

    /// Nose-up tilt in degrees (counter-clockwise on screen)
    #[inline]
    pub fn rotation_angle(&self) -> f32 {
        -self.velocity_y * ROTATION_FACTOR
    }

    /// Current animation frame
    #[inline]
    pub fn frame(&self) -> usize {
        self.frame_index as usize % self.frames.len()
    }

    pub fn animate(&mut self, dt: f32) {
        self.frame_index += ANIMATION_FPS * dt;
        if self.frame_index >= self.frames.len() as f32 {
            self.frame_index %= self.frames.len() as f32;
        }
    }

    /// Rebuild the collision mask from the current frame and tilt
    pub fn rotate(&mut self) {
        self.mask = self.frames[self.frame()].rotated(self.rotation_angle());
    }

    /// Full per-frame update while the game is active
    pub fn update(&mut self, dt: f32) {
        self.apply_gravity(dt);
        self.animate(dt);
        self.rotate();
    }

    /// Size of the untilted sprite
    pub fn size(&self) -> Vec2 {
        self.frames[0].size().as_vec2()
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size() / 2.0
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// The tilted mask, anchored on the sprite centre
    pub fn collider(&self) -> Collider<'_> {
        let top_left = self.center() - self.mask.size().as_vec2() / 2.0;
        Collider::new(to_pixel(top_left), &self.mask)
    }
}
