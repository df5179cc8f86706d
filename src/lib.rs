//! Droppy Airplane - A side-scrolling airplane dodger
//!
//! Core modules:
//! - `sim`: Game loop core (physics, spawning, mask collisions, game state)
//! - `platform`: Collaborator seams (canvas, audio, input events)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven physics and spawn constants
//! - `settings`: Presentation preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Logical window size in pixels (screen space, y grows downward)
    pub const WINDOW_WIDTH: f32 = 480.0;
    pub const WINDOW_HEIGHT: f32 = 800.0;
    /// Target frame rate for hosts that pace their own loop
    pub const FRAMES_PER_SECOND: u32 = 120;

    /// Scroll speeds (pixels/s)
    pub const BACKGROUND_SPEED: f32 = 300.0;
    pub const GROUND_SPEED: f32 = 360.0;
    /// Height of the hill silhouette band drawn over the sky
    pub const HILLS_HEIGHT: u32 = 260;
    /// Height of the ground strip at the bottom of the window
    pub const GROUND_HEIGHT: u32 = 96;

    /// Player defaults
    pub const PLAYER_WIDTH: u32 = 68;
    pub const PLAYER_HEIGHT: u32 = 48;
    pub const GRAVITY: f32 = 600.0;
    /// Upward velocity set by a jump (negative = up)
    pub const JUMP_IMPULSE: f32 = -400.0;
    /// Degrees of tilt per pixel/s of vertical velocity
    pub const ROTATION_FACTOR: f32 = 0.06;
    /// Propeller animation speed (frames/s)
    pub const ANIMATION_FPS: f32 = 10.0;
    pub const PLAYER_FRAME_COUNT: usize = 3;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: u32 = 72;
    pub const OBSTACLE_HEIGHT: u32 = 360;
    pub const OBSTACLE_SPEED: f32 = 400.0;
    pub const OBSTACLE_VARIANTS: usize = 2;
    /// Obstacles die once their right edge passes this far left of the window
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Spawn timer period (seconds)
    pub const SPAWN_INTERVAL: f32 = 1.4;
    /// Timer id a host uses when it drives obstacle spawns itself
    pub const SPAWN_TIMER_ID: u32 = 1;
    /// Upper bound on spawns from a single (very long) frame
    pub const MAX_SPAWNS_PER_FRAME: u32 = 4;
}

/// Snap a float position to the pixel grid (rounds half away from zero)
#[inline]
pub fn to_pixel(pos: Vec2) -> IVec2 {
    IVec2::new(pos.x.round() as i32, pos.y.round() as i32)
}

/// Spawn point of the player: mid-left of the window
#[inline]
pub fn player_spawn_point() -> Vec2 {
    use consts::*;
    Vec2::new(
        WINDOW_WIDTH / 20.0,
        WINDOW_HEIGHT / 2.0 - PLAYER_HEIGHT as f32 / 2.0,
    )
}
