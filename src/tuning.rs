//! Data-driven physics and spawn constants
//!
//! Every field has a default, so a tuning file only needs the values it
//! changes:
//!
//! ```json
//! { "gravity": 330.0, "spawn_interval": 1.2 }
//! ```

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::obstacle::SpawnClock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Velocity a jump sets (pixels/s, negative = up)
    pub jump_impulse: f32,
    pub background_speed: f32,
    pub ground_speed: f32,
    pub obstacle_speed: f32,
    /// Seconds between obstacle spawns
    pub spawn_interval: f32,
    /// Obstacle centre distance beyond the right window edge `[min, max]`
    pub spawn_lead: (i32, i32),
    /// Standing obstacle base below the window bottom `[min, max]`
    pub bottom_sink: (i32, i32),
    /// Hanging obstacle top edge `[min, max]`
    pub top_rise: (i32, i32),
    /// Whether the host's `TimerFired` events pace spawns from the start
    pub spawn_clock: SpawnClock,
    /// Fixed RNG seed; random per run when absent
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            background_speed: BACKGROUND_SPEED,
            ground_speed: GROUND_SPEED,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            spawn_lead: (40, 100),
            bottom_sink: (10, 50),
            top_rise: (-50, -10),
            spawn_clock: SpawnClock::Internal,
            seed: None,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Self = serde_json::from_str(json).context("Failed to parse tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.gravity > 0.0, "gravity must be positive, got {}", self.gravity);
        ensure!(
            self.jump_impulse < 0.0,
            "jump_impulse must point up (negative), got {}",
            self.jump_impulse
        );
        ensure!(
            self.spawn_interval > 0.0,
            "spawn_interval must be positive, got {}",
            self.spawn_interval
        );
        for (name, speed) in [
            ("background_speed", self.background_speed),
            ("ground_speed", self.ground_speed),
            ("obstacle_speed", self.obstacle_speed),
        ] {
            ensure!(speed >= 0.0, "{name} must not be negative, got {speed}");
        }
        for (name, (lo, hi)) in [
            ("spawn_lead", self.spawn_lead),
            ("bottom_sink", self.bottom_sink),
            ("top_rise", self.top_rise),
        ] {
            ensure!(lo <= hi, "{name} range is inverted: [{lo}, {hi}]");
        }
        Ok(())
    }
}
