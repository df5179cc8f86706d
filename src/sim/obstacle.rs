//! Obstacles and the timer that spawns them

use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::mask::{Collider, Mask};
use super::sprite::SpriteSet;
use super::state::GamePhase;
use crate::consts::*;
use crate::to_pixel;
use crate::tuning::Tuning;

/// Which window edge an obstacle is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Hangs down from above the window
    Top,
    /// Rests on the ground, rising up
    Bottom,
}

/// A scrolling obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub position: Vec2,
    pub orientation: Orientation,
    /// Cosmetic silhouette variant
    pub variant: u8,
    /// Pixels per second, leftward
    pub speed: f32,
    pub alive: bool,
    mask: Rc<Mask>,
}

impl Obstacle {
    pub fn new(
        id: u32,
        position: Vec2,
        orientation: Orientation,
        variant: u8,
        speed: f32,
        mask: Rc<Mask>,
    ) -> Self {
        Self {
            id,
            position,
            orientation,
            variant,
            speed,
            alive: true,
            mask,
        }
    }

    /// Move left and die once fully past the left margin
    pub fn advance(&mut self, dt: f32) {
        self.position.x -= self.speed * dt;
        if self.position.x <= despawn_x(self.mask.width() as f32) {
            self.alive = false;
        }
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    pub fn collider(&self) -> Collider<'_> {
        Collider::new(to_pixel(self.position), &self.mask)
    }
}

/// Left edge at or below which an obstacle of the given width is despawned
#[inline]
pub fn despawn_x(width: f32) -> f32 {
    -OFFSCREEN_MARGIN - width
}

/// Random placement ranges for new obstacles (pixels, inclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub speed: f32,
    /// Extra distance beyond the right window edge for the obstacle centre
    pub lead: (i32, i32),
    /// How far below the window bottom a standing obstacle's base sits
    pub bottom_sink: (i32, i32),
    /// Top edge of a hanging obstacle (negative = above the window)
    pub top_rise: (i32, i32),
}

impl From<&Tuning> for SpawnParams {
    fn from(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.obstacle_speed,
            lead: tuning.spawn_lead,
            bottom_sink: tuning.bottom_sink,
            top_rise: tuning.top_rise,
        }
    }
}

/// Who decides when the spawn period has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpawnClock {
    /// Polled against accumulated frame time
    #[default]
    Internal,
    /// Driven by the host's `TimerFired` events; the internal timer is idle
    Host,
}

/// Fixed-period obstacle factory
///
/// The period is polled against accumulated frame time until the host starts
/// delivering its own timer events, after which only those spawn. Randomness
/// comes from a seeded PCG stream so a run replays exactly from its seed.
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    /// Seconds between spawns
    pub interval: f32,
    elapsed: f32,
    /// Seconds since the internal timer last fired in this run
    since_fire: Option<f32>,
    clock: SpawnClock,
    params: SpawnParams,
    rng: Pcg32,
}

impl ObstacleSpawner {
    pub fn new(interval: f32, params: SpawnParams, seed: u64) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            since_fire: None,
            clock: SpawnClock::Internal,
            params,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn clock(&self) -> SpawnClock {
        self.clock
    }

    pub fn set_clock(&mut self, clock: SpawnClock) {
        self.clock = clock;
        self.reset();
    }

    /// Advance the internal timer; returns how many intervals fired this frame
    ///
    /// Outside of active play the timer is held at zero, so nothing fires
    /// and a fresh run waits one full interval for its first obstacle. A
    /// single frame fires at most [`MAX_SPAWNS_PER_FRAME`] times.
    pub fn tick(&mut self, dt: f32, phase: GamePhase) -> u32 {
        if phase != GamePhase::Active || self.clock == SpawnClock::Host || self.interval <= 0.0 {
            self.reset();
            return 0;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        if let Some(since) = self.since_fire.as_mut() {
            *since += dt;
        }
        if self.elapsed < self.interval {
            return 0;
        }
        let fired = (self.elapsed / self.interval).floor();
        self.elapsed %= self.interval;
        self.since_fire = Some(self.elapsed);
        fired.min(MAX_SPAWNS_PER_FRAME as f32) as u32
    }

    /// A host timer event for the spawn period; returns how many obstacles
    /// to spawn (0 or 1)
    ///
    /// The first host event hands the period over to the host for good. If
    /// the internal timer fired within the last half interval, that spawn
    /// already covered this period and the event only completes the handover.
    pub fn host_fired(&mut self, phase: GamePhase) -> u32 {
        if phase != GamePhase::Active {
            return 0;
        }
        let covered = self.clock == SpawnClock::Internal
            && self.since_fire.is_some_and(|since| since < self.interval * 0.5);
        if self.clock == SpawnClock::Internal {
            log::debug!("Spawn timer handed over to the host");
            self.clock = SpawnClock::Host;
        }
        self.reset();
        if covered { 0 } else { 1 }
    }

    /// Restart the period from zero
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.since_fire = None;
    }

    /// Roll a new obstacle just beyond the right edge of the window
    pub fn spawn(&mut self, id: u32, sprites: &SpriteSet) -> Obstacle {
        let orientation = if self.rng.random_bool(0.5) {
            Orientation::Top
        } else {
            Orientation::Bottom
        };
        let variant = self.rng.random_range(0..OBSTACLE_VARIANTS);
        let mask = sprites.obstacle(variant, orientation);
        let (w, h) = (mask.width() as f32, mask.height() as f32);

        let center_x = WINDOW_WIDTH + self.roll(self.params.lead) as f32;
        let top = match orientation {
            Orientation::Bottom => WINDOW_HEIGHT + self.roll(self.params.bottom_sink) as f32 - h,
            Orientation::Top => self.roll(self.params.top_rise) as f32,
        };

        Obstacle::new(
            id,
            Vec2::new(center_x - w / 2.0, top),
            orientation,
            variant as u8,
            self.params.speed,
            mask,
        )
    }

    fn roll(&mut self, (lo, hi): (i32, i32)) -> i32 {
        self.rng.random_range(lo..=hi)
    }
}
