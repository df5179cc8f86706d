//! Game loop core
//!
//! All gameplay logic lives here. This module must stay deterministic for a
//! given seed and frame-time sequence:
//! - Seeded RNG only
//! - Stable entity order (draw layer, then insertion)
//! - No rendering or platform dependencies beyond the seams in `platform`

pub mod collision;
pub mod mask;
pub mod obstacle;
pub mod player;
pub mod scroller;
pub mod sdf;
pub mod sprite;
pub mod state;
pub mod tick;

pub use mask::{Collider, Mask};
pub use obstacle::{Obstacle, ObstacleSpawner, Orientation, SpawnClock, SpawnParams};
pub use player::PlayerBody;
pub use scroller::ScrollingLayer;
pub use sprite::{SpriteKind, SpriteSet};
pub use state::{Entity, GameEvent, GamePhase, GameState, ScrollingSprite, World};
pub use tick::{draw, tick};
