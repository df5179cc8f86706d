//! Game state and the entity set
//!
//! The world is one ordered list of tagged entities, back to front. Which
//! entities collide is decided by their tag, not by membership in a
//! separate container.

use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mask::{Collider, Mask};
use super::obstacle::{Obstacle, ObstacleSpawner, SpawnParams};
use super::player::PlayerBody;
use super::scroller::ScrollingLayer;
use super::sprite::{SpriteKind, SpriteSet};
use crate::consts::*;
use crate::platform::DrawCommand;
use crate::tuning::Tuning;
use crate::{player_spawn_point, to_pixel};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player flying, obstacles spawning, score counting
    #[default]
    Active,
    /// Run ended; menu shown over the still-scrolling background
    GameOver,
}

/// Notable things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    ObstacleSpawned { id: u32 },
    Crashed { score: u32 },
    Restarted,
}

/// A scrolling layer with the mask drawn (and maybe collided) along it
#[derive(Debug, Clone)]
pub struct ScrollingSprite {
    pub layer: ScrollingLayer,
    /// Fixed top edge in window space
    pub top: f32,
    mask: Rc<Mask>,
}

impl ScrollingSprite {
    pub fn new(layer: ScrollingLayer, top: f32, mask: Rc<Mask>) -> Self {
        Self { layer, top, mask }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.layer.offset_x, self.top)
    }

    pub fn collider(&self) -> Collider<'_> {
        Collider::new(to_pixel(self.position()), &self.mask)
    }
}

/// Everything that lives in the world, tagged by kind
#[derive(Debug, Clone)]
pub enum Entity {
    Background(ScrollingSprite),
    Ground(ScrollingSprite),
    Player(PlayerBody),
    Obstacle(Obstacle),
}

impl Entity {
    /// Draw layer, back to front
    fn layer(&self) -> u8 {
        match self {
            Entity::Background(_) => 0,
            Entity::Ground(_) => 1,
            Entity::Player(_) => 2,
            Entity::Obstacle(_) => 3,
        }
    }

    /// Per-kind update. Scenery always scrolls; gameplay entities only move
    /// while the game is active.
    pub fn advance(&mut self, dt: f32, phase: GamePhase) {
        match self {
            Entity::Background(scenery) | Entity::Ground(scenery) => scenery.layer.advance(dt),
            Entity::Player(player) if phase == GamePhase::Active => player.update(dt),
            Entity::Obstacle(obstacle) if phase == GamePhase::Active => obstacle.advance(dt),
            Entity::Player(_) | Entity::Obstacle(_) => {}
        }
    }

    pub fn is_alive(&self) -> bool {
        match self {
            Entity::Background(_) | Entity::Ground(_) => true,
            Entity::Player(player) => player.alive,
            Entity::Obstacle(obstacle) => obstacle.alive,
        }
    }

    /// Ground and obstacles are fatal to touch
    pub fn is_collidable(&self) -> bool {
        matches!(self, Entity::Ground(_) | Entity::Obstacle(_))
    }

    pub fn collider(&self) -> Collider<'_> {
        match self {
            Entity::Background(scenery) | Entity::Ground(scenery) => scenery.collider(),
            Entity::Player(player) => player.collider(),
            Entity::Obstacle(obstacle) => obstacle.collider(),
        }
    }

    pub fn draw_command(&self) -> DrawCommand<'_> {
        let collider = self.collider();
        let kind = match self {
            Entity::Background(_) => SpriteKind::Hills,
            Entity::Ground(_) => SpriteKind::Ground,
            Entity::Player(_) => SpriteKind::Player,
            Entity::Obstacle(obstacle) => SpriteKind::Obstacle {
                variant: obstacle.variant,
            },
        };
        DrawCommand {
            kind,
            top_left: collider.top_left,
            mask: collider.mask,
        }
    }
}

/// Ordered entity list
#[derive(Debug, Clone, Default)]
pub struct World {
    entities: Vec<Entity>,
}

impl World {
    /// Insert keeping draw order; same-layer entities keep insertion order
    pub fn insert(&mut self, entity: Entity) {
        let layer = entity.layer();
        let at = self
            .entities
            .iter()
            .position(|e| e.layer() > layer)
            .unwrap_or(self.entities.len());
        self.entities.insert(at, entity);
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn advance(&mut self, dt: f32, phase: GamePhase) {
        for entity in &mut self.entities {
            entity.advance(dt, phase);
        }
        self.entities.retain(Entity::is_alive);
    }

    pub fn player(&self) -> Option<&PlayerBody> {
        self.entities.iter().find_map(|e| match e {
            Entity::Player(player) => Some(player),
            _ => None,
        })
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerBody> {
        self.entities.iter_mut().find_map(|e| match e {
            Entity::Player(player) => Some(player),
            _ => None,
        })
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Obstacle(obstacle) => Some(obstacle),
            _ => None,
        })
    }

    pub fn obstacles_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.entities.iter_mut().filter_map(|e| match e {
            Entity::Obstacle(obstacle) => Some(obstacle),
            _ => None,
        })
    }

    pub fn ground(&self) -> Option<&ScrollingSprite> {
        self.entities.iter().find_map(|e| match e {
            Entity::Ground(ground) => Some(ground),
            _ => None,
        })
    }

    /// Colliders of every alive collidable entity
    pub fn collidables(&self) -> impl Iterator<Item = Collider<'_>> {
        self.entities
            .iter()
            .filter(|e| e.is_collidable() && e.is_alive())
            .map(Entity::collider)
    }

    pub fn remove_player(&mut self) {
        self.entities.retain(|e| !matches!(e, Entity::Player(_)));
    }

    pub fn clear_obstacles(&mut self) {
        self.entities.retain(|e| !matches!(e, Entity::Obstacle(_)));
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducible obstacle placement
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Whole seconds survived in the current run; frozen on game over
    pub score: u32,
    /// Seconds of frame time since the game started
    pub clock: f64,
    /// `clock` value when the current run started
    pub score_start_time: f64,
    pub world: World,
    pub spawner: ObstacleSpawner,
    pub sprites: SpriteSet,
    /// Events produced by the last frame
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game in the Active phase. `tuning.seed` overrides `seed`.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let seed = tuning.seed.unwrap_or(seed);
        let sprites = SpriteSet::new();
        let mut spawner =
            ObstacleSpawner::new(tuning.spawn_interval, SpawnParams::from(&tuning), seed);
        spawner.set_clock(tuning.spawn_clock);

        let mut world = World::default();
        world.insert(Entity::Background(ScrollingSprite::new(
            ScrollingLayer::new(WINDOW_WIDTH, tuning.background_speed),
            WINDOW_HEIGHT - (GROUND_HEIGHT + HILLS_HEIGHT) as f32 + 40.0,
            Rc::clone(&sprites.hills),
        )));
        world.insert(Entity::Ground(ScrollingSprite::new(
            ScrollingLayer::new(WINDOW_WIDTH, tuning.ground_speed),
            WINDOW_HEIGHT - GROUND_HEIGHT as f32,
            Rc::clone(&sprites.ground),
        )));

        let mut state = Self {
            seed,
            tuning,
            phase: GamePhase::Active,
            score: 0,
            clock: 0.0,
            score_start_time: 0.0,
            world,
            spawner,
            sprites,
            events: Vec::new(),
            next_id: 1,
        };
        state.spawn_player();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a fresh player at the spawn point, replacing any existing one
    pub fn spawn_player(&mut self) {
        self.world.remove_player();
        let player = PlayerBody::new(
            player_spawn_point(),
            self.tuning.gravity,
            self.tuning.jump_impulse,
            Rc::clone(&self.sprites.player_frames),
        );
        self.world.insert(Entity::Player(player));
    }

    /// Roll the next obstacle and add it to the world
    pub fn spawn_obstacle(&mut self) -> u32 {
        let id = self.next_entity_id();
        let obstacle = self.spawner.spawn(id, &self.sprites);
        log::debug!(
            "Spawned obstacle {} ({:?}) at ({:.0}, {:.0})",
            id,
            obstacle.orientation,
            obstacle.position.x,
            obstacle.position.y
        );
        self.world.insert(Entity::Obstacle(obstacle));
        id
    }

    pub fn player(&self) -> Option<&PlayerBody> {
        self.world.player()
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerBody> {
        self.world.player_mut()
    }

    pub fn obstacle_count(&self) -> usize {
        self.world.obstacles().count()
    }
}
