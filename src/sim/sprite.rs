//! Procedural sprite silhouettes
//!
//! Every sprite is rasterized once from signed distance functions into a
//! [`Mask`]. The same mask is used for hit-testing and by the renderer, so
//! what collides is exactly what is drawn.

use std::f32::consts::TAU;
use std::rc::Rc;

use glam::Vec2;

use super::mask::Mask;
use super::obstacle::Orientation;
use super::sdf::{op_subtract, op_union, sd_circle, sd_ellipse, sd_rounded_box, sd_triangle};
use crate::consts::*;

/// What a drawable is, for palette selection by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Hills,
    Ground,
    Player,
    Obstacle { variant: u8 },
}

/// Propeller half-length per animation frame
const PROPELLER_LENGTHS: [f32; PLAYER_FRAME_COUNT] = [20.0, 12.0, 4.0];

/// Shared, immutable sprite masks for one game
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub hills: Rc<Mask>,
    pub ground: Rc<Mask>,
    pub player_frames: Rc<[Mask]>,
    /// Indexed by variant, then `[Bottom, Top]`
    obstacles: Vec<[Rc<Mask>; 2]>,
}

impl Default for SpriteSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteSet {
    pub fn new() -> Self {
        let obstacles = (0..OBSTACLE_VARIANTS)
            .map(|variant| {
                let bottom = obstacle_silhouette(variant);
                let top = bottom.flipped_vertical();
                [Rc::new(bottom), Rc::new(top)]
            })
            .collect();

        Self {
            hills: Rc::new(hills()),
            ground: Rc::new(ground()),
            player_frames: player_frames(),
            obstacles,
        }
    }

    /// Mask for an obstacle variant in the given orientation
    pub fn obstacle(&self, variant: usize, orientation: Orientation) -> Rc<Mask> {
        let pair = &self.obstacles[variant % self.obstacles.len()];
        match orientation {
            Orientation::Bottom => Rc::clone(&pair[0]),
            Orientation::Top => Rc::clone(&pair[1]),
        }
    }
}

/// The airplane's animation frames, one per propeller position
pub fn player_frames() -> Rc<[Mask]> {
    PROPELLER_LENGTHS
        .iter()
        .map(|&len| player_frame(len))
        .collect()
}

/// Side view of the airplane, nose pointing right
fn player_frame(propeller: f32) -> Mask {
    Mask::from_sdf(PLAYER_WIDTH, PLAYER_HEIGHT, |p| {
        let body = sd_ellipse(p, Vec2::new(32.0, 26.0), Vec2::new(26.0, 10.0));
        let cockpit = sd_circle(p, Vec2::new(38.0, 17.0), 7.0);
        let wing = sd_ellipse(p, Vec2::new(28.0, 29.0), Vec2::new(14.0, 4.0));
        let tail = sd_triangle(
            p,
            Vec2::new(3.0, 8.0),
            Vec2::new(18.0, 22.0),
            Vec2::new(6.0, 27.0),
        );
        let nose = sd_circle(p, Vec2::new(58.0, 26.0), 4.0);
        let prop = sd_rounded_box(p, Vec2::new(63.5, 26.0), Vec2::new(1.5, propeller), 1.5);

        [cockpit, wing, tail, nose, prop]
            .into_iter()
            .fold(body, op_union)
    })
}

/// Obstacle resting on the ground, tip pointing up
fn obstacle_silhouette(variant: usize) -> Mask {
    let (w, h) = (OBSTACLE_WIDTH as f32, OBSTACLE_HEIGHT as f32);
    let cx = w / 2.0;
    Mask::from_sdf(OBSTACLE_WIDTH, OBSTACLE_HEIGHT, |p| match variant {
        // Rock spire
        0 => op_union(
            sd_triangle(p, Vec2::new(2.0, h), Vec2::new(w - 2.0, h), Vec2::new(cx, 0.0)),
            sd_rounded_box(p, Vec2::new(cx, h - 60.0), Vec2::new(cx - 2.0, 60.0), 8.0),
        ),
        // Crystal column with a chipped flank
        _ => {
            let column = sd_rounded_box(
                p,
                Vec2::new(cx, h / 2.0 + 20.0),
                Vec2::new(26.0, h / 2.0 - 20.0),
                6.0,
            );
            let cap = sd_circle(p, Vec2::new(cx, 44.0), 28.0);
            let chip = sd_circle(p, Vec2::new(w, h * 0.4), 14.0);
            op_subtract(op_union(column, cap), chip)
        }
    })
}

/// Two identical ground tiles side by side, so any scroll offset within one
/// tile covers the window
fn ground() -> Mask {
    let tile = WINDOW_WIDTH as u32;
    Mask::from_fn(tile * 2, GROUND_HEIGHT, |x, y| {
        let x = (x % tile) as f32;
        let grass = 14.0 + 6.0 * (x * TAU / 80.0).sin();
        y as f32 >= grass
    })
}

/// Two tiles of rolling hills behind the play field
fn hills() -> Mask {
    let tile = WINDOW_WIDTH as u32;
    Mask::from_fn(tile * 2, HILLS_HEIGHT, |x, y| {
        let x = (x % tile) as f32;
        let crest =
            140.0 + 50.0 * (x * TAU / 240.0).sin() + 30.0 * (x * TAU / 160.0 + 1.0).sin();
        y as f32 >= crest
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_frames_share_size() {
        let sprites = SpriteSet::new();
        assert_eq!(sprites.player_frames.len(), PLAYER_FRAME_COUNT);
        for frame in sprites.player_frames.iter() {
            assert_eq!(frame.width(), PLAYER_WIDTH);
            assert_eq!(frame.height(), PLAYER_HEIGHT);
            assert!(frame.count() > 0);
        }
        // Long propeller covers more pixels than the short one
        assert!(sprites.player_frames[0].count() > sprites.player_frames[2].count());
    }

    #[test]
    fn test_player_silhouette_is_not_a_box() {
        let frame = player_frame(20.0);
        assert!(frame.get(32, 26), "fuselage centre should be solid");
        assert!(!frame.get(0, 47), "bottom-left corner should be empty");
        assert!(!frame.get(67, 0), "top-right corner should be empty");
    }

    #[test]
    fn test_top_obstacle_is_flipped_bottom() {
        let sprites = SpriteSet::new();
        for variant in 0..OBSTACLE_VARIANTS {
            let bottom = sprites.obstacle(variant, Orientation::Bottom);
            let top = sprites.obstacle(variant, Orientation::Top);
            assert_eq!(*top, bottom.flipped_vertical());
            // Base is wide, tip is narrow
            let base_row = (0..OBSTACLE_WIDTH as i32)
                .filter(|&x| bottom.get(x, OBSTACLE_HEIGHT as i32 - 1))
                .count();
            let tip_row = (0..OBSTACLE_WIDTH as i32).filter(|&x| bottom.get(x, 2)).count();
            assert!(base_row > tip_row);
        }
    }

    #[test]
    fn test_variants_differ() {
        let sprites = SpriteSet::new();
        assert_ne!(
            *sprites.obstacle(0, Orientation::Bottom),
            *sprites.obstacle(1, Orientation::Bottom)
        );
    }

    #[test]
    fn test_scrolling_masks_tile_seamlessly() {
        let sprites = SpriteSet::new();
        let tile = WINDOW_WIDTH as i32;
        for mask in [&sprites.ground, &sprites.hills] {
            for y in 0..mask.height() as i32 {
                for x in 0..tile {
                    assert_eq!(mask.get(x, y), mask.get(x + tile, y), "seam at ({x}, {y})");
                }
            }
        }
    }
}
