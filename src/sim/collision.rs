//! Fatal-collision detection
//!
//! Detection only: the caller decides what a hit means for the game phase.

use super::mask::Collider;
use super::player::PlayerBody;

/// True if the player touched the ceiling or any collidable this frame
///
/// Hit-testing is per pixel: the player's tilted silhouette against each
/// collidable's mask. The ground is passed in as a collidable like any
/// obstacle; only the ceiling is a plain coordinate check.
pub fn check<'a, I>(player: &PlayerBody, collidables: I) -> bool
where
    I: IntoIterator<Item = Collider<'a>>,
{
    if hits_ceiling(player) {
        return true;
    }
    let body = player.collider();
    collidables.into_iter().any(|other| body.overlaps(&other))
}

/// Top edge of the untilted sprite at or above the window top
#[inline]
pub fn hits_ceiling(player: &PlayerBody) -> bool {
    player.position.y <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::mask::Mask;
    use crate::sim::sprite::player_frames;
    use crate::player_spawn_point;
    use glam::{IVec2, Vec2};

    fn player_at(y: f32) -> PlayerBody {
        let mut p = PlayerBody::new(
            Vec2::new(player_spawn_point().x, y),
            GRAVITY,
            JUMP_IMPULSE,
            player_frames(),
        );
        p.rotate();
        p
    }

    #[test]
    fn test_mid_air_no_collidables_is_safe() {
        let p = player_at(300.0);
        assert!(!check(&p, std::iter::empty()));
    }

    #[test]
    fn test_ceiling_is_fatal() {
        assert!(check(&player_at(0.0), std::iter::empty()));
        assert!(check(&player_at(-12.0), std::iter::empty()));
        assert!(!check(&player_at(0.5), std::iter::empty()));
    }

    #[test]
    fn test_coincident_shape_is_fatal() {
        let p = player_at(300.0);
        let twin = p.mask().clone();
        let collider = p.collider();
        assert!(check(&p, [Collider::new(collider.top_left, &twin)]));
    }

    #[test]
    fn test_bounding_boxes_overlap_but_pixels_do_not() {
        let p = player_at(300.0);
        let body = p.collider();
        // A block tucked into the empty bottom-left corner of the sprite box
        let block = Mask::filled(4, 4);
        let corner = body.top_left + IVec2::new(0, body.mask.height() as i32 - 4);
        assert!(!check(&p, [Collider::new(corner, &block)]));

        // Same block over the fuselage centre
        let centre = body.top_left + body.mask.size().as_ivec2() / 2;
        assert!(check(&p, [Collider::new(centre, &block)]));
    }

    #[test]
    fn test_any_of_many() {
        let p = player_at(300.0);
        let far = Mask::filled(10, 10);
        let body = p.collider();
        let colliders = [
            Collider::new(IVec2::new(400, 0), &far),
            Collider::new(IVec2::new(400, 600), &far),
            Collider::new(body.top_left + IVec2::new(30, 20), &far),
        ];
        assert!(check(&p, colliders));
        assert!(!check(&p, colliders[..2].iter().copied()));
    }
}
