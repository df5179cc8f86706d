//! Signed distance functions for sprite silhouettes
//!
//! Sprites are authored as unions of simple shapes. A pixel belongs to a
//! sprite when the signed distance at its centre is <= 0.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an axis-aligned box given its centre and half extents
pub fn sd_box(p: Vec2, center: Vec2, half: Vec2) -> f32 {
    let d = (p - center).abs() - half;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Axis-aligned box with rounded corners
#[inline]
pub fn sd_rounded_box(p: Vec2, center: Vec2, half: Vec2, radius: f32) -> f32 {
    sd_box(p, center, half - Vec2::splat(radius)) - radius
}

/// Approximate distance to an axis-aligned ellipse
///
/// Exact inside/outside classification, which is all a mask needs; the
/// magnitude is only a first-order estimate.
pub fn sd_ellipse(p: Vec2, center: Vec2, radii: Vec2) -> f32 {
    let q = (p - center) / radii;
    (q.length() - 1.0) * radii.min_element()
}

/// Signed distance to a triangle
pub fn sd_triangle(p: Vec2, p0: Vec2, p1: Vec2, p2: Vec2) -> f32 {
    let e0 = p1 - p0;
    let e1 = p2 - p1;
    let e2 = p0 - p2;
    let v0 = p - p0;
    let v1 = p - p1;
    let v2 = p - p2;

    let pq0 = v0 - e0 * (v0.dot(e0) / e0.dot(e0)).clamp(0.0, 1.0);
    let pq1 = v1 - e1 * (v1.dot(e1) / e1.dot(e1)).clamp(0.0, 1.0);
    let pq2 = v2 - e2 * (v2.dot(e2) / e2.dot(e2)).clamp(0.0, 1.0);

    // Winding sign so the result is independent of vertex order
    let s = (e0.x * e2.y - e0.y * e2.x).signum();
    let d = Vec2::new(pq0.dot(pq0), s * (v0.x * e0.y - v0.y * e0.x))
        .min(Vec2::new(pq1.dot(pq1), s * (v1.x * e1.y - v1.y * e1.x)))
        .min(Vec2::new(pq2.dot(pq2), s * (v2.x * e2.y - v2.y * e2.x)));

    -d.x.sqrt() * d.y.signum()
}

/// Union of two shapes
#[inline]
pub fn op_union(a: f32, b: f32) -> f32 {
    a.min(b)
}

/// Subtract shape `b` from shape `a`
#[inline]
pub fn op_subtract(a: f32, b: f32) -> f32 {
    a.max(-b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_sign() {
        let c = Vec2::new(10.0, 10.0);
        assert!(sd_circle(Vec2::new(10.0, 10.0), c, 5.0) < 0.0);
        assert!(sd_circle(Vec2::new(20.0, 10.0), c, 5.0) > 0.0);
        assert!((sd_circle(Vec2::new(15.0, 10.0), c, 5.0)).abs() < 1e-5);
    }

    #[test]
    fn test_box_distance() {
        let half = Vec2::new(4.0, 2.0);
        assert!((sd_box(Vec2::ZERO, Vec2::ZERO, half) - (-2.0)).abs() < 1e-5);
        assert!((sd_box(Vec2::new(7.0, 0.0), Vec2::ZERO, half) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_inside_outside_either_winding() {
        let (a, b, c) = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0));
        let inside = Vec2::new(2.0, 2.0);
        let outside = Vec2::new(9.0, 9.0);

        assert!(sd_triangle(inside, a, b, c) < 0.0);
        assert!(sd_triangle(inside, a, c, b) < 0.0);
        assert!(sd_triangle(outside, a, b, c) > 0.0);
        assert!(sd_triangle(outside, a, c, b) > 0.0);
    }

    #[test]
    fn test_ellipse_classification() {
        let radii = Vec2::new(20.0, 5.0);
        assert!(sd_ellipse(Vec2::new(18.0, 0.0), Vec2::ZERO, radii) < 0.0);
        assert!(sd_ellipse(Vec2::new(0.0, 6.0), Vec2::ZERO, radii) > 0.0);
    }

    #[test]
    fn test_subtract() {
        let outer = sd_circle(Vec2::ZERO, Vec2::ZERO, 10.0);
        let hole = sd_circle(Vec2::ZERO, Vec2::ZERO, 3.0);
        assert!(op_subtract(outer, hole) > 0.0);
        assert!(op_union(outer, hole) < 0.0);
    }
}
