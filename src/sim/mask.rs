//! Per-pixel collision masks
//!
//! A mask marks the opaque pixels of a sprite. Two sprites collide when any
//! opaque pixel of one lands on an opaque pixel of the other after placing
//! both at their integer top-left positions.

use glam::{IVec2, UVec2, Vec2};

/// Bitmap of opaque pixels, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Fully opaque mask
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build a mask by asking `opaque(x, y)` for every pixel
    pub fn from_fn<F>(width: u32, height: u32, opaque: F) -> Self
    where
        F: Fn(u32, u32) -> bool,
    {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(opaque(x, y));
            }
        }
        Self { width, height, bits }
    }

    /// Rasterize a signed distance function, sampling pixel centres
    pub fn from_sdf<F>(width: u32, height: u32, sdf: F) -> Self
    where
        F: Fn(Vec2) -> f32,
    {
        Self::from_fn(width, height, |x, y| {
            sdf(Vec2::new(x as f32 + 0.5, y as f32 + 0.5)) <= 0.0
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Pixel lookup; anything outside the bitmap is transparent
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Number of opaque pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Mirror top-to-bottom
    pub fn flipped_vertical(&self) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(x as i32, (self.height - 1 - y) as i32)
        })
    }

    /// Rotate counter-clockwise (as seen on screen) by `degrees`
    ///
    /// The result grows to the bounding box of the rotated bitmap and keeps
    /// the same centre, so callers re-anchor it on the sprite centre.
    pub fn rotated(&self, degrees: f32) -> Self {
        if degrees == 0.0 {
            return self.clone();
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width as f32, self.height as f32);
        // Trim float noise so right-angle turns keep exact sizes
        let new_w = (w * cos.abs() + h * sin.abs() - 1e-3).ceil() as u32;
        let new_h = (w * sin.abs() + h * cos.abs() - 1e-3).ceil() as u32;
        let src_center = Vec2::new(w, h) * 0.5;
        let dst_center = Vec2::new(new_w as f32, new_h as f32) * 0.5;

        Self::from_fn(new_w, new_h, |x, y| {
            // Inverse rotation back into source space (screen y points down)
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - dst_center;
            let s = Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + src_center;
            self.get(s.x.floor() as i32, s.y.floor() as i32)
        })
    }

    /// True if any opaque pixel of `other`, placed at `offset` relative to
    /// this mask's top-left corner, lands on an opaque pixel of this mask
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);

        (y0..y1).any(|y| {
            (x0..x1).any(|x| self.get(x, y) && other.get(x - offset.x, y - offset.y))
        })
    }

    /// Horizontal runs of opaque pixels as `(y, x_start, x_end_exclusive)`
    pub fn runs(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        (0..self.height).flat_map(move |y| {
            let row = &self.bits[(y * self.width) as usize..((y + 1) * self.width) as usize];
            let mut spans = Vec::new();
            let mut start = None;
            for (x, &opaque) in row.iter().enumerate() {
                match (opaque, start) {
                    (true, None) => start = Some(x as u32),
                    (false, Some(s)) => {
                        spans.push((y, s, x as u32));
                        start = None;
                    }
                    _ => {}
                }
            }
            if let Some(s) = start {
                spans.push((y, s, self.width));
            }
            spans
        })
    }
}

/// A mask placed in the world at an integer pixel position
#[derive(Debug, Clone, Copy)]
pub struct Collider<'a> {
    pub top_left: IVec2,
    pub mask: &'a Mask,
}

impl<'a> Collider<'a> {
    pub fn new(top_left: IVec2, mask: &'a Mask) -> Self {
        Self { top_left, mask }
    }

    /// Pixel-accurate overlap test
    pub fn overlaps(&self, other: &Collider<'_>) -> bool {
        // Widened so far-flung positions cannot overflow the offset
        let dx = other.top_left.x as i64 - self.top_left.x as i64;
        let dy = other.top_left.y as i64 - self.top_left.y as i64;
        let disjoint = dx >= self.mask.width as i64
            || dy >= self.mask.height as i64
            || dx + other.mask.width as i64 <= 0
            || dy + other.mask.height as i64 <= 0;
        !disjoint && self.mask.overlaps(other.mask, IVec2::new(dx as i32, dy as i32))
    }
}
