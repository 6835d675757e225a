//! Points and rectangles shared by extraction and the editors.

use serde::{Deserialize, Serialize};

/// A 2D point with sub-pixel precision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Distance from this point to the closest point of a line segment.
    pub fn distance_to_segment(&self, start: &Point, end: &Point) -> f32 {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length_sq = dx * dx + dy * dy;

        if length_sq < 1e-10 {
            return self.distance_to(start);
        }

        // Project onto the line, clamping to the segment
        let t = ((self.x - start.x) * dx + (self.y - start.y) * dy) / length_sq;
        let t = t.clamp(0.0, 1.0);

        let proj = Point::new(start.x + t * dx, start.y + t * dy);
        self.distance_to(&proj)
    }
}

/// Tight bounding box of a connected component, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl PixelBounds {
    /// Bounds of a single pixel.
    pub fn at(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    #[inline]
    pub fn include(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    /// Grow the box by `padding` on every side. The result may extend past the
    /// source image (negative origin or beyond the far edge).
    pub fn padded(&self, padding: u32) -> SpriteBounds {
        SpriteBounds {
            x: self.min_x as i64 - padding as i64,
            y: self.min_y as i64 - padding as i64,
            width: (self.width() as u32).saturating_add(padding.saturating_mul(2)),
            height: (self.height() as u32).saturating_add(padding.saturating_mul(2)),
        }
    }
}

/// Placement of a sprite in source-image coordinates. Width and height
/// already include padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteBounds {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl SpriteBounds {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Both sides are at least `min_size` (inclusive).
    pub fn meets_min_size(&self, min_size: u32) -> bool {
        self.width >= min_size && self.height >= min_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);

        assert_eq!(Point::new(5.0, 3.0).distance_to_segment(&a, &b), 3.0);
        // Past the end clamps to the endpoint
        assert_eq!(Point::new(13.0, 4.0).distance_to_segment(&a, &b), 5.0);
        // Degenerate segment
        assert_eq!(Point::new(3.0, 4.0).distance_to_segment(&a, &a), 5.0);
    }

    #[test]
    fn test_padded_bounds() {
        let mut bounds = PixelBounds::at(10, 10);
        bounds.include(14, 14);
        assert_eq!(bounds.padded(2), SpriteBounds::new(8, 8, 9, 9));
    }

    #[test]
    fn test_padded_bounds_at_origin_go_negative() {
        let bounds = PixelBounds::at(0, 0);
        assert_eq!(bounds.padded(1), SpriteBounds::new(-1, -1, 3, 3));
    }

    #[test]
    fn test_huge_padding_saturates() {
        let bounds = PixelBounds::at(0, 0);
        let padded = bounds.padded(u32::MAX);
        assert_eq!((padded.width, padded.height), (u32::MAX, u32::MAX));
        assert_eq!(padded.x, -(u32::MAX as i64));
    }

    #[test]
    fn test_min_size_inclusive() {
        let bounds = SpriteBounds::new(0, 0, 10, 12);
        assert!(bounds.meets_min_size(10));
        assert!(!bounds.meets_min_size(11));
    }
}
