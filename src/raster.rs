//! Owned RGBA pixel buffer and the pixel operations built directly on it.
//!
//! A [`Raster`] wraps an `Array3<u8>` of shape `(height, width, 4)` in
//! row-major order, matching the flat `RGBA RGBA ...` layout produced by
//! image decoders. Every drawing operation (region copy, alpha masking,
//! erasing) is implemented over this buffer; there is no drawing surface.

use ndarray::{s, Array3, ArrayView3, ArrayViewMut3};

use crate::error::{Result, SpriteError};
use crate::geometry::Point;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Fully transparent black, what destination-out erasing leaves behind.
const CLEAR: [u8; 4] = [0, 0, 0, 0];

/// An owned, non-empty RGBA8 raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pixels: Array3<u8>,
}

impl Raster {
    /// Allocate a fully transparent raster.
    ///
    /// Allocation failure is reported as [`SpriteError::Allocation`] instead
    /// of aborting the process.
    pub fn transparent(width: usize, height: usize) -> Result<Self> {
        let alloc_err = || SpriteError::Allocation { width, height };
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(alloc_err)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| alloc_err())?;
        data.resize(len, 0);

        Self::from_rgba(width, height, data)
    }

    /// Wrap a flat RGBA byte buffer (length = width * height * 4).
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SpriteError::EmptyRaster { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(SpriteError::Allocation { width, height })?;
        let actual = data.len();
        if actual != expected {
            return Err(SpriteError::BufferSize { expected, actual });
        }

        let pixels = Array3::from_shape_vec((height, width, CHANNELS), data)
            .map_err(|_| SpriteError::BufferSize { expected, actual })?;
        Ok(Self { pixels })
    }

    /// Copy an `(height, width, 4)` array view of any memory layout.
    pub fn from_view(view: ArrayView3<'_, u8>) -> Result<Self> {
        let (height, width, channels) = view.dim();
        if channels != CHANNELS {
            return Err(SpriteError::ChannelCount(channels));
        }
        Self::from_rgba(width, height, view.iter().copied().collect())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    pub(crate) fn view_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        self.pixels.view_mut()
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        [
            self.pixels[[y, x, 0]],
            self.pixels[[y, x, 1]],
            self.pixels[[y, x, 2]],
            self.pixels[[y, x, 3]],
        ]
    }

    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        self.pixels[[y, x, 3]]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        for (c, &v) in rgba.iter().enumerate() {
            self.pixels[[y, x, c]] = v;
        }
    }

    /// Number of pixels whose alpha is above `cutoff`.
    pub fn count_alpha_above(&self, cutoff: u8) -> usize {
        self.pixels
            .slice(s![.., .., 3])
            .iter()
            .filter(|&&a| a > cutoff)
            .count()
    }

    /// Flat RGBA copy in row-major order.
    pub fn to_rgba_vec(&self) -> Vec<u8> {
        self.pixels.iter().copied().collect()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.pixels
    }

    /// Copy the rectangle at `(x, y)` of the given size into a new raster.
    ///
    /// The rectangle may extend past the edges; the part outside the source
    /// comes out fully transparent.
    pub fn copy_region(&self, x: i64, y: i64, width: usize, height: usize) -> Result<Raster> {
        let mut out = Raster::transparent(width, height)?;

        let src_x0 = x.max(0);
        let src_y0 = y.max(0);
        let src_x1 = (x + width as i64).min(self.width() as i64);
        let src_y1 = (y + height as i64).min(self.height() as i64);
        if src_x0 >= src_x1 || src_y0 >= src_y1 {
            return Ok(out);
        }

        let dst_x0 = (src_x0 - x) as usize;
        let dst_y0 = (src_y0 - y) as usize;
        let w = (src_x1 - src_x0) as usize;
        let h = (src_y1 - src_y0) as usize;
        let (sx, sy) = (src_x0 as usize, src_y0 as usize);

        out.pixels
            .slice_mut(s![dst_y0..dst_y0 + h, dst_x0..dst_x0 + w, ..])
            .assign(&self.pixels.slice(s![sy..sy + h, sx..sx + w, ..]));
        Ok(out)
    }

    /// Make every pixel whose center lies within `radius` of `center` fully
    /// transparent. Returns the number of pixels that changed.
    pub fn erase_disc(&mut self, center: Point, radius: f32) -> usize {
        self.erase_where(center, center, radius, |p| p.distance_to(&center) <= radius)
    }

    /// Erase a round-capped line of width `2 * radius` from `from` to `to`.
    /// Returns the number of pixels that changed.
    pub fn erase_segment(&mut self, from: Point, to: Point, radius: f32) -> usize {
        self.erase_where(from, to, radius, |p| p.distance_to_segment(&from, &to) <= radius)
    }

    /// Clear every pixel in the bounding box of `a`, `b` grown by `radius`
    /// whose center satisfies `inside`.
    fn erase_where(
        &mut self,
        a: Point,
        b: Point,
        radius: f32,
        inside: impl Fn(&Point) -> bool,
    ) -> usize {
        let (width, height) = (self.width() as i64, self.height() as i64);
        let left = ((a.x.min(b.x) - radius).floor() as i64).max(0);
        let top = ((a.y.min(b.y) - radius).floor() as i64).max(0);
        let right = ((a.x.max(b.x) + radius).ceil() as i64).min(width - 1);
        let bottom = ((a.y.max(b.y) + radius).ceil() as i64).min(height - 1);

        let mut changed = 0;
        for py in top..=bottom {
            for px in left..=right {
                let pixel_center = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                if !inside(&pixel_center) {
                    continue;
                }
                let (x, y) = (px as usize, py as usize);
                if self.pixel(x, y) != CLEAR {
                    self.set_pixel(x, y, CLEAR);
                    changed += 1;
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Raster {
        let data = rgba.iter().copied().cycle().take(width * height * 4).collect();
        Raster::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn test_oversized_dimensions_are_an_error() {
        assert!(matches!(
            Raster::from_rgba(usize::MAX / 2, 3, Vec::new()),
            Err(SpriteError::Allocation { .. })
        ));
        assert!(matches!(
            Raster::from_rgba(usize::MAX, usize::MAX, Vec::new()),
            Err(SpriteError::Allocation { .. })
        ));
    }

    #[test]
    fn test_allocation_failure_is_an_error() {
        assert!(matches!(
            Raster::transparent(usize::MAX / 2, 3),
            Err(SpriteError::Allocation { .. })
        ));
        // Region copies allocate through the same path
        let source = Raster::transparent(2, 2).unwrap();
        assert!(matches!(
            source.copy_region(0, 0, usize::MAX / 2, 3),
            Err(SpriteError::Allocation { .. })
        ));
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let err = Raster::from_rgba(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, SpriteError::BufferSize { expected: 16, actual: 15 }));
    }

    #[test]
    fn test_empty_raster_rejected() {
        assert!(matches!(
            Raster::transparent(0, 5),
            Err(SpriteError::EmptyRaster { .. })
        ));
    }

    #[test]
    fn test_from_view_rejects_rgb() {
        let rgb = Array3::<u8>::zeros((2, 2, 3));
        assert!(matches!(
            Raster::from_view(rgb.view()),
            Err(SpriteError::ChannelCount(3))
        ));
    }

    #[test]
    fn test_from_view_transposed_layout() {
        // A non-standard layout view must still be read in logical order
        let mut arr = Array3::<u8>::zeros((2, 3, 4));
        arr[[1, 2, 0]] = 9;
        let fortran = arr.t().to_owned();
        let back = fortran.t();
        let raster = Raster::from_view(back).unwrap();
        assert_eq!(raster.pixel(2, 1)[0], 9);
        assert_eq!(raster.to_rgba_vec()[(3 + 2) * 4], 9);
    }

    #[test]
    fn test_copy_region_inside() {
        let mut src = Raster::transparent(4, 4).unwrap();
        src.set_pixel(2, 1, [1, 2, 3, 255]);
        let out = src.copy_region(1, 1, 2, 2).unwrap();
        assert_eq!(out.width(), 2);
        assert_eq!(out.pixel(1, 0), [1, 2, 3, 255]);
    }

    #[test]
    fn test_copy_region_outside_is_transparent() {
        let src = filled(3, 3, [10, 20, 30, 255]);
        let out = src.copy_region(-1, -1, 5, 5).unwrap();
        assert_eq!(out.alpha(0, 0), 0);
        assert_eq!(out.alpha(4, 4), 0);
        assert_eq!(out.pixel(1, 1), [10, 20, 30, 255]);
        assert_eq!(out.count_alpha_above(0), 9);

        let far = src.copy_region(10, 10, 2, 2).unwrap();
        assert_eq!(far.count_alpha_above(0), 0);
    }

    #[test]
    fn test_erase_disc() {
        let mut raster = filled(9, 9, [255, 255, 255, 255]);
        let changed = raster.erase_disc(Point::new(4.5, 4.5), 1.0);
        // Center pixel plus its 4 orthogonal neighbors
        assert_eq!(changed, 5);
        assert_eq!(raster.pixel(4, 4), CLEAR);
        assert_eq!(raster.alpha(3, 3), 255);
    }

    #[test]
    fn test_erase_segment_is_continuous() {
        let mut raster = filled(20, 5, [0, 0, 0, 255]);
        raster.erase_segment(Point::new(1.5, 2.5), Point::new(18.5, 2.5), 0.5);
        for x in 1..=18 {
            assert_eq!(raster.alpha(x, 2), 0, "gap at x={x}");
        }
        assert_eq!(raster.alpha(0, 2), 255);
        assert_eq!(raster.alpha(5, 1), 255);
    }

    #[test]
    fn test_erase_clips_to_edges() {
        let mut raster = filled(4, 4, [0, 0, 0, 255]);
        let changed = raster.erase_disc(Point::new(-10.0, -10.0), 3.0);
        assert_eq!(changed, 0);
        raster.erase_disc(Point::new(0.0, 0.0), 1.0);
        assert_eq!(raster.alpha(0, 0), 0);
    }
}
