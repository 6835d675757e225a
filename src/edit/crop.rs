//! Interactive crop rectangle for carving a new sprite out of the source image.
//!
//! Pointer positions arrive in display coordinates. Pressing within
//! [`HANDLE_RADIUS`] display pixels of a corner starts a resize of that
//! corner; pressing elsewhere inside the rectangle starts a move. Every
//! drag step is all-or-nothing: a step that would break the invariants
//! (each side at least [`MIN_CROP_SIDE`], fully inside the image) leaves
//! the rectangle exactly as it was.

use tracing::{debug, info};

use crate::error::{Result, SpriteError};
use crate::geometry::{Point, SpriteBounds};
use crate::raster::Raster;
use crate::sprite::{Sprite, SpriteId};

use super::viewport::DisplayScale;

/// Smallest allowed side length, in source pixels.
pub const MIN_CROP_SIDE: f32 = 10.0;
/// Corner hit-test distance, in display pixels.
pub const HANDLE_RADIUS: f32 = 10.0;
/// Side length of a fresh crop rectangle.
pub const DEFAULT_CROP_SIDE: f32 = 100.0;

/// Rectangle in source-image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Corner of the crop rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];
}

impl CropRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => Point::new(self.x, self.y),
            Corner::TopRight => Point::new(self.x + self.width, self.y),
            Corner::BottomLeft => Point::new(self.x, self.y + self.height),
            Corner::BottomRight => Point::new(self.x + self.width, self.y + self.height),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Minimum size is met and the rectangle lies inside a `width` x `height` image.
    pub fn is_valid_within(&self, width: f32, height: f32) -> bool {
        self.width >= MIN_CROP_SIDE
            && self.height >= MIN_CROP_SIDE
            && self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.width <= width
            && self.y + self.height <= height
    }

    /// Drag `corner` by `(dx, dy)`; the opposite corner stays put.
    pub fn resized(&self, corner: Corner, dx: f32, dy: f32) -> Self {
        let mut r = *self;
        match corner {
            Corner::TopLeft => {
                r.x += dx;
                r.y += dy;
                r.width -= dx;
                r.height -= dy;
            }
            Corner::TopRight => {
                r.width += dx;
                r.y += dy;
                r.height -= dy;
            }
            Corner::BottomLeft => {
                r.x += dx;
                r.width -= dx;
                r.height += dy;
            }
            Corner::BottomRight => {
                r.width += dx;
                r.height += dy;
            }
        }
        r
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Integer bounds used when committing, each component rounded.
    pub fn rounded(&self) -> SpriteBounds {
        SpriteBounds::new(
            self.x.round() as i64,
            self.y.round() as i64,
            self.width.round() as u32,
            self.height.round() as u32,
        )
    }
}

/// What the current drag does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Resize(Corner),
    Translate,
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    mode: DragMode,
    /// Last pointer position, in display coordinates.
    last: Point,
}

/// Crop rectangle plus the state of an in-progress drag.
#[derive(Clone, Debug)]
pub struct CropEditor {
    rect: CropRect,
    source_width: f32,
    source_height: f32,
    drag: Option<Drag>,
}

impl CropEditor {
    /// Fresh rectangle at the image origin, [`DEFAULT_CROP_SIDE`] on each side
    /// or the image size if smaller.
    pub fn new(source_width: usize, source_height: usize) -> Result<Self> {
        let (w, h) = Self::check_source(source_width, source_height)?;
        let rect = CropRect::new(0.0, 0.0, DEFAULT_CROP_SIDE.min(w), DEFAULT_CROP_SIDE.min(h));
        Ok(Self::with_rect(rect, w, h))
    }

    /// Start from an existing sprite's bounds, clamped into the image and
    /// grown to the minimum size if needed.
    pub fn from_bounds(bounds: SpriteBounds, source_width: usize, source_height: usize) -> Result<Self> {
        let (w, h) = Self::check_source(source_width, source_height)?;
        let (x, width) = fit_span(bounds.x as f32, bounds.width as f32, w);
        let (y, height) = fit_span(bounds.y as f32, bounds.height as f32, h);
        Ok(Self::with_rect(CropRect::new(x, y, width, height), w, h))
    }

    /// Start from an explicit rectangle, rejecting it if it is too small or
    /// not fully inside the image.
    pub fn with_initial_rect(rect: CropRect, source_width: usize, source_height: usize) -> Result<Self> {
        let (w, h) = Self::check_source(source_width, source_height)?;
        if !rect.is_valid_within(w, h) {
            return Err(SpriteError::InvalidCrop {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
            });
        }
        Ok(Self::with_rect(rect, w, h))
    }

    fn with_rect(rect: CropRect, source_width: f32, source_height: f32) -> Self {
        debug_assert!(rect.is_valid_within(source_width, source_height));
        Self {
            rect,
            source_width,
            source_height,
            drag: None,
        }
    }

    fn check_source(width: usize, height: usize) -> Result<(f32, f32)> {
        let (w, h) = (width as f32, height as f32);
        if w < MIN_CROP_SIDE || h < MIN_CROP_SIDE {
            return Err(SpriteError::SourceTooSmall {
                width,
                height,
                min: MIN_CROP_SIDE,
            });
        }
        Ok((w, h))
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.drag.map(|d| d.mode)
    }

    /// Corner being resized, if any.
    pub fn active_corner(&self) -> Option<Corner> {
        match self.drag_mode() {
            Some(DragMode::Resize(corner)) => Some(corner),
            _ => None,
        }
    }

    /// Press the pointer. Returns the drag mode started, or `None` if the
    /// press missed both the corners and the rectangle.
    pub fn pointer_down(&mut self, display: Point, scale: DisplayScale) -> Option<DragMode> {
        let hit = Corner::ALL.into_iter().find(|&corner| {
            let handle = scale.to_display(self.rect.corner(corner));
            (display.x - handle.x).abs() < HANDLE_RADIUS && (display.y - handle.y).abs() < HANDLE_RADIUS
        });

        let mode = match hit {
            Some(corner) => DragMode::Resize(corner),
            None if self.rect.contains(scale.to_source(display)) => DragMode::Translate,
            None => {
                self.drag = None;
                return None;
            }
        };

        self.drag = Some(Drag { mode, last: display });
        Some(mode)
    }

    /// Move the pointer. Returns `true` if the rectangle changed.
    ///
    /// A rejected step still advances the drag origin, so the pointer has to
    /// travel back before the rectangle follows again.
    pub fn pointer_move(&mut self, display: Point, scale: DisplayScale) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let dx = (display.x - drag.last.x) * scale.x;
        let dy = (display.y - drag.last.y) * scale.y;
        drag.last = display;

        let candidate = match drag.mode {
            DragMode::Resize(corner) => self.rect.resized(corner, dx, dy),
            DragMode::Translate => self.rect.translated(dx, dy),
        };

        if candidate.is_valid_within(self.source_width, self.source_height) {
            self.rect = candidate;
            true
        } else {
            debug!(?candidate, "Crop step rejected");
            false
        }
    }

    /// Release the pointer.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Copy the rectangle out of `source` as a new sprite. No alpha masking
    /// is applied: everything inside the rectangle is kept.
    pub fn commit(&self, source: &Raster, id: SpriteId) -> Result<Sprite> {
        let bounds = self.rect.rounded();
        let raster = source.copy_region(
            bounds.x,
            bounds.y,
            bounds.width as usize,
            bounds.height as usize,
        )?;
        info!(%id, ?bounds, "Crop committed");
        Ok(Sprite::new(id, bounds, raster))
    }
}

/// Clamp a 1D span `[start, start + len)` into `[0, limit]`, growing it to
/// [`MIN_CROP_SIDE`] if it ends up shorter. `limit` must be at least the
/// minimum side.
fn fit_span(start: f32, len: f32, limit: f32) -> (f32, f32) {
    let lo = start.clamp(0.0, limit);
    let hi = (start + len).clamp(0.0, limit);
    let len = (hi - lo).max(MIN_CROP_SIDE);
    let lo = lo.min(limit - len);
    (lo, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_at(rect: CropRect, w: usize, h: usize) -> CropEditor {
        CropEditor::with_rect(rect, w as f32, h as f32)
    }

    fn drag(editor: &mut CropEditor, from: (f32, f32), to: (f32, f32)) -> bool {
        editor.pointer_down(Point::new(from.0, from.1), DisplayScale::IDENTITY);
        let moved = editor.pointer_move(Point::new(to.0, to.1), DisplayScale::IDENTITY);
        editor.pointer_up();
        moved
    }

    #[test]
    fn test_default_rect() {
        let editor = CropEditor::new(300, 200).unwrap();
        assert_eq!(editor.rect(), CropRect::new(0.0, 0.0, 100.0, 100.0));

        let small = CropEditor::new(40, 60).unwrap();
        assert_eq!(small.rect(), CropRect::new(0.0, 0.0, 40.0, 60.0));
    }

    #[test]
    fn test_source_too_small() {
        assert!(matches!(
            CropEditor::new(9, 100),
            Err(SpriteError::SourceTooSmall { .. })
        ));
    }

    #[test]
    fn test_from_bounds_clamps_padding() {
        let editor = CropEditor::from_bounds(SpriteBounds::new(-1, -1, 12, 4), 50, 50).unwrap();
        let rect = editor.rect();
        assert_eq!((rect.x, rect.width), (0.0, 11.0));
        assert_eq!((rect.y, rect.height), (0.0, 10.0));
        assert!(rect.is_valid_within(50.0, 50.0));
    }

    #[test]
    fn test_initial_rect_validated() {
        assert!(CropEditor::with_initial_rect(CropRect::new(5.0, 5.0, 20.0, 20.0), 30, 30).is_ok());
        assert!(matches!(
            CropEditor::with_initial_rect(CropRect::new(15.0, 5.0, 20.0, 20.0), 30, 30),
            Err(SpriteError::InvalidCrop { .. })
        ));
        assert!(CropEditor::with_initial_rect(CropRect::new(0.0, 0.0, 9.0, 20.0), 30, 30).is_err());
    }

    #[test]
    fn test_corner_hit_test() {
        let mut editor = editor_at(CropRect::new(20.0, 20.0, 40.0, 40.0), 100, 100);
        let s = DisplayScale::IDENTITY;

        assert_eq!(
            editor.pointer_down(Point::new(25.0, 15.0), s),
            Some(DragMode::Resize(Corner::TopLeft))
        );
        assert_eq!(editor.active_corner(), Some(Corner::TopLeft));
        assert_eq!(
            editor.pointer_down(Point::new(59.0, 61.0), s),
            Some(DragMode::Resize(Corner::BottomRight))
        );
        assert_eq!(editor.pointer_down(Point::new(40.0, 40.0), s), Some(DragMode::Translate));
        assert_eq!(editor.active_corner(), None);
        assert_eq!(editor.pointer_down(Point::new(90.0, 90.0), s), None);
        assert!(!editor.pointer_move(Point::new(95.0, 95.0), s));
    }

    #[test]
    fn test_hit_test_uses_display_space() {
        // Image shown at half size: corner (40, 40) is drawn at (20, 20)
        let mut editor = editor_at(CropRect::new(0.0, 0.0, 40.0, 40.0), 100, 100);
        let scale = DisplayScale::new(100.0, 100.0, 50.0, 50.0);
        assert_eq!(
            editor.pointer_down(Point::new(22.0, 18.0), scale),
            Some(DragMode::Resize(Corner::BottomRight))
        );
        // Display delta of 5 is 10 source pixels
        assert!(editor.pointer_move(Point::new(27.0, 18.0), scale));
        assert_eq!(editor.rect(), CropRect::new(0.0, 0.0, 50.0, 40.0));
    }

    #[test]
    fn test_resize_each_corner() {
        let base = CropRect::new(20.0, 20.0, 40.0, 40.0);

        let mut e = editor_at(base, 100, 100);
        assert!(drag(&mut e, (20.0, 20.0), (25.0, 30.0)));
        assert_eq!(e.rect(), CropRect::new(25.0, 30.0, 35.0, 30.0));

        let mut e = editor_at(base, 100, 100);
        assert!(drag(&mut e, (60.0, 20.0), (65.0, 30.0)));
        assert_eq!(e.rect(), CropRect::new(20.0, 30.0, 45.0, 30.0));

        let mut e = editor_at(base, 100, 100);
        assert!(drag(&mut e, (20.0, 60.0), (25.0, 70.0)));
        assert_eq!(e.rect(), CropRect::new(25.0, 20.0, 35.0, 50.0));

        let mut e = editor_at(base, 100, 100);
        assert!(drag(&mut e, (60.0, 60.0), (65.0, 70.0)));
        assert_eq!(e.rect(), CropRect::new(20.0, 20.0, 45.0, 50.0));
    }

    #[test]
    fn test_resize_below_minimum_rejected() {
        let base = CropRect::new(20.0, 20.0, 40.0, 40.0);
        let mut e = editor_at(base, 100, 100);
        assert!(!drag(&mut e, (60.0, 60.0), (29.0, 50.0)));
        assert_eq!(e.rect(), base);

        // Exactly the minimum is allowed
        assert!(drag(&mut e, (60.0, 60.0), (30.0, 30.0)));
        assert_eq!(e.rect(), CropRect::new(20.0, 20.0, 10.0, 10.0));
    }

    #[test]
    fn test_resize_out_of_bounds_rejected() {
        let base = CropRect::new(5.0, 5.0, 40.0, 40.0);
        let mut e = editor_at(base, 100, 100);
        assert!(!drag(&mut e, (5.0, 5.0), (-1.0, 3.0)));
        assert_eq!(e.rect(), base);
    }

    #[test]
    fn test_translate() {
        let base = CropRect::new(20.0, 20.0, 40.0, 40.0);
        let mut e = editor_at(base, 100, 100);
        assert!(drag(&mut e, (40.0, 40.0), (50.0, 35.0)));
        assert_eq!(e.rect(), CropRect::new(30.0, 15.0, 40.0, 40.0));
    }

    #[test]
    fn test_translate_out_of_bounds_rejected_in_full() {
        let base = CropRect::new(50.0, 20.0, 40.0, 40.0);
        let mut e = editor_at(base, 100, 100);
        // Would put the right edge at 101
        assert!(!drag(&mut e, (70.0, 40.0), (81.0, 30.0)));
        assert_eq!(e.rect(), base);
    }

    #[test]
    fn test_rejected_step_advances_origin() {
        let base = CropRect::new(50.0, 20.0, 40.0, 40.0);
        let mut e = editor_at(base, 100, 100);
        let s = DisplayScale::IDENTITY;
        e.pointer_down(Point::new(70.0, 40.0), s);
        assert!(!e.pointer_move(Point::new(90.0, 40.0), s));
        assert!(e.pointer_move(Point::new(85.0, 40.0), s));
        assert_eq!(e.rect(), CropRect::new(45.0, 20.0, 40.0, 40.0));
    }

    #[test]
    fn test_commit_copies_without_masking() {
        let mut source = Raster::transparent(30, 30).unwrap();
        source.set_pixel(12, 12, [1, 2, 3, 255]);
        source.set_pixel(14, 12, [4, 5, 6, 40]);

        let e = editor_at(CropRect::new(10.4, 9.6, 10.2, 11.0), 30, 30);
        let sprite = e.commit(&source, SpriteId(5)).unwrap();

        assert_eq!(sprite.bounds, SpriteBounds::new(10, 10, 10, 11));
        assert_eq!(sprite.raster().pixel(2, 2), [1, 2, 3, 255]);
        assert_eq!(sprite.raster().pixel(4, 2), [4, 5, 6, 40]);
        assert_eq!(sprite.raster().count_alpha_above(0), 2);
    }
}
