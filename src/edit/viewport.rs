//! Display-to-raster coordinate conversion.

use crate::geometry::Point;

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 4.0;
pub const ZOOM_STEP: f32 = 0.5;

/// Uniform zoom applied when a sprite is shown for erasing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

impl Viewport {
    pub fn with_zoom(zoom: f32) -> Self {
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Map a point relative to the displayed sprite's top-left corner into
    /// raster pixels.
    pub fn to_raster(&self, display: Point) -> Point {
        Point::new(display.x / self.zoom, display.y / self.zoom)
    }
}

/// Per-axis ratio between source-image pixels and displayed pixels, used
/// while dragging the crop rectangle over a scaled-down preview.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayScale {
    pub x: f32,
    pub y: f32,
}

impl DisplayScale {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// Scale for a `source_*` sized image shown at `displayed_*` size.
    pub fn new(source_width: f32, source_height: f32, displayed_width: f32, displayed_height: f32) -> Self {
        Self {
            x: source_width / displayed_width,
            y: source_height / displayed_height,
        }
    }

    pub fn to_source(&self, display: Point) -> Point {
        Point::new(display.x * self.x, display.y * self.y)
    }

    pub fn to_display(&self, source: Point) -> Point {
        Point::new(source.x / self.x, source.y / self.y)
    }
}
