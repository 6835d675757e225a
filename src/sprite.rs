//! Sprite entities and their identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::SpriteBounds;
use crate::raster::Raster;

/// Unique identifier of a sprite within one allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteId(pub u64);

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out sprite ids in increasing order, starting at 1.
///
/// Owned by whoever creates sprites so that ids are reproducible for a given
/// sequence of operations.
#[derive(Clone, Debug, Default)]
pub struct SpriteIdAllocator {
    last: u64,
}

impl SpriteIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> SpriteId {
        self.last += 1;
        SpriteId(self.last)
    }
}

/// One extracted (or manually cropped) sprite.
///
/// `raster` is exactly `bounds.width` x `bounds.height` pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub id: SpriteId,
    pub bounds: SpriteBounds,
    raster: Raster,
}

impl Sprite {
    pub(crate) fn new(id: SpriteId, bounds: SpriteBounds, raster: Raster) -> Self {
        debug_assert_eq!(raster.width(), bounds.width as usize);
        debug_assert_eq!(raster.height(), bounds.height as usize);
        Self { id, bounds, raster }
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Replace the stored pixels. Only an edit session save goes through here.
    pub(crate) fn replace_raster(&mut self, raster: Raster) {
        self.raster = raster;
    }
}
