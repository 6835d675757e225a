//! Brush-erase session over a working copy of one sprite's raster.
//!
//! A stroke starts with a single round dab and continues with round-capped
//! line segments between consecutive pointer positions, so fast pointer
//! motion still leaves a continuous trail. Only the end of a stroke commits
//! an undo snapshot.

use tracing::debug;

use crate::error::{Result, SpriteError};
use crate::geometry::Point;
use crate::raster::Raster;
use crate::settings::{BrushSettings, EditorSettings};
use crate::sprite::{Sprite, SpriteId};

use super::history::History;

/// Whether a stroke is in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeState {
    Idle,
    Erasing { last: Point },
}

/// Working copy, history and brush state for one sprite being erased.
#[derive(Clone, Debug)]
pub struct EditSession {
    sprite_id: SpriteId,
    live: Raster,
    history: History,
    brush: BrushSettings,
    stroke: StrokeState,
}

impl EditSession {
    /// Open a session on a copy of `sprite`'s raster. The sprite itself is
    /// untouched until [`EditSession::save`].
    pub fn open(sprite: &Sprite, settings: &EditorSettings) -> Result<Self> {
        settings.validate()?;
        let live = sprite.raster().clone();
        Ok(Self {
            sprite_id: sprite.id,
            history: History::new(live.clone(), settings.history_limit),
            live,
            brush: settings.brush.clone(),
            stroke: StrokeState::Idle,
        })
    }

    pub fn sprite_id(&self) -> SpriteId {
        self.sprite_id
    }

    /// Current working raster, including any stroke in progress.
    pub fn live(&self) -> &Raster {
        &self.live
    }

    pub fn stroke(&self) -> StrokeState {
        self.stroke
    }

    pub fn is_erasing(&self) -> bool {
        matches!(self.stroke, StrokeState::Erasing { .. })
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn set_brush_size(&mut self, size: u32) -> Result<()> {
        let brush = BrushSettings { size };
        brush.validate()?;
        self.brush = brush;
        Ok(())
    }

    /// Press the pointer at `at` (raster coordinates) and erase one dab.
    ///
    /// Ignored if a stroke is already in progress.
    pub fn begin_stroke(&mut self, at: Point) {
        if self.is_erasing() {
            return;
        }
        self.live.erase_disc(at, self.brush.radius());
        self.stroke = StrokeState::Erasing { last: at };
    }

    /// Drag the pointer to `to`, erasing the segment from the previous point.
    ///
    /// Ignored while idle.
    pub fn extend_stroke(&mut self, to: Point) {
        let StrokeState::Erasing { last } = self.stroke else {
            return;
        };
        self.live.erase_segment(last, to, self.brush.radius());
        self.stroke = StrokeState::Erasing { last: to };
    }

    /// Release the pointer and commit the stroke as one undo step.
    ///
    /// Returns `false` if no stroke was in progress.
    pub fn end_stroke(&mut self) -> bool {
        if !self.is_erasing() {
            return false;
        }
        self.stroke = StrokeState::Idle;
        self.history.commit(self.live.clone());
        debug!(
            sprite = %self.sprite_id,
            depth = self.history.undo_depth(),
            "Erase stroke committed"
        );
        true
    }

    /// Revert to the previous committed state. No-op at the baseline or
    /// while a stroke is in progress.
    pub fn undo(&mut self) -> bool {
        if self.is_erasing() {
            return false;
        }
        let applied = self.history.undo(&mut self.live);
        if applied {
            debug!(sprite = %self.sprite_id, "Undo");
        }
        applied
    }

    /// Re-apply the last undone state. No-op with nothing to redo or while
    /// a stroke is in progress.
    pub fn redo(&mut self) -> bool {
        if self.is_erasing() {
            return false;
        }
        let applied = self.history.redo(&mut self.live);
        if applied {
            debug!(sprite = %self.sprite_id, "Redo");
        }
        applied
    }

    pub fn can_undo(&self) -> bool {
        !self.is_erasing() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.is_erasing() && self.history.can_redo()
    }

    /// Move the working raster into `sprite`, ending the session.
    pub fn save(self, sprite: &mut Sprite) -> Result<()> {
        if sprite.id != self.sprite_id {
            return Err(SpriteError::SessionMismatch {
                expected: self.sprite_id.0,
                actual: sprite.id.0,
            });
        }
        sprite.replace_raster(self.live);
        debug!(sprite = %self.sprite_id, "Edits saved");
        Ok(())
    }
}
