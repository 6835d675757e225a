//! The loaded spritesheet, its sprite collection and the one open edit.
//!
//! At most one edit is open at a time, either an erase session or a crop
//! editor. Opening another edit drops the previous one together with any
//! unsaved changes.

use tracing::{debug, info, warn};

use crate::edit::{CropEditor, EditSession, Viewport};
use crate::error::{Result, SpriteError};
use crate::export::{encode_png, export_file_name};
use crate::geometry::Point;
use crate::raster::Raster;
use crate::segmentation::extract_sprites;
use crate::settings::{EditorSettings, ExtractionSettings};
use crate::sprite::{Sprite, SpriteId, SpriteIdAllocator};

/// A sprite plus its optional user-assigned name.
#[derive(Clone, Debug)]
pub struct SpriteEntry {
    pub sprite: Sprite,
    name: Option<String>,
}

/// The edit currently open, if any.
#[derive(Debug)]
pub enum ActiveEdit {
    Erase(EditSession),
    Crop(CropEditor),
}

#[derive(Debug, Default)]
pub struct Workspace {
    source: Option<Raster>,
    entries: Vec<SpriteEntry>,
    ids: SpriteIdAllocator,
    active: Option<ActiveEdit>,
    editor_settings: EditorSettings,
    viewport: Viewport,
}

impl Workspace {
    pub fn new(editor_settings: EditorSettings) -> Self {
        Self {
            editor_settings,
            ..Self::default()
        }
    }

    pub fn source(&self) -> Option<&Raster> {
        self.source.as_ref()
    }

    /// Replace the spritesheet and extract its sprites.
    ///
    /// The previous sprites are discarded before extraction starts, so a
    /// failed pass leaves the workspace with no sprites at all.
    pub fn load_sheet(&mut self, sheet: Raster, settings: &ExtractionSettings) -> Result<usize> {
        self.clear_sprites();
        self.source = Some(sheet);
        self.extract(settings)
    }

    /// Extract again from the current sheet with new settings. Same
    /// discard-first behavior as [`Workspace::load_sheet`].
    pub fn reextract(&mut self, settings: &ExtractionSettings) -> Result<usize> {
        self.clear_sprites();
        self.extract(settings)
    }

    fn extract(&mut self, settings: &ExtractionSettings) -> Result<usize> {
        let source = self.source.as_ref().ok_or(SpriteError::NoSheet)?;
        match extract_sprites(source, settings, &mut self.ids) {
            Ok(sprites) => {
                self.entries = sprites
                    .into_iter()
                    .map(|sprite| SpriteEntry { sprite, name: None })
                    .collect();
                Ok(self.entries.len())
            }
            Err(e) => {
                warn!(error = %e, "Extraction failed; sprite collection left empty");
                Err(e)
            }
        }
    }

    /// Drop every sprite and any open edit.
    pub fn clear_sprites(&mut self) {
        if !self.entries.is_empty() {
            info!(count = self.entries.len(), "Discarding sprite collection");
        }
        self.entries.clear();
        self.active = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.entries.iter().map(|e| &e.sprite)
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.position(id).map(|i| &self.entries[i].sprite)
    }

    fn position(&self, id: SpriteId) -> Option<usize> {
        self.entries.iter().position(|e| e.sprite.id == id)
    }

    fn index_of(&self, id: SpriteId) -> Result<usize> {
        self.position(id).ok_or(SpriteError::UnknownSprite(id.0))
    }

    /// Display name of the sprite at `index`: its user name, or `sprite_{index}`.
    pub fn name_at(&self, index: usize) -> Option<String> {
        self.entries.get(index).map(|entry| display_name(index, entry))
    }

    pub fn rename(&mut self, id: SpriteId, name: impl Into<String>) -> Result<()> {
        let index = self.index_of(id)?;
        self.entries[index].name = Some(name.into());
        Ok(())
    }

    /// Append a sprite (e.g. from a committed crop) to the collection.
    pub fn add_sprite(&mut self, sprite: Sprite) {
        self.entries.push(SpriteEntry { sprite, name: None });
    }

    /// Encode every sprite as PNG, keyed by its export file name.
    pub fn export_all(&self) -> Result<Vec<(String, Vec<u8>)>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let name = display_name(index, entry);
                Ok((export_file_name(&name), encode_png(entry.sprite.raster())?))
            })
            .collect()
    }

    // ========================================================================
    // Active edit
    // ========================================================================

    pub fn active_edit(&self) -> Option<&ActiveEdit> {
        self.active.as_ref()
    }

    fn replace_active(&mut self, edit: ActiveEdit) {
        if self.active.is_some() {
            debug!("Discarding previous unsaved edit");
        }
        self.active = Some(edit);
    }

    /// Open an erase session on sprite `id`.
    pub fn open_erase(&mut self, id: SpriteId) -> Result<&mut EditSession> {
        let index = self.index_of(id)?;
        let session = EditSession::open(&self.entries[index].sprite, &self.editor_settings)?;
        self.replace_active(ActiveEdit::Erase(session));
        self.erase_session_mut().ok_or(SpriteError::NoActiveEdit("erase"))
    }

    /// Open the crop editor starting from sprite `id`'s bounds.
    pub fn open_crop(&mut self, id: SpriteId) -> Result<&mut CropEditor> {
        let index = self.index_of(id)?;
        let source = self.source.as_ref().ok_or(SpriteError::NoSheet)?;
        let editor = CropEditor::from_bounds(
            self.entries[index].sprite.bounds,
            source.width(),
            source.height(),
        )?;
        self.replace_active(ActiveEdit::Crop(editor));
        self.crop_editor_mut().ok_or(SpriteError::NoActiveEdit("crop"))
    }

    /// Open the crop editor with a default rectangle for a brand-new sprite.
    pub fn new_crop(&mut self) -> Result<&mut CropEditor> {
        let source = self.source.as_ref().ok_or(SpriteError::NoSheet)?;
        let editor = CropEditor::new(source.width(), source.height())?;
        self.replace_active(ActiveEdit::Crop(editor));
        self.crop_editor_mut().ok_or(SpriteError::NoActiveEdit("crop"))
    }

    pub fn erase_session_mut(&mut self) -> Option<&mut EditSession> {
        match self.active.as_mut() {
            Some(ActiveEdit::Erase(session)) => Some(session),
            _ => None,
        }
    }

    pub fn crop_editor_mut(&mut self) -> Option<&mut CropEditor> {
        match self.active.as_mut() {
            Some(ActiveEdit::Crop(editor)) => Some(editor),
            _ => None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Zoom used to map erase pointer positions onto the sprite.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Start an erase stroke at a display position relative to the shown sprite.
    pub fn erase_pointer_down(&mut self, display: Point) -> Result<()> {
        let at = self.viewport.to_raster(display);
        self.active_erase()?.begin_stroke(at);
        Ok(())
    }

    pub fn erase_pointer_move(&mut self, display: Point) -> Result<()> {
        let to = self.viewport.to_raster(display);
        self.active_erase()?.extend_stroke(to);
        Ok(())
    }

    /// Finish the stroke. Returns whether an undo step was committed.
    pub fn erase_pointer_up(&mut self) -> Result<bool> {
        Ok(self.active_erase()?.end_stroke())
    }

    fn active_erase(&mut self) -> Result<&mut EditSession> {
        self.erase_session_mut().ok_or(SpriteError::NoActiveEdit("erase"))
    }

    /// Close the open edit without saving.
    pub fn close_edit(&mut self) {
        self.active = None;
    }

    /// Save and close the open edit.
    ///
    /// An erase session writes into its sprite; a crop appends a new sprite.
    /// Returns the id of the sprite written or created.
    pub fn save_edit(&mut self) -> Result<SpriteId> {
        match self.active.take() {
            Some(ActiveEdit::Erase(session)) => {
                let id = session.sprite_id();
                let index = self.index_of(id)?;
                session.save(&mut self.entries[index].sprite)?;
                Ok(id)
            }
            Some(ActiveEdit::Crop(editor)) => {
                let source = self.source.as_ref().ok_or(SpriteError::NoSheet)?;
                let sprite = editor.commit(source, self.ids.next_id())?;
                let id = sprite.id;
                self.add_sprite(sprite);
                Ok(id)
            }
            None => Err(SpriteError::NoActiveEdit("erase or crop")),
        }
    }
}

fn display_name(index: usize, entry: &SpriteEntry) -> String {
    entry.name.clone().unwrap_or_else(|| format!("sprite_{index}"))
}
