//! WebAssembly exports for sprite extraction and cropping.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images cross
//! the boundary as flat RGBA byte arrays (length = width * height * 4).

use wasm_bindgen::prelude::*;

use crate::edit::{CropEditor, CropRect};
use crate::export;
use crate::raster::Raster;
use crate::segmentation;
use crate::settings::{ExtractionSettings, MaskPolicy};
use crate::sprite::{Sprite, SpriteId, SpriteIdAllocator};

fn js_error(err: crate::error::SpriteError) -> JsError {
    JsError::new(&err.to_string())
}

// ============================================================================
// Extraction
// ============================================================================

/// Result of an extraction pass, indexed in scan order.
#[wasm_bindgen]
pub struct ExtractedSprites {
    sprites: Vec<Sprite>,
}

#[wasm_bindgen]
impl ExtractedSprites {
    /// Number of sprites found.
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.sprites.len()
    }

    /// Sprite id at `index`, or 0 if out of range.
    pub fn id(&self, index: usize) -> u64 {
        self.sprites.get(index).map_or(0, |s| s.id.0)
    }

    /// `[x, y, width, height]` of the sprite at `index` in sheet
    /// coordinates. `x` and `y` may be negative when padding crosses the
    /// sheet edge. Empty if out of range.
    pub fn bounds(&self, index: usize) -> Vec<i32> {
        self.sprites.get(index).map_or_else(Vec::new, |s| {
            let b = s.bounds;
            vec![b.x as i32, b.y as i32, b.width as i32, b.height as i32]
        })
    }

    /// Flat RGBA bytes of the sprite at `index`. Empty if out of range.
    pub fn pixels(&self, index: usize) -> Vec<u8> {
        self.sprites
            .get(index)
            .map_or_else(Vec::new, |s| s.raster().to_rgba_vec())
    }

    /// PNG encoding of the sprite at `index`.
    pub fn png(&self, index: usize) -> Result<Vec<u8>, JsError> {
        let sprite = self
            .sprites
            .get(index)
            .ok_or_else(|| JsError::new(&format!("Sprite index {index} out of range")))?;
        export::encode_png(sprite.raster()).map_err(js_error)
    }
}

/// Extract all sprites from a flat RGBA spritesheet.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `threshold` - Alpha threshold, only used with `honor_threshold`
/// * `min_size` - Minimum padded side length (1-100)
/// * `padding` - Transparent border added around each sprite (0-10)
/// * `honor_threshold` - Use `alpha > threshold` instead of `alpha > 1`
#[wasm_bindgen]
pub fn extract_sprites_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
    min_size: u32,
    padding: u32,
    honor_threshold: bool,
) -> Result<ExtractedSprites, JsError> {
    let source = Raster::from_rgba(width, height, data.to_vec()).map_err(js_error)?;
    let policy = if honor_threshold {
        MaskPolicy::Threshold
    } else {
        MaskPolicy::FixedCutoff
    };
    let settings = ExtractionSettings::new(threshold, min_size, padding).with_mask_policy(policy);

    let mut ids = SpriteIdAllocator::new();
    let sprites = segmentation::extract_sprites(&source, &settings, &mut ids).map_err(js_error)?;
    Ok(ExtractedSprites { sprites })
}

// ============================================================================
// Crop
// ============================================================================

/// Cut a rectangle out of a flat RGBA image without alpha masking.
///
/// # Returns
/// Flat RGBA bytes of the rounded rectangle
#[wasm_bindgen]
pub fn crop_sprite_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    x: f32,
    y: f32,
    crop_width: f32,
    crop_height: f32,
) -> Result<Vec<u8>, JsError> {
    let source = Raster::from_rgba(width, height, data.to_vec()).map_err(js_error)?;
    let editor = CropEditor::with_initial_rect(CropRect::new(x, y, crop_width, crop_height), width, height)
        .map_err(js_error)?;
    let sprite = editor.commit(&source, SpriteId(0)).map_err(js_error)?;
    Ok(sprite.raster().to_rgba_vec())
}
