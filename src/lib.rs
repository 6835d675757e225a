//! Spritecut
//!
//! Extracts individual sprites from a composited spritesheet and refines
//! them interactively, with Python bindings via PyO3, WASM bindings for
//! JavaScript and a command-line front end.
//!
//! ## Image Format
//! All rasters are straight (non-premultiplied) RGBA u8, shaped
//! (height, width, 4). Transparency alone separates sprites from the
//! background.
//!
//! ## Pipeline
//! - **Segmentation**: alpha mask, 8-connected components, masked crop
//! - **Edit**: brush erase with undo/redo, crop rectangle editor
//! - **Workspace**: the loaded sheet, its sprites and the one open edit
//! - **Export**: PNG encoding under `{name}.png`

pub mod edit;
pub mod error;
pub mod export;
pub mod geometry;
pub mod raster;
pub mod segmentation;
pub mod settings;
pub mod sprite;
pub mod workspace;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Result, SpriteError};
pub use raster::Raster;
pub use settings::{BrushSettings, EditorSettings, ExtractionSettings, MaskPolicy};
pub use sprite::{Sprite, SpriteId, SpriteIdAllocator};
pub use workspace::Workspace;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::prelude::*;
    use pyo3::types::PyBytes;

    use crate::edit::{CropEditor, CropRect};
    use crate::export;
    use crate::raster::Raster;
    use crate::segmentation;
    use crate::settings::{ExtractionSettings, MaskPolicy};
    use crate::sprite::{SpriteId, SpriteIdAllocator};

    type SpriteTuple<'py> = (u64, (i64, i64, u32, u32), Bound<'py, PyArray3<u8>>);

    // ========================================================================
    // Extraction
    // ========================================================================

    /// Extract all sprites from an RGBA u8 spritesheet.
    ///
    /// # Arguments
    /// * `image` - Input image (height, width, 4)
    /// * `threshold` - Alpha threshold, only used with `honor_threshold`
    /// * `min_size` - Minimum padded side length (1-100)
    /// * `padding` - Transparent border added around each sprite (0-10)
    /// * `honor_threshold` - Use `alpha > threshold` instead of `alpha > 1`
    ///
    /// # Returns
    /// List of `(id, (x, y, width, height), pixels)` in scan order
    #[pyfunction]
    #[pyo3(signature = (image, threshold=128, min_size=20, padding=1, honor_threshold=false))]
    pub fn extract_sprites<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        threshold: u8,
        min_size: u32,
        padding: u32,
        honor_threshold: bool,
    ) -> PyResult<Vec<SpriteTuple<'py>>> {
        let source = Raster::from_view(image.as_array())?;
        let policy = if honor_threshold {
            MaskPolicy::Threshold
        } else {
            MaskPolicy::FixedCutoff
        };
        let settings = ExtractionSettings::new(threshold, min_size, padding).with_mask_policy(policy);

        let mut ids = SpriteIdAllocator::new();
        let sprites = segmentation::extract_sprites(&source, &settings, &mut ids)?;
        Ok(sprites
            .into_iter()
            .map(|sprite| {
                let b = sprite.bounds;
                let pixels = sprite.raster().clone().into_array().into_pyarray(py);
                (sprite.id.0, (b.x, b.y, b.width, b.height), pixels)
            })
            .collect())
    }

    /// Cut a rectangle out of an RGBA u8 image without any alpha masking.
    ///
    /// Coordinates are rounded. The rectangle must be at least 10 pixels on
    /// each side and lie inside the image.
    #[pyfunction]
    pub fn crop_sprite<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let source = Raster::from_view(image.as_array())?;
        let editor = CropEditor::with_initial_rect(
            CropRect::new(x, y, width, height),
            source.width(),
            source.height(),
        )?;
        let sprite = editor.commit(&source, SpriteId(0))?;
        Ok(sprite.raster().clone().into_array().into_pyarray(py))
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Encode an RGBA u8 image as PNG bytes.
    #[pyfunction]
    pub fn encode_png<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyBytes>> {
        let raster = Raster::from_view(image.as_array())?;
        let bytes = export::encode_png(&raster)?;
        Ok(PyBytes::new(py, &bytes))
    }

    #[pymodule]
    pub fn spritecut(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(extract_sprites, m)?)?;
        m.add_function(wrap_pyfunction!(crop_sprite, m)?)?;
        m.add_function(wrap_pyfunction!(encode_png, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::spritecut;
