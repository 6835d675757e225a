//! Sprite extraction from a composited spritesheet.
//!
//! The pipeline has three stages, each usable on its own:
//! - **Alpha mask**: per-pixel opacity flag (`alpha_mask.rs`)
//! - **Connected components**: 8-connected flood fill with bounding boxes (`components.rs`)
//! - **Sprite builder**: padded crop with non-member pixels cleared (`sprite_builder.rs`)
//!
//! [`extract_sprites`] chains them. It keeps no state between calls; sprite
//! ids come from the allocator passed in.

pub mod alpha_mask;
pub mod components;
pub mod sprite_builder;

pub use alpha_mask::AlphaMask;
pub use components::{find_components, Component};
pub use sprite_builder::build_sprite_raster;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::raster::Raster;
use crate::settings::ExtractionSettings;
use crate::sprite::{Sprite, SpriteIdAllocator};

/// Extract every sprite from `source`.
///
/// Sprites are returned in the row-major order of their first pixel. Any
/// failure aborts the whole pass and no sprites are returned; ids drawn
/// before the failure are not reused.
pub fn extract_sprites(
    source: &Raster,
    settings: &ExtractionSettings,
    ids: &mut SpriteIdAllocator,
) -> Result<Vec<Sprite>> {
    settings.validate()?;

    let mask = AlphaMask::build(source, settings.alpha_cutoff());
    debug!(
        width = mask.width(),
        height = mask.height(),
        opaque = mask.count(),
        cutoff = settings.alpha_cutoff(),
        "Alpha mask built"
    );

    let components = find_components(&mask, settings.min_size, settings.padding);

    // Cropping is independent per component; collect keeps scan order.
    let rasters = components
        .par_iter()
        .map(|component| build_sprite_raster(source, component, settings.padding))
        .collect::<Result<Vec<_>>>()?;

    let sprites: Vec<Sprite> = rasters
        .into_iter()
        .map(|(bounds, raster)| Sprite::new(ids.next_id(), bounds, raster))
        .collect();

    info!(count = sprites.len(), "Sprites extracted");
    Ok(sprites)
}
