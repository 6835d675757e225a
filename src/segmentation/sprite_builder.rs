//! Crop one connected component out of the source raster.
//!
//! The padded bounding rectangle is copied verbatim first, then every pixel
//! that is not a member of the component gets alpha 0. Without the second
//! step a sprite whose box overlaps a neighbor would carry that neighbor's
//! pixels along.

use ndarray::{s, Array2, Zip};

use crate::error::Result;
use crate::geometry::SpriteBounds;
use crate::raster::Raster;

use super::components::Component;

/// Rasterize `component` into a padded, mask-cleaned sprite raster.
///
/// Returns the raster together with its placement in source coordinates.
pub fn build_sprite_raster(
    source: &Raster,
    component: &Component,
    padding: u32,
) -> Result<(SpriteBounds, Raster)> {
    let bounds = component.bounds.padded(padding);
    let (width, height) = (bounds.width as usize, bounds.height as usize);

    let mut raster = source.copy_region(bounds.x, bounds.y, width, height)?;
    let keep = membership_grid(source.width(), component, bounds);

    let mut pixels = raster.view_mut();
    Zip::from(pixels.slice_mut(s![.., .., 3]))
        .and(&keep)
        .for_each(|alpha, &member| {
            if !member {
                *alpha = 0;
            }
        });

    Ok((bounds, raster))
}

/// Grid over `bounds` that is `true` exactly at the component's pixels.
fn membership_grid(source_width: usize, component: &Component, bounds: SpriteBounds) -> Array2<bool> {
    let mut grid = Array2::from_elem((bounds.height as usize, bounds.width as usize), false);
    for &idx in &component.members {
        let (x, y) = ((idx % source_width) as i64, (idx / source_width) as i64);
        grid[[(y - bounds.y) as usize, (x - bounds.x) as usize]] = true;
    }
    grid
}
