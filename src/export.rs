//! PNG encoding of sprite rasters and decoding of uploaded sheets.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::Result;
use crate::raster::Raster;

/// File name a sprite is exported under.
pub fn export_file_name(name: &str) -> String {
    format!("{name}.png")
}

/// Encode a raster as an RGBA8 PNG. Lossless.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        &raster.to_rgba_vec(),
        raster.width() as u32,
        raster.height() as u32,
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

/// Decode any supported image and convert it to RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<Raster> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    Raster::from_rgba(width as usize, height as usize, image.into_raw())
}
