//! Error types for sprite extraction and editing.

use thiserror::Error;

/// Errors raised by the extraction engine, the edit session and the crop editor.
#[derive(Debug, Error)]
pub enum SpriteError {
    /// Pixel buffer length does not match `width * height * 4`
    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Input array does not have exactly four channels
    #[error("Expected 4 channels (RGBA), got {0}")]
    ChannelCount(usize),

    /// Raster has zero width or height
    #[error("Raster is empty ({width}x{height})")]
    EmptyRaster { width: usize, height: usize },

    /// A setting lies outside its allowed range
    #[error("Setting `{name}` = {value} is outside {min}..={max}")]
    InvalidSetting {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// The pixel surface for an extraction or crop could not be allocated
    #[error("Failed to allocate a {width}x{height} pixel surface")]
    Allocation { width: usize, height: usize },

    /// The source image cannot hold a crop rectangle of the minimum side length
    #[error("Source image {width}x{height} is smaller than the minimum crop size {min}")]
    SourceTooSmall { width: usize, height: usize, min: f32 },

    /// A crop rectangle is below the minimum size or leaves the image
    #[error("Crop rectangle ({x}, {y}, {width}x{height}) is not valid within the image")]
    InvalidCrop {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },

    /// An edit session was saved into a sprite it was not opened for
    #[error("Edit session belongs to sprite {expected}, not {actual}")]
    SessionMismatch { expected: u64, actual: u64 },

    /// No sprite with the given id exists in the collection
    #[error("Unknown sprite id {0}")]
    UnknownSprite(u64),

    /// The requested operation needs a loaded spritesheet
    #[error("No spritesheet loaded")]
    NoSheet,

    /// The requested operation needs a different active edit
    #[error("No {0} edit is open")]
    NoActiveEdit(&'static str),

    /// Decoding or encoding an image failed
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sprite operations
pub type Result<T> = std::result::Result<T, SpriteError>;

#[cfg(feature = "python")]
impl From<SpriteError> for pyo3::PyErr {
    fn from(err: SpriteError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
