//! Tunable parameters for extraction and the erase brush.
//!
//! All settings are plain serde structs with defaults matching the
//! interactive tool, so a partial JSON file fills the rest in:
//!
//! ```json
//! { "min_size": 8, "padding": 0 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpriteError};

/// Fixed alpha cutoff used by [`MaskPolicy::FixedCutoff`]: a pixel is opaque iff `alpha > 1`.
pub const FIXED_ALPHA_CUTOFF: u8 = 1;

pub const MIN_SIZE_RANGE: (u32, u32) = (1, 100);
pub const PADDING_RANGE: (u32, u32) = (0, 10);
pub const BRUSH_SIZE_RANGE: (u32, u32) = (2, 50);

/// How the alpha mask decides that a pixel belongs to a sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskPolicy {
    /// `alpha > 1`, ignoring the configured threshold.
    #[default]
    FixedCutoff,
    /// `alpha > threshold`.
    Threshold,
}

/// Parameters of one extraction pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Opacity threshold (0-255). Only consulted with [`MaskPolicy::Threshold`].
    pub threshold: u8,
    /// Minimum sprite side length in pixels, measured after padding.
    pub min_size: u32,
    /// Transparent margin added on every side of a sprite.
    pub padding: u32,
    pub mask_policy: MaskPolicy,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            threshold: 128,
            min_size: 20,
            padding: 1,
            mask_policy: MaskPolicy::FixedCutoff,
        }
    }
}

impl ExtractionSettings {
    pub fn new(threshold: u8, min_size: u32, padding: u32) -> Self {
        Self {
            threshold,
            min_size,
            padding,
            mask_policy: MaskPolicy::FixedCutoff,
        }
    }

    /// Builder-style switch for the mask policy.
    pub fn with_mask_policy(mut self, policy: MaskPolicy) -> Self {
        self.mask_policy = policy;
        self
    }

    /// The alpha value a pixel must exceed to count as opaque.
    pub fn alpha_cutoff(&self) -> u8 {
        match self.mask_policy {
            MaskPolicy::FixedCutoff => FIXED_ALPHA_CUTOFF,
            MaskPolicy::Threshold => self.threshold,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_range("min_size", self.min_size, MIN_SIZE_RANGE)?;
        check_range("padding", self.padding, PADDING_RANGE)
    }
}

/// Eraser brush parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    /// Brush diameter in raster pixels.
    pub size: u32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self { size: 20 }
    }
}

impl BrushSettings {
    pub fn validate(&self) -> Result<()> {
        check_range("brush.size", self.size, BRUSH_SIZE_RANGE)
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size as f32 / 2.0
    }
}

/// Settings for an erase session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub brush: BrushSettings,
    /// Maximum number of snapshots kept on the undo stack (baseline included).
    /// `None` keeps every snapshot.
    pub history_limit: Option<usize>,
}

impl EditorSettings {
    pub fn validate(&self) -> Result<()> {
        self.brush.validate()?;
        if self.history_limit == Some(0) {
            return Err(SpriteError::InvalidSetting {
                name: "history_limit",
                value: 0,
                min: 1,
                max: i64::MAX,
            });
        }
        Ok(())
    }
}

fn check_range(name: &'static str, value: u32, (min, max): (u32, u32)) -> Result<()> {
    if value < min || value > max {
        return Err(SpriteError::InvalidSetting {
            name,
            value: value as i64,
            min: min as i64,
            max: max as i64,
        });
    }
    Ok(())
}
