use crate::constants::{MAX_MARGIN_MM, MIN_MARGIN_MM, mm_to_pt};
#[cfg(feature = "serde")]
use crate::types::{ImposeError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Booklet imposition configuration
///
/// Built once per run from caller input and read-only afterwards. The margin is
/// always held in its clamped form, so a config obtained through [`new`](Self::new),
/// [`Default`] or [`load`](Self::load) never carries an out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImpositionConfig {
    /// Uniform margin around the two-page spread, in millimeters (0..=10)
    pub margin_mm: f32,
    /// Draw fold and corner trim marks on every sheet side
    pub add_crop_marks: bool,
}

impl Default for ImpositionConfig {
    fn default() -> Self {
        Self {
            margin_mm: 0.0,
            add_crop_marks: false,
        }
    }
}

impl ImpositionConfig {
    pub fn new(margin_mm: f32, add_crop_marks: bool) -> Self {
        Self {
            margin_mm: clamp_margin_mm(margin_mm),
            add_crop_marks,
        }
    }

    /// Margin converted to points
    pub fn margin_pt(&self) -> f32 {
        mm_to_pt(clamp_margin_mm(self.margin_mm))
    }

    /// Load a config from a JSON file, re-clamping the margin
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self::new(config.margin_mm, config.add_crop_marks))
    }

    /// Save the config to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

/// Clamp a margin to the accepted range.
///
/// Out-of-range values snap to the nearest bound; non-finite input is treated as 0.
pub fn clamp_margin_mm(margin_mm: f32) -> f32 {
    if margin_mm.is_nan() {
        return MIN_MARGIN_MM;
    }
    margin_mm.clamp(MIN_MARGIN_MM, MAX_MARGIN_MM)
}
