use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::ConfigError;

/// Bounding box and encoder settings for real images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeSettings {
  pub max_width: u32,
  pub max_height: u32,
  /// JPEG quality, 1..=100.
  pub jpeg_quality: u8,
}

impl Default for NormalizeSettings {
  fn default() -> Self {
    Self {
      max_width: 800,
      max_height: 600,
      jpeg_quality: 85,
    }
  }
}

impl NormalizeSettings {
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.max_width == 0 || self.max_height == 0 {
      return Err(ConfigError::InvalidSetting {
        field: "normalize.max_width/max_height".to_string(),
        message: "bounding box must be non-zero".to_string(),
      });
    }
    if !(1..=100).contains(&self.jpeg_quality) {
      return Err(ConfigError::InvalidSetting {
        field: "normalize.jpeg_quality".to_string(),
        message: format!("{} is outside 1..=100", self.jpeg_quality),
      });
    }
    Ok(())
  }
}

/// Shape of the flat fallback image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaceholderSettings {
  pub width: u32,
  pub height: u32,
  pub color: HexColor,
}

impl Default for PlaceholderSettings {
  fn default() -> Self {
    Self {
      width: 400,
      height: 300,
      color: HexColor([0xf0, 0xf0, 0xf0]),
    }
  }
}

impl PlaceholderSettings {
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.width == 0 || self.height == 0 {
      return Err(ConfigError::InvalidSetting {
        field: "placeholder.width/height".to_string(),
        message: "placeholder size must be non-zero".to_string(),
      });
    }
    Ok(())
  }
}
