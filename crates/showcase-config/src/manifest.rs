//! JSON manifest describing a pipeline run.
//!
//! # Example
//!
//! ```json
//! {
//!   "output_dir": "static/images",
//!   "timeout_secs": 30,
//!   "normalize": { "max_width": 800, "max_height": 600, "jpeg_quality": 85 },
//!   "placeholder": { "width": 400, "height": 300, "color": "#f0f0f0" },
//!   "assets": [
//!     { "name": "hero_bg.jpg", "source_url": "https://example.com/hero-bg.jpg" }
//!   ]
//! }
//! ```
//!
//! Only `assets` is required.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::asset::AssetTable;
use crate::error::ConfigError;
use crate::settings::{NormalizeSettings, PlaceholderSettings};

pub const DEFAULT_OUTPUT_DIR: &str = "static/images";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  #[serde(default)]
  pub normalize: NormalizeSettings,
  #[serde(default)]
  pub placeholder: PlaceholderSettings,
  pub assets: AssetTable,
}

impl Manifest {
  /// Manifest for the compiled-in reference table with default settings.
  pub fn reference() -> Self {
    Self {
      output_dir: default_output_dir(),
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      normalize: NormalizeSettings::default(),
      placeholder: PlaceholderSettings::default(),
      assets: AssetTable::reference(),
    }
  }

  /// Parse and validate a manifest from JSON text.
  pub fn from_json(text: &str) -> Result<Self, ConfigError> {
    let manifest: Manifest = serde_json::from_str(text)?;
    manifest.validate()?;
    Ok(manifest)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.timeout_secs == 0 {
      return Err(ConfigError::InvalidSetting {
        field: "timeout_secs".to_string(),
        message: "timeout must be non-zero".to_string(),
      });
    }
    self.normalize.validate()?;
    self.placeholder.validate()
  }
}

fn default_output_dir() -> PathBuf {
  PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_timeout_secs() -> u64 {
  DEFAULT_TIMEOUT_SECS
}
