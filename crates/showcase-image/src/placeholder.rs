use image::{DynamicImage, Rgb, RgbImage};
use showcase_config::PlaceholderSettings;
use tracing::warn;

use crate::error::PlaceholderError;
use crate::format::OutputFormat;

/// Encoded flat-colour fallback for a single name.
#[derive(Debug, Clone)]
pub struct Placeholder {
  pub bytes: Vec<u8>,
  pub format: OutputFormat,
  pub width: u32,
  pub height: u32,
  /// False when the name's extension was not recognised and the default
  /// encoder was used instead.
  pub format_recognized: bool,
}

/// Synthesizes fixed-size solid images.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderGenerator {
  settings: PlaceholderSettings,
}

impl PlaceholderGenerator {
  /// Encoder used when a name's extension maps to nothing we can write.
  pub const FALLBACK_FORMAT: OutputFormat = OutputFormat::Jpeg;

  const QUALITY: u8 = 85;

  pub fn new(settings: PlaceholderSettings) -> Self {
    Self { settings }
  }

  /// Render the placeholder for `name`.
  ///
  /// The container follows the name's extension; the name itself is never
  /// rewritten, so an unknown extension still gets a file under that exact
  /// name (JPEG-encoded, with a warning).
  pub fn render(&self, name: &str) -> Result<Placeholder, PlaceholderError> {
    let (format, format_recognized) = match OutputFormat::from_name(name) {
      Some(format) => (format, true),
      None => {
        warn!(
          asset = %name,
          fallback = %Self::FALLBACK_FORMAT,
          "unrecognized extension, encoding placeholder with fallback format"
        );
        (Self::FALLBACK_FORMAT, false)
      }
    };

    let PlaceholderSettings {
      width,
      height,
      color,
    } = self.settings;
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color.rgb())));

    let bytes = format
      .encode(&image, Self::QUALITY)
      .map_err(|source| PlaceholderError::Encode {
        format: format.to_string(),
        source,
      })?;

    Ok(Placeholder {
      bytes,
      format,
      width,
      height,
      format_recognized,
    })
  }
}
