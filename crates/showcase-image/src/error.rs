//! Image pipeline errors.

use image::ImageError;

/// Errors from decoding or re-encoding a fetched image.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
  /// The bytes are not a decodable image (corrupt or unsupported format).
  #[error("failed to decode image: {source}")]
  Decode {
    #[source]
    source: ImageError,
  },

  /// The decoded image has a zero dimension.
  #[error("decoded image is empty ({width}x{height})")]
  EmptyImage { width: u32, height: u32 },

  /// Re-encoding the normalized image failed.
  #[error("failed to encode image: {source}")]
  Encode {
    #[source]
    source: ImageError,
  },
}

/// Errors from synthesizing a placeholder.
#[derive(Debug, thiserror::Error)]
pub enum PlaceholderError {
  #[error("failed to encode placeholder as {format}: {source}")]
  Encode {
    format: String,
    #[source]
    source: ImageError,
  },
}
