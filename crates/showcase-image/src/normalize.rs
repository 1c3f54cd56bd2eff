use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use showcase_config::NormalizeSettings;
use tracing::debug;

use crate::error::NormalizeError;
use crate::format::OutputFormat;

/// A fetched image after normalization, ready to be written.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
  /// JPEG-encoded output.
  pub bytes: Vec<u8>,
  pub width: u32,
  pub height: u32,
  pub source_width: u32,
  pub source_height: u32,
  /// Container sniffed from the fetched bytes.
  pub source_format: Option<ImageFormat>,
}

/// Decode -> convert -> downsample -> re-encode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
  settings: NormalizeSettings,
}

impl Normalizer {
  pub fn new(settings: NormalizeSettings) -> Self {
    Self { settings }
  }

  /// Normalize raw bytes presumed to be an image.
  ///
  /// The format is sniffed from the content, not from any name or header.
  /// Output never exceeds the configured bounding box and is never larger
  /// than the source.
  pub fn normalize(&self, bytes: &[u8]) -> Result<NormalizedImage, NormalizeError> {
    let source_format = image::guess_format(bytes).ok();
    let decoded =
      image::load_from_memory(bytes).map_err(|source| NormalizeError::Decode { source })?;

    let (source_width, source_height) = (decoded.width(), decoded.height());
    if source_width == 0 || source_height == 0 {
      return Err(NormalizeError::EmptyImage {
        width: source_width,
        height: source_height,
      });
    }

    let color = decoded.color();
    let image = to_display_safe(decoded);

    let (width, height) = fit_within(
      source_width,
      source_height,
      self.settings.max_width,
      self.settings.max_height,
    );
    let image = if (width, height) == (source_width, source_height) {
      image
    } else {
      image.resize_exact(width, height, FilterType::Lanczos3)
    };

    let bytes = OutputFormat::Jpeg
      .encode(&image, self.settings.jpeg_quality)
      .map_err(|source| NormalizeError::Encode { source })?;

    debug!(
      ?source_format,
      ?color,
      source_width,
      source_height,
      width,
      height,
      encoded_bytes = bytes.len(),
      "normalized image"
    );

    Ok(NormalizedImage {
      bytes,
      width,
      height,
      source_width,
      source_height,
      source_format,
    })
  }
}

/// Convert to a representation the JPEG encoder accepts.
///
/// 8-bit RGB and 8-bit grayscale pass through untouched. Anything with an
/// alpha channel or a wider sample type is flattened to opaque RGB8; alpha is
/// dropped, not composited. Palette images arrive here already expanded by
/// the decoder and take the same path.
pub fn to_display_safe(image: DynamicImage) -> DynamicImage {
  match image {
    DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => image,
    other => DynamicImage::ImageRgb8(other.to_rgb8()),
  }
}

/// Largest size with the source aspect ratio that fits the box.
///
/// Never upscales. The constrained axis lands exactly on the box edge and the
/// other axis is rounded to the nearest pixel (minimum 1).
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
  if width <= max_width && height <= max_height {
    return (width, height);
  }

  let (w, h) = (u64::from(width), u64::from(height));
  let (mw, mh) = (u64::from(max_width), u64::from(max_height));

  // Compare w/h against mw/mh without division.
  let (nw, nh) = if w * mh >= h * mw {
    (mw, ((h * mw + w / 2) / w).clamp(1, mh))
  } else {
    (((w * mh + h / 2) / h).clamp(1, mw), mh)
  };

  // Both values are bounded by u32 inputs.
  (nw as u32, nh as u32)
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use image::{GenericImageView, Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage};

  use super::*;

  fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
  }

  fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
      Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
  }

  #[test]
  fn test_fit_within_exact_box() {
    assert_eq!(fit_within(2000, 1500, 800, 600), (800, 600));
  }

  #[test]
  fn test_fit_within_never_upscales() {
    assert_eq!(fit_within(640, 480, 800, 600), (640, 480));
    assert_eq!(fit_within(800, 600, 800, 600), (800, 600));
    assert_eq!(fit_within(1, 1, 800, 600), (1, 1));
  }

  #[test]
  fn test_fit_within_limits_each_axis() {
    // Wide: width-constrained.
    assert_eq!(fit_within(1600, 400, 800, 600), (800, 200));
    // Tall: height-constrained.
    assert_eq!(fit_within(600, 1200, 800, 600), (300, 600));
    // Only height too large.
    assert_eq!(fit_within(700, 700, 800, 600), (600, 600));
    // Extreme strip keeps at least one pixel.
    assert_eq!(fit_within(100_000, 10, 800, 600), (800, 1));
  }

  #[test]
  fn test_fit_within_preserves_aspect() {
    let cases = [(1920, 1080), (1234, 987), (3001, 1999), (999, 4001), (801, 601)];
    for (w, h) in cases {
      let (nw, nh) = fit_within(w, h, 800, 600);
      assert!(nw <= 800 && nh <= 600, "{w}x{h} -> {nw}x{nh}");
      // Rounding error on the free axis is at most half a pixel.
      let err = (i64::from(nw) * i64::from(h) - i64::from(nh) * i64::from(w)).abs();
      assert!(err <= i64::from(w.max(h)), "{w}x{h} -> {nw}x{nh}");
    }
  }

  #[test]
  fn test_normalize_downsamples_to_box() {
    let bytes = encode(gradient(2000, 1500), ImageFormat::Jpeg);
    let out = Normalizer::default().normalize(&bytes).unwrap();

    assert_eq!((out.width, out.height), (800, 600));
    assert_eq!((out.source_width, out.source_height), (2000, 1500));
    assert_eq!(out.source_format, Some(ImageFormat::Jpeg));

    let decoded = image::load_from_memory_with_format(&out.bytes, ImageFormat::Jpeg).unwrap();
    assert_eq!(decoded.dimensions(), (800, 600));
  }

  #[test]
  fn test_normalize_flattens_alpha_png_to_jpeg() {
    let rgba = RgbaImage::from_pixel(1000, 500, Rgba([10, 200, 30, 128]));
    let bytes = encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Png);

    let out = Normalizer::default().normalize(&bytes).unwrap();
    assert_eq!(out.source_format, Some(ImageFormat::Png));
    assert_eq!((out.width, out.height), (800, 400));

    let decoded = image::load_from_memory(&out.bytes).unwrap();
    assert_eq!(image::guess_format(&out.bytes).unwrap(), ImageFormat::Jpeg);
    assert!(!decoded.color().has_alpha());
  }

  #[test]
  fn test_normalize_keeps_small_images() {
    let bytes = encode(gradient(120, 90), ImageFormat::Png);
    let out = Normalizer::default().normalize(&bytes).unwrap();
    assert_eq!((out.width, out.height), (120, 90));
  }

  #[test]
  fn test_normalize_is_deterministic() {
    let bytes = encode(gradient(1024, 768), ImageFormat::Png);
    let normalizer = Normalizer::default();
    let first = normalizer.normalize(&bytes).unwrap();
    let second = normalizer.normalize(&bytes).unwrap();
    assert_eq!(first.bytes, second.bytes);
  }

  #[test]
  fn test_normalize_respects_custom_box() {
    let settings = NormalizeSettings {
      max_width: 100,
      max_height: 100,
      jpeg_quality: 60,
    };
    let bytes = encode(gradient(400, 200), ImageFormat::Png);
    let out = Normalizer::new(settings).normalize(&bytes).unwrap();
    assert_eq!((out.width, out.height), (100, 50));
  }

  #[test]
  fn test_normalize_rejects_garbage() {
    let err = Normalizer::default()
      .normalize(b"<html>404 not found</html>")
      .unwrap_err();
    assert!(matches!(err, NormalizeError::Decode { .. }));

    let mut truncated = encode(gradient(64, 64), ImageFormat::Png);
    truncated.truncate(40);
    let err = Normalizer::default().normalize(&truncated).unwrap_err();
    assert!(matches!(err, NormalizeError::Decode { .. }));
  }

  #[test]
  fn test_to_display_safe() {
    let rgb = gradient(2, 2);
    assert!(matches!(to_display_safe(rgb), DynamicImage::ImageRgb8(_)));

    let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(2, 2, Luma([7])));
    assert!(matches!(to_display_safe(gray), DynamicImage::ImageLuma8(_)));

    let gray_alpha =
      DynamicImage::ImageLumaA8(image::GrayAlphaImage::from_pixel(2, 2, LumaA([7, 9])));
    assert!(matches!(to_display_safe(gray_alpha), DynamicImage::ImageRgb8(_)));

    let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4])));
    let flat = to_display_safe(rgba);
    match flat {
      DynamicImage::ImageRgb8(buf) => assert_eq!(buf.get_pixel(0, 0), &Rgb([1, 2, 3])),
      other => panic!("expected rgb8, got {:?}", other.color()),
    }
  }
}
