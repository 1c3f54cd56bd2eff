use std::fmt;
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageResult};

/// Container formats the pipeline knows how to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  Jpeg,
  Png,
  Gif,
  Bmp,
}

impl OutputFormat {
  /// Look up the encoder for a file extension (case-insensitive).
  pub fn from_extension(ext: &str) -> Option<Self> {
    match ext.to_ascii_lowercase().as_str() {
      "jpg" | "jpeg" => Some(Self::Jpeg),
      "png" => Some(Self::Png),
      "gif" => Some(Self::Gif),
      "bmp" => Some(Self::Bmp),
      _ => None,
    }
  }

  /// Look up the encoder implied by a file name's extension.
  pub fn from_name(name: &str) -> Option<Self> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() {
      return None;
    }
    Self::from_extension(ext)
  }

  pub fn image_format(self) -> ImageFormat {
    match self {
      Self::Jpeg => ImageFormat::Jpeg,
      Self::Png => ImageFormat::Png,
      Self::Gif => ImageFormat::Gif,
      Self::Bmp => ImageFormat::Bmp,
    }
  }

  /// Encode `image` into this container.
  ///
  /// `jpeg_quality` is ignored by the lossless formats. JPEG input must
  /// already be RGB8 or L8.
  pub fn encode(self, image: &DynamicImage, jpeg_quality: u8) -> ImageResult<Vec<u8>> {
    let mut buf = Vec::new();
    match self {
      Self::Jpeg => {
        let encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality);
        image.write_with_encoder(encoder)?;
      }
      Self::Gif => {
        let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
        rgba.write_to(&mut Cursor::new(&mut buf), ImageFormat::Gif)?;
      }
      Self::Png | Self::Bmp => {
        image.write_to(&mut Cursor::new(&mut buf), self.image_format())?;
      }
    }
    Ok(buf)
  }
}

impl fmt::Display for OutputFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Jpeg => "jpeg",
      Self::Png => "png",
      Self::Gif => "gif",
      Self::Bmp => "bmp",
    };
    f.write_str(name)
  }
}
