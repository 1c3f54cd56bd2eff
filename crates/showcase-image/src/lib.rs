//! Showcase Image
//!
//! Turns arbitrary fetched bytes into bounded, consistently encoded files.
//!
//! - [`Normalizer`] decodes (format sniffed from the bytes), flattens colour to
//!   opaque RGB, downsamples into a bounding box without upscaling, and
//!   re-encodes as JPEG at a fixed quality.
//! - [`PlaceholderGenerator`] synthesizes a flat-colour image for names whose
//!   acquisition failed, encoded according to the name's extension.

mod error;
mod format;
mod normalize;
mod placeholder;

pub use error::{NormalizeError, PlaceholderError};
pub use format::OutputFormat;
pub use normalize::{NormalizedImage, Normalizer, fit_within, to_display_safe};
pub use placeholder::{Placeholder, PlaceholderGenerator};
