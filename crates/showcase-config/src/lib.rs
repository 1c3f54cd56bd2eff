//! Showcase Config
//!
//! This crate contains the serializable configuration types for the showcase
//! asset pipeline. These types describe *what* to acquire (the asset table) and
//! *how* to shape it (normalizer and placeholder settings) before any network
//! or filesystem work happens.
//!
//! Configuration can come from:
//! - The compiled-in reference table ([`AssetTable::reference`])
//! - A JSON manifest (via CLI with `--manifest=assets.json`)
//!
//! Every value here is immutable once built and is passed explicitly into the
//! pipeline; nothing is read from process-wide state.

mod asset;
mod color;
mod error;
mod manifest;
mod settings;

pub use asset::{AssetSpec, AssetTable};
pub use color::HexColor;
pub use error::ConfigError;
pub use manifest::{DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS, Manifest};
pub use settings::{NormalizeSettings, PlaceholderSettings};
