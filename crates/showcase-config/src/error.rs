//! Configuration error types.

/// Errors raised while building or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The asset table has no entries.
  #[error("asset table must contain at least one asset")]
  EmptyTable,

  /// Two assets share the same name.
  #[error("duplicate asset name: {name}")]
  DuplicateName { name: String },

  /// An asset name cannot be used as a flat output file name.
  #[error("invalid asset name '{name}': {message}")]
  InvalidName { name: String, message: String },

  /// An asset source is not a usable http(s) URL.
  #[error("invalid source url for '{name}': {message}")]
  InvalidUrl { name: String, message: String },

  /// A colour string is not in `#rrggbb` form.
  #[error("invalid colour '{value}': expected #rrggbb")]
  InvalidColor { value: String },

  /// A numeric setting is out of range.
  #[error("invalid setting {field}: {message}")]
  InvalidSetting { field: String, message: String },

  /// The manifest JSON could not be parsed.
  #[error("failed to parse manifest: {0}")]
  Parse(#[from] serde_json::Error),
}
