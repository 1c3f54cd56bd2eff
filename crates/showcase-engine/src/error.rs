//! Pipeline error types.

use serde::Serialize;
use showcase_fetch::FetchError;
use showcase_image::{NormalizeError, PlaceholderError};

/// Errors that stop a run before any asset is processed.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
  /// The output location could not be created.
  #[error("failed to prepare output directory: {source}")]
  OutputDir {
    #[source]
    source: showcase_artifact::Error,
  },
}

/// Why a single asset did not reach its intended state.
///
/// These are recorded, never raised. `Network` and `Decode` route the asset
/// to the placeholder pass; a `Write` failure there leaves it missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetFailure {
  /// Timeout, connection failure, or non-success status.
  #[error("network failure: {reason}")]
  Network { reason: String },

  /// The fetched bytes are not a usable image.
  #[error("decode failure: {reason}")]
  Decode { reason: String },

  /// The output could not be written.
  #[error("write failure: {reason}")]
  Write { reason: String },
}

impl From<&FetchError> for AssetFailure {
  fn from(err: &FetchError) -> Self {
    Self::Network {
      reason: err.to_string(),
    }
  }
}

impl From<&NormalizeError> for AssetFailure {
  fn from(err: &NormalizeError) -> Self {
    Self::Decode {
      reason: err.to_string(),
    }
  }
}

impl From<&PlaceholderError> for AssetFailure {
  fn from(err: &PlaceholderError) -> Self {
    Self::Write {
      reason: err.to_string(),
    }
  }
}

impl From<&showcase_artifact::Error> for AssetFailure {
  fn from(err: &showcase_artifact::Error) -> Self {
    Self::Write {
      reason: err.to_string(),
    }
  }
}
