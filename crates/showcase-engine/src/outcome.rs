//! Per-asset state and result.

use serde::Serialize;

use crate::error::AssetFailure;

/// Where an asset is in the two-pass state machine.
///
/// ```text
/// Pending -> Fetched | FetchFailed
/// Fetched -> Written | NormalizeFailed | WriteFailed
/// FetchFailed | NormalizeFailed | WriteFailed -> PlaceholderWritten | Missing
/// ```
///
/// `Written`, `PlaceholderWritten` and `Missing` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetState {
  Pending,
  Fetched,
  FetchFailed,
  NormalizeFailed,
  WriteFailed,
  Written,
  PlaceholderWritten,
  Missing,
}

impl AssetState {
  pub fn is_terminal(self) -> bool {
    matches!(
      self,
      Self::Written | Self::PlaceholderWritten | Self::Missing
    )
  }

  /// True for states that send the asset to the placeholder pass.
  pub fn needs_placeholder(self) -> bool {
    matches!(
      self,
      Self::FetchFailed | Self::NormalizeFailed | Self::WriteFailed
    )
  }
}

/// Everything recorded about one declared asset during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetOutcome {
  pub name: String,
  pub source_url: String,
  pub state: AssetState,
  /// Why real acquisition failed, if it did.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub failure: Option<AssetFailure>,
  /// Why the placeholder could not be written, if it could not.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub placeholder_failure: Option<AssetFailure>,
  /// Final pixel size of whatever was written.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub dimensions: Option<(u32, u32)>,
  /// Bytes written under `name`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bytes_written: Option<u64>,
}

impl AssetOutcome {
  pub(crate) fn pending(name: &str, source_url: &str) -> Self {
    Self {
      name: name.to_string(),
      source_url: source_url.to_string(),
      state: AssetState::Pending,
      failure: None,
      placeholder_failure: None,
      dimensions: None,
      bytes_written: None,
    }
  }

  pub(crate) fn fail(&mut self, state: AssetState, failure: AssetFailure) {
    self.state = state;
    self.failure = Some(failure);
  }

  pub(crate) fn wrote(&mut self, state: AssetState, dimensions: (u32, u32), bytes: u64) {
    self.state = state;
    self.dimensions = Some(dimensions);
    self.bytes_written = Some(bytes);
  }

  /// Real image acquired and written this run.
  pub fn succeeded(&self) -> bool {
    self.state == AssetState::Written
  }
}
