use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use showcase_config::AssetSpec;

use crate::Fetcher;
use crate::error::FetchError;

/// Fetcher that answers from a fixed URL -> response map.
///
/// Unknown URLs fail with [`FetchError::Connect`], mirroring an unreachable
/// host. Every call is recorded so tests can assert order and count.
///
/// # Example
/// ```ignore
/// let fetcher = StaticFetcher::new()
///   .with_bytes("https://example.com/a.jpg", jpeg_bytes)
///   .with_error("https://example.com/b.jpg", FetchError::Timeout { url: "...".into() });
/// ```
#[derive(Debug, Default)]
pub struct StaticFetcher {
  responses: HashMap<String, Result<Bytes, FetchError>>,
  calls: Mutex<Vec<String>>,
}

impl StaticFetcher {
  pub fn new() -> Self {
    Self::default()
  }

  /// Serve `body` for `url`.
  pub fn with_bytes(mut self, url: impl Into<String>, body: impl Into<Bytes>) -> Self {
    self.responses.insert(url.into(), Ok(body.into()));
    self
  }

  /// Fail every request for `url` with `error`.
  pub fn with_error(mut self, url: impl Into<String>, error: FetchError) -> Self {
    self.responses.insert(url.into(), Err(error));
    self
  }

  /// URLs requested so far, in call order.
  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  pub fn call_count(&self) -> usize {
    self.calls.lock().len()
  }
}

#[async_trait]
impl Fetcher for StaticFetcher {
  async fn fetch(&self, asset: &AssetSpec) -> Result<Bytes, FetchError> {
    self.calls.lock().push(asset.source_url.clone());

    match self.responses.get(&asset.source_url) {
      Some(response) => response.clone(),
      None => Err(FetchError::Connect {
        url: asset.source_url.clone(),
        message: "no route to host".to_string(),
      }),
    }
  }
}
