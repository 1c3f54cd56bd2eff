use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use showcase_config::AssetSpec;
use tracing::{debug, info, instrument, warn};

use crate::Fetcher;
use crate::error::FetchError;

const USER_AGENT: &str = concat!("showcase/", env!("CARGO_PKG_VERSION"));

/// Fetcher backed by a reqwest client.
///
/// The timeout bounds the whole exchange (connect, headers, and body). Only
/// 2xx responses with a fully read body count as success.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
  client: Client,
  timeout: Duration,
}

impl HttpFetcher {
  /// Create a fetcher whose requests give up after `timeout`.
  pub fn new(timeout: Duration) -> Result<Self, FetchError> {
    let client = Client::builder()
      .timeout(timeout)
      .user_agent(USER_AGENT)
      .build()
      .map_err(|e| FetchError::Client {
        message: e.to_string(),
      })?;

    Ok(Self { client, timeout })
  }
}

#[async_trait]
impl Fetcher for HttpFetcher {
  #[instrument(name = "fetch", skip(self, asset), fields(asset = %asset.name, url = %asset.source_url))]
  async fn fetch(&self, asset: &AssetSpec) -> Result<Bytes, FetchError> {
    let url = asset.source_url.as_str();
    debug!(timeout_ms = self.timeout.as_millis() as u64, "sending request");

    let result = async {
      let response = self
        .client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, &e))?;

      let status = response.status();
      if !status.is_success() {
        return Err(FetchError::Status {
          url: url.to_string(),
          status: status.as_u16(),
        });
      }

      response
        .bytes()
        .await
        .map_err(|e| FetchError::from_reqwest(url, &e))
    }
    .await;

    match &result {
      Ok(body) => info!(bytes = body.len(), "download succeeded"),
      Err(e) => warn!(error = %e, "download failed"),
    }

    result
  }
}
