//! Showcase Fetch
//!
//! This crate provides the [`Fetcher`] trait: one network retrieval attempt per
//! asset, yielding the raw payload or a typed [`FetchError`]. There are no
//! retries and no backoff; a failed attempt is final for the current run.
//!
//! - [`HttpFetcher`] performs real requests with reqwest and a bounded timeout.
//! - [`StaticFetcher`] serves canned responses keyed by URL, for tests.

mod error;
mod http;
mod mock;

pub use error::FetchError;
pub use http::HttpFetcher;
pub use mock::StaticFetcher;

use async_trait::async_trait;
use bytes::Bytes;
use showcase_config::AssetSpec;

/// Fetch the raw bytes for a declared asset.
///
/// Implementations must not panic or retry; every failure mode is reported
/// through [`FetchError`].
#[async_trait]
pub trait Fetcher: Send + Sync {
  async fn fetch(&self, asset: &AssetSpec) -> Result<Bytes, FetchError>;
}
