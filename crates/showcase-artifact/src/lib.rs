//! Showcase Artifact
//!
//! This crate provides the storage trait for pipeline output. Outputs are flat,
//! whole-file blobs addressed by the asset's declared name; there is no
//! nesting and no partial update.
//!
//! The [`Store`] trait is the seam between the pipeline and the medium it
//! writes to. [`FsStore`] stores each key as `{root}/{key}`.

mod fs;

pub use fs::FsStore;

use async_trait::async_trait;
use bytes::Bytes;

/// Error type for artifact storage operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The key is not a flat file name.
  #[error("invalid artifact key: {0}")]
  InvalidKey(String),

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// A stored artifact as seen by a listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Entry {
  pub key: String,
  pub size: u64,
}

/// Artifact storage trait.
///
/// Implementations provide the actual storage backend. Keys are the declared
/// asset names and must be flat (no separators).
#[async_trait]
pub trait Store: Send + Sync {
  /// Make sure the backing location exists.
  async fn prepare(&self) -> Result<(), Error>;

  /// Store an artifact, replacing any existing one under the same key.
  async fn put(&self, key: &str, data: Bytes) -> Result<(), Error>;

  /// Size in bytes, or `None` if nothing is stored under `key`.
  async fn size(&self, key: &str) -> Result<Option<u64>, Error>;

  /// Whether an artifact exists under `key`.
  async fn exists(&self, key: &str) -> Result<bool, Error> {
    Ok(self.size(key).await?.is_some())
  }

  /// Every stored artifact, sorted by key.
  async fn list(&self) -> Result<Vec<Entry>, Error>;
}
