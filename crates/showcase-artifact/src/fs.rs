use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::{Entry, Error, Store};

/// Filesystem-based artifact store.
///
/// Stores artifacts as regular files directly under `root`. Writes replace
/// the whole file; there is no atomic rename, so a concurrent reader could
/// observe a partially written file.
#[derive(Debug, Clone)]
pub struct FsStore {
  root: PathBuf,
}

impl FsStore {
  /// Create a new filesystem store rooted at the given directory.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn key_to_path(&self, key: &str) -> Result<PathBuf, Error> {
    if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
      return Err(Error::InvalidKey(key.to_string()));
    }
    Ok(self.root.join(key))
  }
}

#[async_trait]
impl Store for FsStore {
  async fn prepare(&self) -> Result<(), Error> {
    fs::create_dir_all(&self.root).await?;
    Ok(())
  }

  async fn put(&self, key: &str, data: Bytes) -> Result<(), Error> {
    let path = self.key_to_path(key)?;

    let mut file = File::create(path).await?;
    file.write_all(&data).await?;
    file.flush().await?;
    Ok(())
  }

  async fn size(&self, key: &str) -> Result<Option<u64>, Error> {
    let path = self.key_to_path(key)?;
    match fs::metadata(&path).await {
      Ok(meta) if meta.is_file() => Ok(Some(meta.len())),
      Ok(_) => Ok(None),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(Error::Io(e)),
    }
  }

  async fn list(&self) -> Result<Vec<Entry>, Error> {
    let mut entries = Vec::new();

    let mut dir = fs::read_dir(&self.root).await?;
    while let Some(entry) = dir.next_entry().await? {
      let meta = entry.metadata().await?;
      if !meta.is_file() {
        continue;
      }

      let key = match entry.file_name().into_string() {
        Ok(k) => k,
        Err(raw) => raw.to_string_lossy().into_owned(),
      };
      entries.push(Entry {
        key,
        size: meta.len(),
      });
    }

    entries.sort();
    Ok(entries)
  }
}
