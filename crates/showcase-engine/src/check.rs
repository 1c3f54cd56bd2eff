//! Viewer-side availability of declared assets.
//!
//! The content viewer only renders an image whose file exists and is larger
//! than a small threshold; anything else is replaced by text. This check runs
//! the same rule over the output location without writing anything.

use serde::Serialize;
use showcase_artifact::Store;
use showcase_config::AssetTable;

/// Files at or below this size are treated as empty by the viewer.
pub const MIN_RENDERABLE_BYTES: u64 = 1000;

/// How the viewer will treat a declared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
  Renderable { size: u64 },
  TooSmall { size: u64 },
  Absent,
}

impl Availability {
  pub fn classify(size: Option<u64>, min_bytes: u64) -> Self {
    match size {
      Some(size) if size > min_bytes => Self::Renderable { size },
      Some(size) => Self::TooSmall { size },
      None => Self::Absent,
    }
  }

  pub fn is_renderable(self) -> bool {
    matches!(self, Self::Renderable { .. })
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityEntry {
  pub name: String,
  #[serde(flatten)]
  pub availability: Availability,
}

/// Classify every declared name, in table order.
pub async fn check_assets<S: Store + ?Sized>(
  store: &S,
  table: &AssetTable,
  min_bytes: u64,
) -> Result<Vec<AvailabilityEntry>, showcase_artifact::Error> {
  let mut entries = Vec::with_capacity(table.len());
  for asset in table {
    let size = store.size(&asset.name).await?;
    entries.push(AvailabilityEntry {
      name: asset.name.clone(),
      availability: Availability::classify(size, min_bytes),
    });
  }
  Ok(entries)
}
