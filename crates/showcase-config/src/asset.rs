use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

const REFERENCE_BASE: &str = "https://academy.tharwah.net/wp-content/uploads/2024/06";

/// A declared pairing of an output file name to its remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSpec {
  /// Output file name, unique within a table (e.g., "cert_pmp.jpg").
  pub name: String,
  /// Remote location the image is fetched from.
  pub source_url: String,
}

impl AssetSpec {
  pub fn new(name: impl Into<String>, source_url: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      source_url: source_url.into(),
    }
  }

  /// Lowercased extension of the declared name, if any.
  pub fn extension(&self) -> Option<String> {
    let (stem, ext) = self.name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
      return None;
    }
    Some(ext.to_ascii_lowercase())
  }
}

/// An ordered, validated set of assets.
///
/// Processing follows table order. Construction guarantees names are unique
/// flat file names and every source is an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<AssetSpec>", into = "Vec<AssetSpec>")]
pub struct AssetTable {
  assets: Vec<AssetSpec>,
}

impl AssetTable {
  /// Validate and build a table.
  pub fn new(assets: Vec<AssetSpec>) -> Result<Self, ConfigError> {
    if assets.is_empty() {
      return Err(ConfigError::EmptyTable);
    }

    let mut seen = HashSet::new();
    for asset in &assets {
      validate_name(&asset.name)?;
      validate_url(asset)?;
      if !seen.insert(asset.name.as_str()) {
        return Err(ConfigError::DuplicateName {
          name: asset.name.clone(),
        });
      }
    }

    Ok(Self { assets })
  }

  /// The compiled-in academy table.
  pub fn reference() -> Self {
    let entries = [
      ("hero_bg.jpg", "hero-bg.jpg"),
      ("logo.png", "tharwah-academy-logo.png"),
      ("cert_cybersecurity.jpg", "cybersecurity-course.jpg"),
      ("cert_shrm.jpg", "shrm-certificate.jpg"),
      ("cert_accounting.jpg", "accounting-course.jpg"),
      ("cert_pmp.jpg", "pmp-course.jpg"),
      ("cert_ai.jpg", "ai-course.jpg"),
      ("cert_training.jpg", "professional-training.jpg"),
      ("stats_bg.jpg", "stats-background.jpg"),
      ("about_us.jpg", "about-tharwah.jpg"),
    ];

    Self {
      assets: entries
        .into_iter()
        .map(|(name, file)| AssetSpec::new(name, format!("{REFERENCE_BASE}/{file}")))
        .collect(),
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = &AssetSpec> {
    self.assets.iter()
  }

  pub fn len(&self) -> usize {
    self.assets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.assets.is_empty()
  }

  pub fn get(&self, name: &str) -> Option<&AssetSpec> {
    self.assets.iter().find(|a| a.name == name)
  }

  /// Declared names in table order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.assets.iter().map(|a| a.name.as_str())
  }
}

impl TryFrom<Vec<AssetSpec>> for AssetTable {
  type Error = ConfigError;

  fn try_from(assets: Vec<AssetSpec>) -> Result<Self, Self::Error> {
    Self::new(assets)
  }
}

impl From<AssetTable> for Vec<AssetSpec> {
  fn from(table: AssetTable) -> Self {
    table.assets
  }
}

impl<'a> IntoIterator for &'a AssetTable {
  type Item = &'a AssetSpec;
  type IntoIter = std::slice::Iter<'a, AssetSpec>;

  fn into_iter(self) -> Self::IntoIter {
    self.assets.iter()
  }
}

fn validate_name(name: &str) -> Result<(), ConfigError> {
  let invalid = |message: &str| ConfigError::InvalidName {
    name: name.to_string(),
    message: message.to_string(),
  };

  if name.trim().is_empty() {
    return Err(invalid("name is empty"));
  }
  if name == "." || name == ".." {
    return Err(invalid("name must be a file name"));
  }
  if name.contains(['/', '\\']) {
    return Err(invalid("name must not contain path separators"));
  }
  Ok(())
}

fn validate_url(asset: &AssetSpec) -> Result<(), ConfigError> {
  let url = Url::parse(&asset.source_url).map_err(|e| ConfigError::InvalidUrl {
    name: asset.name.clone(),
    message: e.to_string(),
  })?;

  match url.scheme() {
    "http" | "https" => Ok(()),
    other => Err(ConfigError::InvalidUrl {
      name: asset.name.clone(),
      message: format!("unsupported scheme: {other}"),
    }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_reference_table_is_valid() {
    let reference = AssetTable::reference();
    let rebuilt = AssetTable::new(reference.iter().cloned().collect()).unwrap();
    assert_eq!(rebuilt.len(), 10);
    assert_eq!(rebuilt.names().next(), Some("hero_bg.jpg"));
    assert!(rebuilt.get("logo.png").is_some());
  }

  #[test]
  fn test_rejects_duplicate_names() {
    let result = AssetTable::new(vec![
      AssetSpec::new("a.jpg", "https://example.com/a.jpg"),
      AssetSpec::new("a.jpg", "https://example.com/b.jpg"),
    ]);
    assert!(matches!(result, Err(ConfigError::DuplicateName { name }) if name == "a.jpg"));
  }

  #[test]
  fn test_rejects_empty_table() {
    assert!(matches!(AssetTable::new(vec![]), Err(ConfigError::EmptyTable)));
  }

  #[test]
  fn test_rejects_path_like_names() {
    for name in ["../a.jpg", "dir/a.jpg", "dir\\a.jpg", "..", " "] {
      let result = AssetTable::new(vec![AssetSpec::new(name, "https://example.com/a.jpg")]);
      assert!(
        matches!(result, Err(ConfigError::InvalidName { .. })),
        "expected {name:?} to be rejected"
      );
    }
  }

  #[test]
  fn test_rejects_non_http_sources() {
    let result = AssetTable::new(vec![AssetSpec::new("a.jpg", "file:///etc/passwd")]);
    assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));

    let result = AssetTable::new(vec![AssetSpec::new("a.jpg", "not a url")]);
    assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
  }

  #[test]
  fn test_extension() {
    assert_eq!(AssetSpec::new("a.JPG", "").extension().as_deref(), Some("jpg"));
    assert_eq!(AssetSpec::new("logo.png", "").extension().as_deref(), Some("png"));
    assert_eq!(AssetSpec::new("noext", "").extension(), None);
    assert_eq!(AssetSpec::new(".hidden", "").extension(), None);
  }

  #[test]
  fn test_deserialize_validates() {
    let json = r#"[{"name": "a.jpg", "source_url": "https://example.com/a.jpg"}]"#;
    let table: AssetTable = serde_json::from_str(json).unwrap();
    assert_eq!(table.len(), 1);

    let json = r#"[]"#;
    assert!(serde_json::from_str::<AssetTable>(json).is_err());
  }
}
