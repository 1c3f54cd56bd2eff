//! End-of-run inventory and summary.

use std::fmt;

use serde::Serialize;
use showcase_artifact::Store;

use crate::outcome::{AssetOutcome, AssetState};

/// One file found in the output location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryEntry {
  pub name: String,
  pub size: u64,
}

/// Listing of everything in the output location, sorted by name.
///
/// Includes files that no declared asset accounts for, such as leftovers from
/// earlier runs with a different table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
  pub entries: Vec<InventoryEntry>,
}

impl InventoryReport {
  pub async fn collect<S: Store + ?Sized>(store: &S) -> Result<Self, showcase_artifact::Error> {
    let entries = store
      .list()
      .await?
      .into_iter()
      .map(|e| InventoryEntry {
        name: e.key,
        size: e.size,
      })
      .collect();
    Ok(Self { entries })
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.entries.iter().any(|e| e.name == name)
  }

  pub fn size_of(&self, name: &str) -> Option<u64> {
    self.entries.iter().find(|e| e.name == name).map(|e| e.size)
  }

  pub fn total_bytes(&self) -> u64 {
    self.entries.iter().map(|e| e.size).sum()
  }
}

impl fmt::Display for InventoryReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for entry in &self.entries {
      writeln!(f, "  - {} ({} bytes)", entry.name, group_thousands(entry.size))?;
    }
    Ok(())
  }
}

/// Result of a full pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
  /// One outcome per declared asset, in table order.
  pub outcomes: Vec<AssetOutcome>,
  pub inventory: InventoryReport,
  pub succeeded: usize,
  pub declared: usize,
}

impl RunReport {
  pub(crate) fn new(outcomes: Vec<AssetOutcome>, inventory: InventoryReport) -> Self {
    let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
    let declared = outcomes.len();
    Self {
      outcomes,
      inventory,
      succeeded,
      declared,
    }
  }

  pub fn outcome(&self, name: &str) -> Option<&AssetOutcome> {
    self.outcomes.iter().find(|o| o.name == name)
  }

  fn names_in(&self, state: AssetState) -> Vec<&str> {
    self
      .outcomes
      .iter()
      .filter(|o| o.state == state)
      .map(|o| o.name.as_str())
      .collect()
  }

  pub fn placeholders(&self) -> Vec<&str> {
    self.names_in(AssetState::PlaceholderWritten)
  }

  pub fn missing(&self) -> Vec<&str> {
    self.names_in(AssetState::Missing)
  }

  /// Every declared name has a file in the output location.
  pub fn is_complete(&self) -> bool {
    self.outcomes.iter().all(|o| self.inventory.contains(&o.name))
  }
}

impl fmt::Display for RunReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Download summary:")?;
    writeln!(
      f,
      "  succeeded: {}/{} images",
      self.succeeded, self.declared
    )?;

    let placeholders = self.placeholders();
    if !placeholders.is_empty() {
      writeln!(
        f,
        "  placeholders: {} ({})",
        placeholders.len(),
        placeholders.join(", ")
      )?;
    }

    let missing = self.missing();
    if !missing.is_empty() {
      writeln!(f, "  missing: {} ({})", missing.len(), missing.join(", "))?;
    }

    writeln!(f)?;
    writeln!(f, "Files in output directory ({}):", self.inventory.len())?;
    write!(f, "{}", self.inventory)
  }
}

/// Format with comma thousands separators: 1234567 -> "1,234,567".
fn group_thousands(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_group_thousands() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1000), "1,000");
    assert_eq!(group_thousands(45_210), "45,210");
    assert_eq!(group_thousands(1_234_567), "1,234,567");
  }

  #[test]
  fn test_inventory_display() {
    let inventory = InventoryReport {
      entries: vec![
        InventoryEntry {
          name: "a.jpg".to_string(),
          size: 12_345,
        },
        InventoryEntry {
          name: "b.png".to_string(),
          size: 87,
        },
      ],
    };

    assert_eq!(
      inventory.to_string(),
      "  - a.jpg (12,345 bytes)\n  - b.png (87 bytes)\n"
    );
    assert_eq!(inventory.total_bytes(), 12_432);
    assert_eq!(inventory.size_of("b.png"), Some(87));
    assert!(!inventory.contains("c.jpg"));
  }

  #[test]
  fn test_run_report_summary() {
    let mut ok = AssetOutcome::pending("a.jpg", "https://example.com/a.jpg");
    ok.wrote(AssetState::Written, (800, 600), 100);
    let mut fallback = AssetOutcome::pending("b.jpg", "https://example.com/b.jpg");
    fallback.wrote(AssetState::PlaceholderWritten, (400, 300), 50);
    let mut gone = AssetOutcome::pending("c.jpg", "https://example.com/c.jpg");
    gone.state = AssetState::Missing;

    let inventory = InventoryReport {
      entries: vec![
        InventoryEntry {
          name: "a.jpg".to_string(),
          size: 100,
        },
        InventoryEntry {
          name: "b.jpg".to_string(),
          size: 50,
        },
      ],
    };
    let report = RunReport::new(vec![ok, fallback, gone], inventory);

    assert_eq!(report.succeeded, 1);
    assert_eq!(report.declared, 3);
    assert_eq!(report.placeholders(), vec!["b.jpg"]);
    assert_eq!(report.missing(), vec!["c.jpg"]);
    assert!(!report.is_complete());

    let text = report.to_string();
    assert!(text.contains("succeeded: 1/3 images"));
    assert!(text.contains("placeholders: 1 (b.jpg)"));
    assert!(text.contains("missing: 1 (c.jpg)"));
    assert!(text.contains("  - b.jpg (50 bytes)"));
  }
}
