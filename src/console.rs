use showcase_engine::{PipelineEvent, PipelineNotifier};

/// Prints one progress line per pipeline event to stderr.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl PipelineNotifier for ConsoleNotifier {
  fn notify(&self, event: PipelineEvent) {
    if let Some(line) = progress_line(&event) {
      eprintln!("{line}");
    }
  }
}

fn progress_line(event: &PipelineEvent) -> Option<String> {
  let line = match event {
    PipelineEvent::RunStarted { declared } => format!("Fetching {declared} images"),
    PipelineEvent::AssetFetched { name, bytes } => format!("  {name}: downloaded {bytes} bytes"),
    PipelineEvent::AssetWritten {
      name,
      width,
      height,
      ..
    } => format!("  {name}: saved ({width}x{height})"),
    PipelineEvent::AssetFailed { name, failure } => format!("  {name}: {failure}"),
    PipelineEvent::PlaceholderPassStarted { pending } => {
      format!("Creating {pending} placeholder images")
    }
    PipelineEvent::PlaceholderWritten { name, format } => {
      format!("  {name}: placeholder written ({format})")
    }
    PipelineEvent::PlaceholderFailed { name, failure } => {
      format!("  {name}: placeholder failed, {failure}")
    }
    PipelineEvent::RunCompleted { .. } => return None,
  };
  Some(line)
}

#[cfg(test)]
mod tests {
  use super::*;
  use showcase_engine::AssetFailure;

  #[test]
  fn test_progress_lines() {
    assert_eq!(
      progress_line(&PipelineEvent::AssetWritten {
        name: "hero_bg.jpg".to_string(),
        width: 800,
        height: 533,
        bytes: 41_000,
      })
      .as_deref(),
      Some("  hero_bg.jpg: saved (800x533)")
    );
    assert_eq!(
      progress_line(&PipelineEvent::AssetFailed {
        name: "logo.png".to_string(),
        failure: AssetFailure::Network {
          reason: "timed out".to_string(),
        },
      })
      .as_deref(),
      Some("  logo.png: network failure: timed out")
    );
    assert!(
      progress_line(&PipelineEvent::RunCompleted {
        succeeded: 1,
        declared: 1
      })
      .is_none()
    );
  }
}
