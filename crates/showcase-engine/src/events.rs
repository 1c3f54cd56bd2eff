//! Pipeline events and notifiers for progress reporting.
//!
//! Events are emitted as each asset moves through the pipeline so consumers
//! can print progress lines, collect them in tests, etc.

use serde::Serialize;
use tokio::sync::mpsc;

use crate::error::AssetFailure;

/// Events emitted during a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
  /// The output location is ready and the first pass is starting.
  RunStarted { declared: usize },

  /// The asset's bytes were downloaded.
  AssetFetched { name: String, bytes: usize },

  /// The normalized image was written.
  AssetWritten {
    name: String,
    width: u32,
    height: u32,
    bytes: u64,
  },

  /// Real acquisition failed; the asset goes to the placeholder pass.
  AssetFailed { name: String, failure: AssetFailure },

  /// The placeholder pass is starting for `pending` names.
  PlaceholderPassStarted { pending: usize },

  /// A placeholder was written.
  PlaceholderWritten { name: String, format: String },

  /// The placeholder could not be written; the asset is missing.
  PlaceholderFailed { name: String, failure: AssetFailure },

  /// Both passes are done.
  RunCompleted { succeeded: usize, declared: usize },
}

/// Trait for receiving pipeline events.
///
/// The pipeline calls `notify` for each event; implementations decide what to
/// do with them (print, collect, ignore).
pub trait PipelineNotifier: Send + Sync {
  fn notify(&self, event: PipelineEvent);
}

/// A no-op notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl PipelineNotifier for NoopNotifier {
  fn notify(&self, _event: PipelineEvent) {}
}

/// A notifier that sends events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<PipelineEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<PipelineEvent>) -> Self {
    Self { sender }
  }
}

impl PipelineNotifier for ChannelNotifier {
  fn notify(&self, event: PipelineEvent) {
    // Receiver may have been dropped.
    let _ = self.sender.send(event);
  }
}
