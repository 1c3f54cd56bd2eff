//! Two-pass acquisition pipeline.

use std::sync::Arc;

use bytes::Bytes;
use showcase_artifact::Store;
use showcase_config::{AssetSpec, AssetTable};
use showcase_fetch::Fetcher;
use showcase_image::{Normalizer, PlaceholderGenerator};
use tracing::{error, info, instrument, warn};

use crate::error::{AssetFailure, PipelineError};
use crate::events::{NoopNotifier, PipelineEvent, PipelineNotifier};
use crate::outcome::{AssetOutcome, AssetState};
use crate::report::{InventoryReport, RunReport};

/// Fetches, normalizes and stores every declared asset, then fills gaps with
/// placeholders.
///
/// Assets are processed one at a time in table order. A run owns no state
/// beyond the output location, so running twice reprocesses everything.
///
/// # Usage
///
/// ```ignore
/// let fetcher = HttpFetcher::new(Duration::from_secs(30))?;
/// let pipeline = Pipeline::new(fetcher, FsStore::new("static/images"));
/// let report = pipeline.run(&AssetTable::reference()).await?;
/// println!("{report}");
/// ```
pub struct Pipeline<F, S> {
  fetcher: F,
  store: S,
  normalizer: Normalizer,
  placeholders: PlaceholderGenerator,
  notifier: Arc<dyn PipelineNotifier>,
}

impl<F: Fetcher, S: Store> Pipeline<F, S> {
  /// Create a pipeline with default normalizer and placeholder settings.
  pub fn new(fetcher: F, store: S) -> Self {
    Self {
      fetcher,
      store,
      normalizer: Normalizer::default(),
      placeholders: PlaceholderGenerator::default(),
      notifier: Arc::new(NoopNotifier),
    }
  }

  pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
    self.normalizer = normalizer;
    self
  }

  pub fn with_placeholders(mut self, placeholders: PlaceholderGenerator) -> Self {
    self.placeholders = placeholders;
    self
  }

  pub fn with_notifier(mut self, notifier: Arc<dyn PipelineNotifier>) -> Self {
    self.notifier = notifier;
    self
  }

  pub fn fetcher(&self) -> &F {
    &self.fetcher
  }

  /// Run both passes over `table` and report on the result.
  ///
  /// Fails only if the output location cannot be prepared, in which case no
  /// request has been sent.
  #[instrument(name = "pipeline_run", skip(self, table), fields(declared = table.len()))]
  pub async fn run(&self, table: &AssetTable) -> Result<RunReport, PipelineError> {
    self
      .store
      .prepare()
      .await
      .map_err(|source| PipelineError::OutputDir { source })?;

    info!("pipeline started");
    self.notifier.notify(PipelineEvent::RunStarted {
      declared: table.len(),
    });

    let mut outcomes = Vec::with_capacity(table.len());
    for asset in table {
      outcomes.push(self.acquire(asset).await);
    }

    self.fill_placeholders(&mut outcomes).await;

    let inventory = match InventoryReport::collect(&self.store).await {
      Ok(inventory) => inventory,
      Err(e) => {
        warn!(error = %e, "failed to list output directory");
        InventoryReport::default()
      }
    };

    let report = RunReport::new(outcomes, inventory);
    info!(
      succeeded = report.succeeded,
      placeholders = report.placeholders().len(),
      missing = report.missing().len(),
      "pipeline completed"
    );
    self.notifier.notify(PipelineEvent::RunCompleted {
      succeeded: report.succeeded,
      declared: report.declared,
    });

    Ok(report)
  }

  /// First pass for a single asset: fetch, normalize, write.
  #[instrument(name = "acquire", skip(self, asset), fields(asset = %asset.name))]
  async fn acquire(&self, asset: &AssetSpec) -> AssetOutcome {
    let mut outcome = AssetOutcome::pending(&asset.name, &asset.source_url);

    let body = match self.fetcher.fetch(asset).await {
      Ok(body) => body,
      Err(e) => return self.failed(outcome, AssetState::FetchFailed, (&e).into()),
    };
    outcome.state = AssetState::Fetched;
    self.notifier.notify(PipelineEvent::AssetFetched {
      name: asset.name.clone(),
      bytes: body.len(),
    });

    let normalized = match self.normalizer.normalize(&body) {
      Ok(normalized) => normalized,
      Err(e) => return self.failed(outcome, AssetState::NormalizeFailed, (&e).into()),
    };

    let (width, height) = (normalized.width, normalized.height);
    let size = normalized.bytes.len() as u64;
    if let Err(e) = self.store.put(&asset.name, Bytes::from(normalized.bytes)).await {
      return self.failed(outcome, AssetState::WriteFailed, (&e).into());
    }

    info!(width, height, bytes = size, "saved");
    outcome.wrote(AssetState::Written, (width, height), size);
    self.notifier.notify(PipelineEvent::AssetWritten {
      name: asset.name.clone(),
      width,
      height,
      bytes: size,
    });

    outcome
  }

  fn failed(
    &self,
    mut outcome: AssetOutcome,
    state: AssetState,
    failure: AssetFailure,
  ) -> AssetOutcome {
    warn!(state = ?state, error = %failure, "acquisition failed");
    self.notifier.notify(PipelineEvent::AssetFailed {
      name: outcome.name.clone(),
      failure: failure.clone(),
    });
    outcome.fail(state, failure);
    outcome
  }

  /// Second pass: every asset not written this run, or whose file is gone,
  /// gets a placeholder under its declared name.
  async fn fill_placeholders(&self, outcomes: &mut [AssetOutcome]) {
    let mut pending = Vec::new();
    for (index, outcome) in outcomes.iter().enumerate() {
      if outcome.state.needs_placeholder() || !self.is_present(&outcome.name).await {
        pending.push(index);
      }
    }

    if pending.is_empty() {
      return;
    }

    info!(pending = pending.len(), "creating placeholders");
    self.notifier.notify(PipelineEvent::PlaceholderPassStarted {
      pending: pending.len(),
    });

    for index in pending {
      self.write_placeholder(&mut outcomes[index]).await;
    }
  }

  #[instrument(name = "placeholder", skip(self, outcome), fields(asset = %outcome.name))]
  async fn write_placeholder(&self, outcome: &mut AssetOutcome) {
    let result = match self.placeholders.render(&outcome.name) {
      Ok(placeholder) => {
        let size = placeholder.bytes.len() as u64;
        let dimensions = (placeholder.width, placeholder.height);
        let format = placeholder.format;
        self
          .store
          .put(&outcome.name, Bytes::from(placeholder.bytes))
          .await
          .map(|()| (dimensions, size, format))
          .map_err(|e| AssetFailure::from(&e))
      }
      Err(e) => Err(AssetFailure::from(&e)),
    };

    match result {
      Ok((dimensions, size, format)) => {
        info!(%format, bytes = size, "placeholder written");
        outcome.wrote(AssetState::PlaceholderWritten, dimensions, size);
        self.notifier.notify(PipelineEvent::PlaceholderWritten {
          name: outcome.name.clone(),
          format: format.to_string(),
        });
      }
      Err(failure) => {
        error!(error = %failure, "placeholder write failed, asset is missing");
        outcome.state = AssetState::Missing;
        outcome.placeholder_failure = Some(failure.clone());
        self.notifier.notify(PipelineEvent::PlaceholderFailed {
          name: outcome.name.clone(),
          failure,
        });
      }
    }
  }

  async fn is_present(&self, name: &str) -> bool {
    match self.store.exists(name).await {
      Ok(present) => present,
      Err(e) => {
        warn!(asset = %name, error = %e, "could not stat output, treating as absent");
        false
      }
    }
  }
}
