mod console;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use showcase_artifact::FsStore;
use showcase_config::Manifest;
use showcase_engine::{Availability, InventoryReport, MIN_RENDERABLE_BYTES, Pipeline, check_assets};
use showcase_fetch::HttpFetcher;
use showcase_image::{Normalizer, PlaceholderGenerator};

use crate::console::ConsoleNotifier;

/// Showcase - fetch and normalize the images behind the content viewer
#[derive(Parser)]
#[command(name = "showcase")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log verbosity, repeat for more (-v, -vv, -vvv). RUST_LOG takes precedence.
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  /// JSON manifest with the asset table and settings (default: built-in table)
  #[arg(long, global = true)]
  manifest: Option<PathBuf>,

  /// Output directory (default: static/images)
  #[arg(long, global = true)]
  out_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Download every declared image and fill gaps with placeholders (default)
  Fetch {
    /// Per-request timeout in seconds (default: 30)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
  },

  /// List the files in the output directory
  Inventory {
    #[arg(long)]
    json: bool,
  },

  /// Report which declared images the viewer would render
  Check {
    /// Files at or below this size are treated as empty
    #[arg(long, default_value_t = MIN_RENDERABLE_BYTES)]
    min_bytes: u64,

    #[arg(long)]
    json: bool,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let rt = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
  rt.block_on(async {
    let mut manifest = load_manifest(cli.manifest.as_deref()).await?;
    if let Some(out_dir) = cli.out_dir {
      manifest.output_dir = out_dir;
    }
    tracing::debug!(
      assets = manifest.assets.len(),
      output_dir = %manifest.output_dir.display(),
      "manifest loaded"
    );

    match cli.command {
      Some(Commands::Fetch { timeout_secs, json }) => run_fetch(manifest, timeout_secs, json).await,
      Some(Commands::Inventory { json }) => run_inventory(&manifest, json).await,
      Some(Commands::Check { min_bytes, json }) => run_check(&manifest, min_bytes, json).await,
      None => run_fetch(manifest, None, false).await,
    }
  })
}

fn init_tracing(verbose: u8) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
    0 => EnvFilter::new("warn"),
    1 => EnvFilter::new("info"),
    2 => EnvFilter::new("debug"),
    _ => EnvFilter::new("trace"),
  });

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

async fn load_manifest(path: Option<&Path>) -> Result<Manifest> {
  let Some(path) = path else {
    return Ok(Manifest::reference());
  };

  let content = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read manifest: {}", path.display()))?;

  Manifest::from_json(&content)
    .with_context(|| format!("failed to parse manifest: {}", path.display()))
}

async fn run_fetch(mut manifest: Manifest, timeout_secs: Option<u64>, json: bool) -> Result<()> {
  if let Some(timeout_secs) = timeout_secs {
    manifest.timeout_secs = timeout_secs;
  }
  manifest.validate().context("invalid settings")?;

  let fetcher = HttpFetcher::new(Duration::from_secs(manifest.timeout_secs))
    .context("failed to create HTTP client")?;

  let pipeline = Pipeline::new(fetcher, FsStore::new(&manifest.output_dir))
    .with_normalizer(Normalizer::new(manifest.normalize))
    .with_placeholders(PlaceholderGenerator::new(manifest.placeholder))
    .with_notifier(Arc::new(ConsoleNotifier));

  let report = pipeline.run(&manifest.assets).await.with_context(|| {
    format!(
      "failed to create output directory: {}",
      manifest.output_dir.display()
    )
  })?;

  // Per-asset failures are in the report; they do not change the exit status.
  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    eprintln!();
    print!("{report}");
  }

  Ok(())
}

async fn run_inventory(manifest: &Manifest, json: bool) -> Result<()> {
  let store = FsStore::new(&manifest.output_dir);
  let inventory = InventoryReport::collect(&store).await.with_context(|| {
    format!(
      "failed to list output directory: {}",
      manifest.output_dir.display()
    )
  })?;

  if json {
    println!("{}", serde_json::to_string_pretty(&inventory)?);
  } else {
    println!(
      "Files in {} ({}):",
      manifest.output_dir.display(),
      inventory.len()
    );
    print!("{inventory}");
  }

  Ok(())
}

async fn run_check(manifest: &Manifest, min_bytes: u64, json: bool) -> Result<()> {
  let store = FsStore::new(&manifest.output_dir);
  let entries = check_assets(&store, &manifest.assets, min_bytes)
    .await
    .context("failed to inspect output directory")?;

  if json {
    println!("{}", serde_json::to_string_pretty(&entries)?);
    return Ok(());
  }

  let renderable = entries
    .iter()
    .filter(|e| e.availability.is_renderable())
    .count();
  for entry in &entries {
    println!("  {}: {}", entry.name, describe(entry.availability));
  }
  println!(
    "{renderable}/{} images renderable (threshold {min_bytes} bytes)",
    entries.len()
  );

  Ok(())
}

fn describe(availability: Availability) -> String {
  match availability {
    Availability::Renderable { size } => format!("ok ({size} bytes)"),
    Availability::TooSmall { size } => format!("too small ({size} bytes)"),
    Availability::Absent => "absent".to_string(),
  }
}
