//! Showcase Engine
//!
//! This crate drives the acquisition pipeline. Given an [`AssetTable`], a
//! [`Fetcher`] and a [`Store`], [`Pipeline::run`] makes two passes:
//!
//! 1. For each asset, in table order: fetch once, normalize, write.
//! 2. For every asset that did not end up written, write a placeholder.
//!
//! It then lists the store into an [`InventoryReport`]. Per-asset failures
//! never abort the run; they are recorded in each [`AssetOutcome`]. The only
//! fatal error is failing to prepare the output location, which happens
//! before any network activity.
//!
//! [`AssetTable`]: showcase_config::AssetTable
//! [`Fetcher`]: showcase_fetch::Fetcher
//! [`Store`]: showcase_artifact::Store

mod check;
mod error;
mod events;
mod outcome;
mod pipeline;
mod report;

pub use check::{Availability, AvailabilityEntry, MIN_RENDERABLE_BYTES, check_assets};
pub use error::{AssetFailure, PipelineError};
pub use events::{ChannelNotifier, NoopNotifier, PipelineEvent, PipelineNotifier};
pub use outcome::{AssetOutcome, AssetState};
pub use pipeline::Pipeline;
pub use report::{InventoryEntry, InventoryReport, RunReport};
