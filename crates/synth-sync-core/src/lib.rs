//! # synth-sync-core
//!
//! Core library for syncing Synth Riders custom songs from the public
//! beatmap catalog onto an Android headset over `adb`.
//!
//! This crate provides the foundational functionality for:
//! - Fetching the paginated beatmap catalog with bounded concurrency
//! - Listing and pushing files through a device bridge (`adb`)
//! - Reconciling the catalog against a device folder listing
//! - Downloading and transferring missing beatmaps one at a time
//!
//! ## Modules
//!
//! - [`catalog`] - Catalog page model, HTTP client and concurrent fetcher
//! - [`config`] - Configuration defaults and persistence
//! - [`device`] - Device bridge trait, `adb` implementation and output parsing
//! - [`error`] - Error types and Result alias
//! - [`reconcile`] - Catalog vs. device set difference
//! - [`sync`] - Sync executor and pipeline engine
//!
//! ## Example
//!
//! ```no_run
//! use synth_sync_core::{
//!     AdbBridge, Config, DeviceBridge, DeviceSession, HttpBeatmapFetcher, HttpCatalogClient,
//!     SyncEngine, SyncOptions,
//! };
//!
//! # async fn run() -> synth_sync_core::Result<()> {
//! let config = Config::load();
//! let bridge = AdbBridge::new(&config.adb_path);
//! let device = bridge.list_devices().await?.remove(0);
//! let mut session = DeviceSession::new(bridge, device);
//!
//! let engine = SyncEngine::new(
//!     HttpCatalogClient::from_config(&config)?,
//!     HttpBeatmapFetcher::from_config(&config)?,
//!     SyncOptions::from_config(&config),
//! );
//! let plan = engine.plan(&session).await?;
//! let report = engine.execute(&plan.missing, &mut session).await;
//! println!("Pushed {} beatmaps", report.pushed);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod device;
pub mod error;
pub mod reconcile;
pub mod sync;
pub mod utils;

#[cfg(test)]
mod test_support;

// Error types
pub use error::{Error, Result};

// Configuration
pub use config::Config;

// Catalog
pub use catalog::{
    fetch_all, fetch_catalog, CatalogEntry, CatalogError, CatalogPage, CatalogSource,
    HttpCatalogClient,
};

// Devices
pub use device::{AdbBridge, Device, DeviceBridge, DeviceError, DeviceSession};

// Reconciliation
pub use reconcile::{reconcile, DeviceFileSet, DuplicatePolicy, MissingSet};

// Sync
pub use sync::{
    BeatmapFetcher, DownloadError, FailedEntry, HttpBeatmapFetcher, ProgressCallback, SyncEngine,
    SyncError, SyncOptions, SyncPhase, SyncPlan, SyncProgress, SyncReport,
};
