//! End-to-end sync pipeline

use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::download::BeatmapFetcher;
use super::executor::{ProgressCallback, SyncExecutor, SyncReport};
use crate::catalog::{fetch_catalog, CatalogPage, CatalogSource};
use crate::config::Config;
use crate::device::{DeviceBridge, DeviceSession};
use crate::error::Result;
use crate::reconcile::{reconcile, DeviceFileSet, DuplicatePolicy, MissingSet};

/// Knobs for a single pipeline run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub device_folder: String,
    pub staging_dir: PathBuf,
    pub max_concurrent_requests: usize,
    pub duplicate_policy: DuplicatePolicy,
    /// Plan only; callers skip [`SyncEngine::execute`]
    pub dry_run: bool,
}

impl SyncOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            device_folder: config.device_folder.clone(),
            staging_dir: config.staging_dir(),
            max_concurrent_requests: config.max_concurrent_requests,
            duplicate_policy: config.duplicate_policy,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// What a sync pass would do
#[derive(Debug, Clone)]
pub struct SyncPlan {
    /// Files found in the device folder
    pub device_file_count: usize,
    /// Every catalog page, in arrival order
    pub pages: Vec<CatalogPage>,
    pub missing: MissingSet,
    /// Time spent fetching the catalog
    pub fetch_elapsed: Duration,
}

impl SyncPlan {
    /// Number of entries across all pages, duplicates included
    pub fn catalog_entry_count(&self) -> usize {
        self.pages.iter().map(|p| p.entries.len()).sum()
    }
}

/// Main synchronization engine
pub struct SyncEngine<C: CatalogSource, F: BeatmapFetcher> {
    catalog: C,
    fetcher: F,
    options: SyncOptions,
    progress_callback: Option<ProgressCallback>,
}

impl<C: CatalogSource, F: BeatmapFetcher> SyncEngine<C, F> {
    pub fn new(catalog: C, fetcher: F, options: SyncOptions) -> Self {
        Self {
            catalog,
            fetcher,
            options,
            progress_callback: None,
        }
    }

    /// Set the progress callback
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// List the device, fetch the whole catalog and compute what is missing.
    ///
    /// A device listing or catalog failure aborts before anything is
    /// reconciled.
    pub async fn plan<B: DeviceBridge>(&self, session: &DeviceSession<B>) -> Result<SyncPlan> {
        let files = session.list_folder(&self.options.device_folder).await?;
        let device_files: DeviceFileSet = files.into_iter().collect();
        tracing::info!(
            "{} files in {} on {}",
            device_files.len(),
            self.options.device_folder,
            session.device().serial
        );

        let start = Instant::now();
        let pages = fetch_catalog(&self.catalog, self.options.max_concurrent_requests).await?;
        let fetch_elapsed = start.elapsed();

        let missing = reconcile(&pages, &device_files, self.options.duplicate_policy);

        Ok(SyncPlan {
            device_file_count: device_files.len(),
            pages,
            missing,
            fetch_elapsed,
        })
    }

    /// Download and push every missing entry, one at a time.
    pub async fn execute<B: DeviceBridge>(
        &self,
        missing: &MissingSet,
        session: &mut DeviceSession<B>,
    ) -> SyncReport {
        SyncExecutor::new(
            &self.fetcher,
            self.options.staging_dir.clone(),
            self.options.device_folder.clone(),
        )
        .with_progress_callback(self.progress_callback.as_ref())
        .sync_all(missing, session)
        .await
    }
}
