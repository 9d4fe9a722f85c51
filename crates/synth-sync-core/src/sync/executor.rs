//! Sequential download, push and cleanup of missing beatmaps

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::download::BeatmapFetcher;
use super::error::SyncError;
use crate::catalog::CatalogEntry;
use crate::device::{remote_path, DeviceBridge, DeviceSession};
use crate::reconcile::MissingSet;
use crate::utils::{is_bare_file_name, sanitize_filename};

/// An entry that could not be synced
#[derive(Debug)]
pub struct FailedEntry {
    pub entry: CatalogEntry,
    pub error: SyncError,
}

/// Result of a sync pass
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Number of beatmaps pushed to the device
    pub pushed: usize,
    /// Number of beatmaps that failed to download or push
    pub failed: usize,
    /// Per-entry failures, in processing order
    pub failures: Vec<FailedEntry>,
    /// Staging files that could not be removed after a successful push
    pub cleanup_warnings: usize,
    /// Wall time of the pass
    pub elapsed: Duration,
}

impl SyncReport {
    /// Total number of entries processed
    pub fn total(&self) -> usize {
        self.pushed + self.failed
    }

    /// Check if every entry synced
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Progress information for sync callbacks
#[derive(Debug, Clone, Default)]
pub struct SyncProgress {
    /// 1-based position of the current entry
    pub current: usize,
    /// Total entries in this pass
    pub total: usize,
    /// Name of the current entry
    pub current_name: String,
    pub phase: SyncPhase,
}

/// Phase of the sync operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Downloading,
    Transferring,
    Complete,
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Downloading => write!(f, "Downloading"),
            Self::Transferring => write!(f, "Pushing to device"),
            Self::Complete => write!(f, "Complete"),
        }
    }
}

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(SyncProgress) + Send + Sync>;

/// Downloads each entry to a staging file, pushes it, then removes the file.
///
/// Entries are processed one at a time in the given order; the device
/// session is borrowed mutably for the whole pass.
pub struct SyncExecutor<'a, F: BeatmapFetcher> {
    fetcher: &'a F,
    staging_dir: PathBuf,
    device_folder: String,
    progress_callback: Option<&'a ProgressCallback>,
}

impl<'a, F: BeatmapFetcher> SyncExecutor<'a, F> {
    pub fn new(fetcher: &'a F, staging_dir: impl Into<PathBuf>, device_folder: impl Into<String>) -> Self {
        Self {
            fetcher,
            staging_dir: staging_dir.into(),
            device_folder: device_folder.into(),
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: Option<&'a ProgressCallback>) -> Self {
        self.progress_callback = callback;
        self
    }

    /// Local staging path for an entry
    pub fn staging_path(&self, entry: &CatalogEntry) -> PathBuf {
        self.staging_dir.join(sanitize_filename(&entry.name))
    }

    fn report_progress(&self, current: usize, total: usize, name: &str, phase: SyncPhase) {
        if let Some(callback) = self.progress_callback {
            callback(SyncProgress {
                current,
                total,
                current_name: name.to_string(),
                phase,
            });
        }
    }

    /// Sync a single entry.
    ///
    /// Returns `Ok(true)` when the staging file was removed afterwards and
    /// `Ok(false)` when the push succeeded but cleanup did not.
    pub async fn sync_one<B: DeviceBridge>(
        &self,
        entry: &CatalogEntry,
        session: &mut DeviceSession<B>,
    ) -> Result<bool, SyncError> {
        self.sync_one_at(entry, session, 1, 1).await
    }

    async fn sync_one_at<B: DeviceBridge>(
        &self,
        entry: &CatalogEntry,
        session: &mut DeviceSession<B>,
        current: usize,
        total: usize,
    ) -> Result<bool, SyncError> {
        // The remote path keeps the catalog name verbatim
        if !is_bare_file_name(&entry.name) {
            return Err(SyncError::InvalidName {
                name: entry.name.clone(),
            });
        }
        let local = self.staging_path(entry);

        self.report_progress(current, total, &entry.name, SyncPhase::Downloading);
        self.fetcher
            .download(entry, &local)
            .await
            .map_err(|e| SyncError::download(entry, e))?;

        self.report_progress(current, total, &entry.name, SyncPhase::Transferring);
        let remote = remote_path(&self.device_folder, &entry.name);
        session
            .push(&local, &remote)
            .await
            .map_err(|e| SyncError::transfer(entry, e))?;

        tracing::info!("Pushed {} to device at {}", entry.name, remote);

        Ok(remove_staging_file(&local).await)
    }

    /// Sync every missing entry, continuing past per-entry failures.
    pub async fn sync_all<B: DeviceBridge>(
        &self,
        missing: &MissingSet,
        session: &mut DeviceSession<B>,
    ) -> SyncReport {
        let start = Instant::now();
        let total = missing.len();
        let mut report = SyncReport::default();

        for (index, entry) in missing.iter().enumerate() {
            match self.sync_one_at(entry, session, index + 1, total).await {
                Ok(cleaned) => {
                    report.pushed += 1;
                    if !cleaned {
                        report.cleanup_warnings += 1;
                    }
                }
                Err(error) => {
                    tracing::error!("Error processing {}: {}", entry.name, error);
                    report.failed += 1;
                    report.failures.push(FailedEntry {
                        entry: entry.clone(),
                        error,
                    });
                }
            }
        }

        report.elapsed = start.elapsed();
        self.report_progress(total, total, "", SyncPhase::Complete);
        report
    }
}

/// Remove a staging file; failure is only a warning since the push already happened
async fn remove_staging_file(path: &Path) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Failed to delete temp file {}: {}", path.display(), e);
            false
        }
    }
}
