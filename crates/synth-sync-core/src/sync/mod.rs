//! Download-and-push of missing beatmaps, and the pipeline that drives it

mod download;
mod engine;
mod error;
mod executor;

pub use download::{BeatmapFetcher, HttpBeatmapFetcher};
pub use engine::{SyncEngine, SyncOptions, SyncPlan};
pub use error::{DownloadError, SyncError};
pub use executor::{
    FailedEntry, ProgressCallback, SyncExecutor, SyncPhase, SyncProgress, SyncReport,
};
