//! Error types for synth-sync-core

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::device::DeviceError;

/// Main error type for synth-sync operations
///
/// Only the fatal failures end up here. Per-beatmap failures during the
/// sync pass are [`crate::sync::SyncError`] values collected into the
/// report instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Boxed transport error so fakes can report failures without a live socket
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for synth-sync operations
pub type Result<T> = std::result::Result<T, Error>;
