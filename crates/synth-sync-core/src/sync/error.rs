use thiserror::Error;

use crate::catalog::CatalogEntry;
use crate::device::DeviceError;
use crate::error::BoxError;

/// Failure fetching a beatmap file into the staging directory
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP error {status} downloading {url}")]
    HttpStatus { status: u16, url: String },

    #[error("HTTP error downloading {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("Disk error: {0}")]
    Disk(#[from] std::io::Error),
}

/// Failure syncing one catalog entry.
///
/// These never abort the batch; the executor records them and moves on.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Refusing to sync {name:?}: not a plain file name")]
    InvalidName { name: String },

    #[error("Failed to download {name}: {source}")]
    Download {
        name: String,
        #[source]
        source: DownloadError,
    },

    #[error("Failed to push {name} to device: {source}")]
    Transfer {
        name: String,
        #[source]
        source: DeviceError,
    },
}

impl SyncError {
    pub fn download(entry: &CatalogEntry, source: DownloadError) -> Self {
        Self::Download {
            name: entry.name.clone(),
            source,
        }
    }

    pub fn transfer(entry: &CatalogEntry, source: DeviceError) -> Self {
        Self::Transfer {
            name: entry.name.clone(),
            source,
        }
    }

    /// Name of the entry that failed
    pub fn name(&self) -> &str {
        match self {
            Self::InvalidName { name }
            | Self::Download { name, .. }
            | Self::Transfer { name, .. } => name,
        }
    }
}
