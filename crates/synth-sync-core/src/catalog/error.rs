use thiserror::Error;

use crate::error::BoxError;

/// Failure fetching or decoding a single catalog page.
///
/// Every variant is fatal for a run: an incomplete catalog would make each
/// later "missing" decision wrong.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Connection failure or request timeout
    #[error("Request failed for page {page}: {source}")]
    Network {
        page: u32,
        #[source]
        source: BoxError,
    },

    #[error("Catalog returned HTTP {status} for page {page}")]
    Status { page: u32, status: u16 },

    /// Body was not the expected page schema
    #[error("JSON decode failed for page {page}: {source}")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// Page the failure belongs to
    pub fn page(&self) -> u32 {
        match self {
            Self::Network { page, .. } | Self::Status { page, .. } | Self::Decode { page, .. } => {
                *page
            }
        }
    }

    pub fn network(page: u32, source: impl Into<BoxError>) -> Self {
        Self::Network {
            page,
            source: source.into(),
        }
    }
}
