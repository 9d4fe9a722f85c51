//! HTTP access to the paginated catalog

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::CatalogError;
use super::model::CatalogPage;
use crate::config::Config;
use crate::error::{Error, Result};

/// Anything that can produce catalog pages by 1-based index.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> std::result::Result<CatalogPage, CatalogError>;
}

#[async_trait]
impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    async fn fetch_page(&self, page: u32) -> std::result::Result<CatalogPage, CatalogError> {
        (**self).fetch_page(page).await
    }
}

/// Catalog client backed by a shared `reqwest::Client`.
///
/// Requests carry a fixed timeout; an expired timeout surfaces as
/// [`CatalogError::Network`], same as a refused connection.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    endpoint: String,
}

impl HttpCatalogClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("synth-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::HttpClient)?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_endpoint.clone(), config.request_timeout())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch_page(&self, page: u32) -> std::result::Result<CatalogPage, CatalogError> {
        tracing::debug!("Fetching catalog page {}", page);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("page", page)])
            .send()
            .await
            .map_err(|e| CatalogError::network(page, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                page,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::network(page, e))?;

        CatalogPage::from_slice(&body).map_err(|source| CatalogError::Decode { page, source })
    }
}
