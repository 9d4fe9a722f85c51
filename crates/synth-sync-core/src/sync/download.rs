//! Beatmap download into the staging directory

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::error::DownloadError;
use crate::catalog::CatalogEntry;
use crate::config::Config;
use crate::error::{Error, Result};

/// Connect timeout for beatmap downloads; the body itself is unbounded
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of beatmap file contents.
#[async_trait]
pub trait BeatmapFetcher: Send + Sync {
    /// Write the entry's file to `dest`, returning the bytes written
    async fn download(
        &self,
        entry: &CatalogEntry,
        dest: &Path,
    ) -> std::result::Result<u64, DownloadError>;
}

#[async_trait]
impl<T: BeatmapFetcher + ?Sized> BeatmapFetcher for &T {
    async fn download(
        &self,
        entry: &CatalogEntry,
        dest: &Path,
    ) -> std::result::Result<u64, DownloadError> {
        (**self).download(entry, dest).await
    }
}

/// Streams beatmaps from `<host><download_url>` to disk.
#[derive(Debug, Clone)]
pub struct HttpBeatmapFetcher {
    client: Client,
    host: String,
}

impl HttpBeatmapFetcher {
    pub fn new(host: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("synth-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::HttpClient)?;
        Ok(Self::with_client(client, host))
    }

    pub fn with_client(client: Client, host: impl Into<String>) -> Self {
        Self {
            client,
            host: host.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.download_host.clone())
    }

    /// Absolute URL for an entry
    pub fn url_for(&self, entry: &CatalogEntry) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), entry.download_locator)
    }
}

#[async_trait]
impl BeatmapFetcher for HttpBeatmapFetcher {
    async fn download(
        &self,
        entry: &CatalogEntry,
        dest: &Path,
    ) -> std::result::Result<u64, DownloadError> {
        let url = self.url_for(entry);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DownloadError::Http {
                url: url.clone(),
                source: e.into(),
            })?;

        if !response.status().is_success() {
            return Err(DownloadError::HttpStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(dest)
            .await?;

        let mut bytes_written: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    drop(file);
                    let _ = fs::remove_file(dest).await;
                    return Err(DownloadError::Http {
                        url,
                        source: e.into(),
                    });
                }
            };
            file.write_all(&chunk).await?;
            bytes_written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!("Downloaded {} ({} bytes)", entry.name, bytes_written);
        Ok(bytes_written)
    }
}
