//! Catalog page wire model

use serde::{Deserialize, Serialize};

/// A single beatmap listed in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// File name the beatmap has on the device; identity for reconciliation
    #[serde(rename = "filename")]
    pub name: String,
    /// Path relative to the download host
    #[serde(rename = "download_url")]
    pub download_locator: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, download_locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            download_locator: download_locator.into(),
        }
    }
}

/// One decoded page of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(rename = "data")]
    pub entries: Vec<CatalogEntry>,
    /// Number of entries on this page as reported by the server
    #[serde(default)]
    pub count: u32,
    /// Total entries across all pages
    #[serde(rename = "total")]
    pub total_count: u32,
    /// 1-based page index
    #[serde(rename = "page")]
    pub page_index: u32,
    #[serde(rename = "pageCount")]
    pub page_count: u32,
}

impl CatalogPage {
    /// Decode a page response body
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }
}
