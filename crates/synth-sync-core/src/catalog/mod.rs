//! Remote beatmap catalog: page model, HTTP client and concurrent fetcher

mod client;
mod error;
mod fetch;
mod model;

pub use client::{CatalogSource, HttpCatalogClient};
pub use error::CatalogError;
pub use fetch::{fetch_all, fetch_catalog};
pub use model::{CatalogEntry, CatalogPage};
