//! Product catalog API client.
//!
//! A thin wrapper over the external catalog's REST endpoints:
//!
//! - `GET /products` - full product listing
//! - `GET /products/{id}` - one product, 404 when unknown
//!
//! One request per call: no retry, no caching, no de-duplication. The UI
//! owns the retry affordance by invoking the fetch again.

mod fetch;
mod types;

pub use fetch::FetchState;
pub use types::{Product, Rating};

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use shophub_core::ProductId;

use crate::config::StorefrontConfig;

/// Errors that can occur when fetching from the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not a parseable catalog record.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Product does not exist.
    #[error("Not found: product {0}")]
    NotFound(ProductId),

    /// Catalog returned a non-success status.
    #[error("Catalog returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// Catalog base URL rejected a path segment.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Client for the product catalog API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.catalog_url.clone(),
            }),
        })
    }

    /// Fetch the full product listing.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the request fails, the catalog responds
    /// with a non-success status, or the body is unparseable.
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint(&["products"])?;
        self.get_json(url).await
    }

    /// Fetch a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for an unknown ID, otherwise as
    /// [`Self::list_products`].
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = self.endpoint(&["products", &id.to_string()])?;
        match self.get_json(url).await {
            Err(CatalogError::Status(status)) if status == reqwest::StatusCode::NOT_FOUND => {
                Err(CatalogError::NotFound(id))
            }
            other => other,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue one GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        debug!(%url, "catalog fetch");

        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(%url, %status, "catalog returned non-success status");
            return Err(CatalogError::Status(status));
        }

        // Read the body as text first for better parse-error diagnostics.
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                %url,
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}
