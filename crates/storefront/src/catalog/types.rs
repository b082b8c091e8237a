//! Product catalog types.
//!
//! Records returned by the external catalog API. They are read-only on our
//! side - the catalog is the source of truth and nothing here is ever
//! mutated locally.

use serde::{Deserialize, Serialize};

use shophub_core::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Product image URL.
    pub image: String,
    /// Category name.
    pub category: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Aggregate customer rating, when the catalog provides one.
    #[serde(default)]
    pub rating: Option<Rating>,
}

impl Product {
    /// Case-insensitive substring match of `query` against the title.
    ///
    /// An empty query matches everything, so an unset search filter shows
    /// the full listing.
    #[must_use]
    pub fn title_matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Aggregate customer rating for a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating out of 5.
    pub rate: f64,
    /// Number of ratings.
    pub count: u64,
}
