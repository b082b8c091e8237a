//! Integration test support for ShopHub.
//!
//! Provides [`StubCatalog`], an in-process catalog API server speaking the
//! same REST surface as the real catalog (`GET /products`,
//! `GET /products/{id}`), so the storefront's HTTP client can be exercised
//! hermetically. Each stub binds an ephemeral port and lives until the
//! test's runtime shuts down.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use url::Url;

use shophub_storefront::config::StorefrontConfig;

/// An in-process stand-in for the catalog API.
pub struct StubCatalog {
    base_url: Url,
}

impl StubCatalog {
    /// Start a stub serving `products` (JSON records with at least an
    /// `"id"` field).
    ///
    /// # Panics
    ///
    /// Panics if the stub cannot bind a local port; tests cannot proceed
    /// without it.
    pub async fn start(products: Vec<Value>) -> Self {
        let shared = Arc::new(products);
        let router = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}", get(get_product))
            .with_state(shared);
        Self::serve(router).await
    }

    /// Start a stub whose `/products` body is not valid JSON.
    pub async fn malformed() -> Self {
        let router = Router::new().route("/products", get(|| async { "<html>not json</html>" }));
        Self::serve(router).await
    }

    /// Start a stub that answers every request with HTTP 500.
    pub async fn broken() -> Self {
        let router = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
        Self::serve(router).await
    }

    async fn serve(router: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub catalog");
        let addr = listener.local_addr().expect("stub catalog addr");
        tokio::spawn(async move {
            // Runs until the test runtime is torn down.
            let _ = axum::serve(listener, router).await;
        });

        let base_url = format!("http://{addr}").parse().expect("stub url");
        Self { base_url }
    }

    /// Base URL of the stub.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// A storefront configuration pointed at this stub.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            catalog_url: self.base_url.clone(),
            ..StorefrontConfig::default()
        }
    }
}

async fn list_products(State(products): State<Arc<Vec<Value>>>) -> Json<Vec<Value>> {
    Json(products.as_ref().clone())
}

async fn get_product(
    State(products): State<Arc<Vec<Value>>>,
    Path(id): Path<i64>,
) -> Response {
    products
        .iter()
        .find(|p| p.get("id").and_then(Value::as_i64) == Some(id))
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |p| Json(p.clone()).into_response(),
        )
}

/// Catalog fixtures mirroring the real catalog's record shape.
#[must_use]
pub fn fixture_products() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://img.example.com/backpack.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }),
        json!({
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "description": "Slim-fitting style",
            "category": "men's clothing",
            "image": "https://img.example.com/shirt.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        }),
        json!({
            "id": 3,
            "title": "Solid Gold Petite Micropave Ring",
            "price": 168.0,
            "description": "Satisfaction guaranteed",
            "category": "jewelery",
            "image": "https://img.example.com/ring.jpg",
            "rating": { "rate": 3.9, "count": 70 }
        }),
    ]
}
