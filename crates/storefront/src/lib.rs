//! ShopHub storefront library.
//!
//! The state-management core of the storefront, usable from any frontend.
//! The bundled frontend is the `shophub` CLI, but nothing here knows about
//! terminals or HTTP servers.
//!
//! # Architecture
//!
//! - [`stores`] - In-memory application state: the cart and the search filter
//! - [`services::auth`] - Mock signup/login/session over durable storage
//! - [`storage`] - The durable key-value store (the localStorage stand-in)
//! - [`catalog`] - HTTP client for the external product catalog
//! - [`state`] - [`state::AppState`], one instance of everything, created at
//!   application start and dropped at exit
//!
//! Stores never call each other; the frontend reads from and dispatches into
//! them. All mutation is synchronous and single-threaded - the only await
//! points are the two catalog fetches.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;

pub use error::{AppError, Result};
