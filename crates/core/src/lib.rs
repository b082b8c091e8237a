//! ShopHub Core - Shared types library.
//!
//! This crate provides common types used across all ShopHub components:
//! - `storefront` - The application library (stores, catalog client, auth)
//! - `cli` - The interactive terminal storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
