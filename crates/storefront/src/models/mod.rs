//! Domain models persisted by the storefront.

pub mod user;

pub use user::{SessionUser, UserAccount};
