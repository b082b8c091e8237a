//! Application state owning one instance of every store.

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::services::auth::AuthService;
use crate::storage::KeyValueStore;
use crate::stores::{CartStore, SearchFilter};

/// Everything the UI layer reads from and dispatches into.
///
/// Created once at application start and dropped at exit; injected into the
/// UI by value rather than living as an ambient singleton. The application
/// is single-threaded, so stores are reached through plain `&`/`&mut`
/// accessors with no locking.
pub struct AppState<S> {
    config: StorefrontConfig,
    catalog: CatalogClient,
    auth: AuthService<S>,
    cart: CartStore,
    search: SearchFilter,
}

impl<S: KeyValueStore> AppState<S> {
    /// Build the application state.
    ///
    /// Restores any persisted session from `storage`; the cart and search
    /// filter always start empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be constructed.
    pub fn new(config: StorefrontConfig, storage: S) -> Result<Self> {
        let catalog = CatalogClient::new(&config)?;
        let auth = AuthService::new(storage);

        Ok(Self {
            config,
            catalog,
            auth,
            cart: CartStore::new(),
            search: SearchFilter::new(),
        })
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The catalog API client.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// The auth service (read-only).
    #[must_use]
    pub const fn auth(&self) -> &AuthService<S> {
        &self.auth
    }

    /// The auth service.
    pub const fn auth_mut(&mut self) -> &mut AuthService<S> {
        &mut self.auth
    }

    /// The cart (read-only).
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The cart.
    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// The search filter (read-only).
    #[must_use]
    pub const fn search(&self) -> &SearchFilter {
        &self.search
    }

    /// The search filter.
    pub const fn search_mut(&mut self) -> &mut SearchFilter {
        &mut self.search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_new_state_starts_empty() {
        let mut state = AppState::new(StorefrontConfig::default(), MemoryStore::new())
            .expect("state");

        assert!(state.cart().is_empty());
        assert!(!state.search().is_active());
        assert!(!state.auth().is_logged_in());

        state.search_mut().set("jacket");
        assert_eq!(state.search().query(), "jacket");
    }
}
