//! Mock authentication service.
//!
//! Signup, login, and session management over the durable key-value store.
//!
//! This is the original browser demo's auth mechanism preserved verbatim:
//! accounts live as a JSON array under one storage key with **plaintext
//! passwords**, and login is plain string equality. It exists to exercise
//! the session lifecycle, not to be secure - do not copy it anywhere that
//! handles real credentials.
//!
//! The pure registry transitions ([`register`], [`authenticate`]) are free
//! functions over account slices, so the rules are testable without a
//! storage backend; the service orchestrates load -> transition -> persist.

mod error;

pub use error::AuthError;

use chrono::Utc;
use tracing::{info, warn};

use shophub_core::{Email, UserId};

use crate::models::{SessionUser, UserAccount};
use crate::storage::{self, KeyValueStore, keys};

/// Authentication service: credential registry plus active session.
///
/// At most one session exists at a time. The session survives restarts via
/// its storage key; the registry is append-only within this scope.
pub struct AuthService<S> {
    storage: S,
    current: Option<SessionUser>,
}

impl<S: KeyValueStore> AuthService<S> {
    /// Create the service, restoring any persisted session.
    ///
    /// Restoration fails open: a malformed or unreadable session blob is
    /// logged and treated as "not logged in" rather than surfaced, since
    /// the user could never act on it anyway.
    pub fn new(storage: S) -> Self {
        let current = match storage::get_json::<S, SessionUser>(&storage, keys::SESSION) {
            Ok(session) => session,
            Err(error) => {
                warn!(%error, "could not read persisted session, starting logged out");
                None
            }
        };

        Self { storage, current }
    }

    /// Register a new account and log it in.
    ///
    /// On success the account is appended to the registry, the registry is
    /// persisted, and the password-stripped projection becomes the active
    /// session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed and
    /// `AuthError::EmailTaken` if it is already registered. Password
    /// strength is not checked here; that is the calling form's concern.
    /// In every failure case the registry and any existing session are
    /// untouched.
    pub fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, AuthError> {
        let mut registry = self.load_registry()?;
        let account = register(&registry, name, email, password)?;

        registry.push(account.clone());
        storage::set_json(&self.storage, keys::USERS, &registry)?;

        info!(user_id = %account.id, "account created");
        self.set_session(account.to_session_user())
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed and
    /// `AuthError::InvalidCredentials` if no account matches both fields;
    /// an existing session is left unchanged on failure.
    pub fn login(&mut self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let email = Email::parse(email)?;
        let registry = self.load_registry()?;

        let account =
            authenticate(&registry, &email, password).ok_or(AuthError::InvalidCredentials)?;

        info!(user_id = %account.id, "login");
        self.set_session(account.to_session_user())
    }

    /// Log out, clearing the session from memory and durable storage.
    ///
    /// Idempotent: logging out with no active session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session key cannot be removed.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if self.current.take().is_some() {
            info!("logout");
        }
        self.storage.remove(keys::SESSION)?;
        Ok(())
    }

    /// The active session, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    /// Whether a session is currently held.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Load the registry, decoding a corrupt or absent blob as empty.
    fn load_registry(&self) -> Result<Vec<UserAccount>, AuthError> {
        Ok(storage::get_json(&self.storage, keys::USERS)?.unwrap_or_default())
    }

    fn set_session(&mut self, session: SessionUser) -> Result<SessionUser, AuthError> {
        storage::set_json(&self.storage, keys::SESSION, &session)?;
        self.current = Some(session.clone());
        Ok(session)
    }
}

/// Pure signup transition: parse the email, reject duplicates, and build
/// the new account.
///
/// Does not mutate the registry; the caller appends and persists.
///
/// # Errors
///
/// See [`AuthService::signup`].
pub fn register(
    registry: &[UserAccount],
    name: &str,
    email: &str,
    password: &str,
) -> Result<UserAccount, AuthError> {
    let name = name.trim();
    let email = Email::parse(email)?;

    if registry.iter().any(|account| account.email == email) {
        return Err(AuthError::EmailTaken);
    }

    let now = Utc::now();
    Ok(UserAccount {
        // Timestamp-derived, like the original's Date.now(); collisions
        // within one millisecond are accepted exactly as it accepted them.
        id: UserId::new(now.timestamp_millis()),
        name: name.to_owned(),
        email,
        password: password.to_owned(),
        created_at: now,
    })
}

/// Pure login check: plaintext equality over email and password.
#[must_use]
pub fn authenticate<'a>(
    registry: &'a [UserAccount],
    email: &Email,
    password: &str,
) -> Option<&'a UserAccount> {
    registry
        .iter()
        .find(|account| &account.email == email && account.password == password)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::storage::MemoryStore;

    fn service() -> AuthService<MemoryStore> {
        AuthService::new(MemoryStore::new())
    }

    #[test]
    fn test_signup_logs_in() {
        let mut auth = service();
        let session = auth
            .signup("Ada", "ada@example.com", "secret1")
            .expect("signup");
        assert_eq!(session.name, "Ada");
        assert!(auth.is_logged_in());
        assert_eq!(auth.current_user(), Some(&session));
    }

    #[test]
    fn test_signup_rejects_malformed_email() {
        let mut auth = service();
        assert!(matches!(
            auth.signup("Ada", "not-an-email", "secret1"),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(!auth.is_logged_in());
    }

    #[test]
    fn test_signup_trims_name_and_skips_strength_checks() {
        let mut auth = service();
        // Password policy lives in the form layer, not here.
        let session = auth.signup("  Ada  ", "ada@example.com", "x").expect("signup");
        assert_eq!(session.name, "Ada");
    }

    #[test]
    fn test_duplicate_signup_fails_and_changes_nothing() {
        let mut auth = service();
        auth.signup("A", "a@x.com", "secret1").expect("signup");
        let first = auth.current_user().cloned().expect("session");

        let result = auth.signup("B", "a@x.com", "other12");
        assert!(matches!(result, Err(AuthError::EmailTaken)));

        // Registry retains only the first account; session is unchanged.
        assert_eq!(auth.current_user(), Some(&first));
        let registry: Vec<UserAccount> =
            storage::get_json(&auth.storage, keys::USERS)
                .expect("read")
                .expect("registry");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry[0].name, "A");
    }

    #[test]
    fn test_login_wrong_password_keeps_existing_session() {
        let mut auth = service();
        auth.signup("Ada", "ada@example.com", "secret1").expect("signup");
        let session = auth.current_user().cloned().expect("session");

        let result = auth.login("ada@example.com", "wrong-password");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(auth.current_user(), Some(&session));
    }

    #[test]
    fn test_login_unknown_email() {
        let mut auth = service();
        assert!(matches!(
            auth.login("ghost@example.com", "secret1"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_logout_is_idempotent() {
        let mut auth = service();
        auth.signup("Ada", "ada@example.com", "secret1").expect("signup");

        auth.logout().expect("logout");
        assert!(!auth.is_logged_in());

        // Second logout with no session is a no-op.
        auth.logout().expect("logout again");
        assert!(!auth.is_logged_in());
    }

    #[test]
    fn test_session_restores_across_services() {
        let storage = MemoryStore::new();
        {
            let mut auth = AuthService::new(&storage);
            auth.signup("Ada", "ada@example.com", "secret1").expect("signup");
        }
        let auth = AuthService::new(&storage);
        assert!(auth.is_logged_in());
        assert_eq!(
            auth.current_user().map(|u| u.email.as_str()),
            Some("ada@example.com")
        );
    }

    #[test]
    fn test_corrupt_session_fails_open_to_logged_out() {
        let storage = MemoryStore::new();
        storage.set(keys::SESSION, "{definitely not json").expect("write");

        let auth = AuthService::new(&storage);
        assert!(!auth.is_logged_in());
    }

    #[test]
    fn test_corrupt_registry_treated_as_empty() {
        let storage = MemoryStore::new();
        storage.set(keys::USERS, "[broken").expect("write");

        let mut auth = AuthService::new(&storage);
        // Signup succeeds as if the registry were empty.
        auth.signup("Ada", "ada@example.com", "secret1").expect("signup");
        // And login against the rewritten registry works.
        auth.logout().expect("logout");
        auth.login("ada@example.com", "secret1").expect("login");
    }

    #[test]
    fn test_register_is_pure() {
        let account = register(&[], "Ada", "ada@example.com", "secret1").expect("register");
        // No storage involved; the caller owns the append.
        assert_eq!(account.email.as_str(), "ada@example.com");
        assert_eq!(account.id.as_i64(), account.created_at.timestamp_millis());
    }

    #[test]
    fn test_authenticate_requires_both_fields() {
        let registry =
            vec![register(&[], "Ada", "ada@example.com", "secret1").expect("register")];
        let email = Email::parse("ada@example.com").expect("email");

        assert!(authenticate(&registry, &email, "secret1").is_some());
        assert!(authenticate(&registry, &email, "SECRET1").is_none());

        let other = Email::parse("bob@example.com").expect("email");
        assert!(authenticate(&registry, &other, "secret1").is_none());
    }
}
