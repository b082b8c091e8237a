//! User domain types.
//!
//! These types back the mock auth flow. `UserAccount` is the registry
//! record; `SessionUser` is its password-stripped projection, the only
//! shape the rest of the application ever sees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shophub_core::{Email, UserId};

/// A registered account (registry record).
///
/// The password is stored in plaintext. That is the point: this is a
/// browser-demo auth mechanism, preserved as-is and never to be mistaken
/// for something securable. Accounts are created on signup and never
/// mutated or deleted.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAccount {
    /// Unique user ID, derived from the creation timestamp in milliseconds.
    pub id: UserId,
    /// User's display name.
    pub name: String,
    /// User's email address (unique key within the registry).
    pub email: Email,
    /// Plaintext password (demo-only mechanism).
    pub password: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// The session projection of this account, with the password stripped.
    #[must_use]
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

// Keeps the plaintext password out of logs even though it is stored openly.
impl std::fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// The active session identity.
///
/// At most one exists at a time; it is persisted across restarts under its
/// own storage key and destroyed on logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    /// User's registry ID.
    pub id: UserId,
    /// User's display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
}
