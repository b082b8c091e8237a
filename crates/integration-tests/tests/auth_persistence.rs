//! Auth flows over the file-backed store: the "across page reloads" story.

use shophub_storefront::services::auth::{AuthError, AuthService};
use shophub_storefront::storage::{FileStore, KeyValueStore, keys};

fn open_store(dir: &tempfile::TempDir) -> FileStore {
    FileStore::open(dir.path()).expect("open store")
}

#[test]
fn session_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut auth = AuthService::new(open_store(&dir));
        auth.signup("Ada", "ada@example.com", "secret1").expect("signup");
        assert!(auth.is_logged_in());
    }

    // A fresh service over the same directory restores the session.
    let auth = AuthService::new(open_store(&dir));
    assert!(auth.is_logged_in());
    let user = auth.current_user().expect("session");
    assert_eq!(user.name, "Ada");
    assert_eq!(user.email.as_str(), "ada@example.com");
}

#[test]
fn logout_clears_durable_session() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut auth = AuthService::new(open_store(&dir));
        auth.signup("Ada", "ada@example.com", "secret1").expect("signup");
        auth.logout().expect("logout");
    }

    let auth = AuthService::new(open_store(&dir));
    assert!(!auth.is_logged_in());
}

#[test]
fn login_after_restart_uses_persisted_registry() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut auth = AuthService::new(open_store(&dir));
        auth.signup("Ada", "ada@example.com", "secret1").expect("signup");
        auth.logout().expect("logout");
    }

    let mut auth = AuthService::new(open_store(&dir));
    assert!(matches!(
        auth.login("ada@example.com", "wrong"),
        Err(AuthError::InvalidCredentials)
    ));
    let user = auth.login("ada@example.com", "secret1").expect("login");
    assert_eq!(user.name, "Ada");
}

#[test]
fn corrupted_session_file_fails_open_to_logged_out() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut auth = AuthService::new(open_store(&dir));
        auth.signup("Ada", "ada@example.com", "secret1").expect("signup");
    }

    // Scribble over the session blob on disk.
    let store = open_store(&dir);
    store.set(keys::SESSION, "{\"id\": oops").expect("corrupt");

    let auth = AuthService::new(open_store(&dir));
    assert!(!auth.is_logged_in());

    // The registry is a separate key, so the account itself still works.
    let mut auth = auth;
    auth.login("ada@example.com", "secret1").expect("login");
    assert!(auth.is_logged_in());
}

#[test]
fn duplicate_email_rejected_across_restarts() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let mut auth = AuthService::new(open_store(&dir));
        auth.signup("A", "a@x.com", "secret1").expect("signup");
    }

    let mut auth = AuthService::new(open_store(&dir));
    assert!(matches!(
        auth.signup("B", "a@x.com", "other12"),
        Err(AuthError::EmailTaken)
    ));
}
