//! # Session
//!
//! The signed-in user and bearer token, held in a key/value store.
//!
//! One `Session` is created at startup and cloned into the API client and
//! every view. Clones share the same storage backend.

pub mod storage;

use anyhow::Result;
use std::sync::Arc;

use crate::models::User;
pub use storage::{IniFileStore, KeyValueStore, MemoryStore};

/// Storage key holding the JSON-serialized user
pub const USER_KEY: &str = "user";

/// Storage key holding the raw bearer token
pub const TOKEN_KEY: &str = "token";

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl Session {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Session kept only in memory
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read '{}' from session storage: {}", key, e);
                None
            }
        }
    }

    /// The stored user, if any and if it parses
    pub fn user(&self) -> Option<User> {
        let raw = self.read(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Stored user is not valid JSON: {}", e);
                None
            }
        }
    }

    /// Identifier of the stored user; `None` when absent or empty
    pub fn user_id(&self) -> Option<String> {
        self.user().map(|u| u.id).filter(|id| !id.is_empty())
    }

    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    /// User id and token, only when both are stored
    pub fn credentials(&self) -> Option<(String, String)> {
        Some((self.user_id()?, self.token()?))
    }

    /// Both the user and the token are present
    pub fn is_logged_in(&self) -> bool {
        self.read(USER_KEY).is_some() && self.read(TOKEN_KEY).is_some()
    }

    /// Persist the result of a successful login
    pub fn store_login(&self, user: &User, token: &str) -> Result<()> {
        self.store_user(user)?;
        self.store.set(TOKEN_KEY, token)?;
        tracing::info!("Session started for '{}'", user.username);
        Ok(())
    }

    /// Replace the cached user, keeping the token
    pub fn store_user(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &raw)
    }

    /// Drop the user and token together
    pub fn clear(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("Session cleared");
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            username: "ripley".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn new_session_should_not_be_logged_in() {
        let session = Session::in_memory();
        assert!(!session.is_logged_in());
        assert_eq!(session.user(), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn store_login_should_log_in() {
        let session = Session::in_memory();
        session.store_login(&user("u1"), "t1").unwrap();

        assert!(session.is_logged_in());
        assert_eq!(session.user_id(), Some("u1".to_string()));
        assert_eq!(session.token(), Some("t1".to_string()));
    }

    #[test]
    fn clear_should_remove_both_keys() {
        let session = Session::in_memory();
        session.store_login(&user("u1"), "t1").unwrap();

        session.clear().unwrap();

        assert!(!session.is_logged_in());
        assert_eq!(session.user(), None);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn user_without_token_should_not_be_logged_in() {
        let session = Session::in_memory();
        session.store_user(&user("u1")).unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn credentials_should_need_user_id_and_token() {
        let session = Session::in_memory();
        session.store_user(&user("u1")).unwrap();
        assert_eq!(session.credentials(), None);

        session.store_login(&user("u1"), "t1").unwrap();
        assert_eq!(
            session.credentials(),
            Some(("u1".to_string(), "t1".to_string()))
        );
    }

    #[test]
    fn empty_user_id_should_be_treated_as_missing() {
        let store = MemoryStore::new();
        store.set(USER_KEY, "{}").unwrap();
        store.set(TOKEN_KEY, "t1").unwrap();
        let session = Session::new(store);

        assert!(session.is_logged_in());
        assert_eq!(session.user_id(), None);
        assert_eq!(session.credentials(), None);
    }

    #[test]
    fn clones_should_share_storage() {
        let session = Session::in_memory();
        let other = session.clone();

        session.store_login(&user("u1"), "t1").unwrap();
        assert!(other.is_logged_in());

        other.clear().unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn corrupt_user_should_read_as_none() {
        let store = MemoryStore::new();
        store.set(USER_KEY, "not json").unwrap();
        let session = Session::new(store);
        assert_eq!(session.user(), None);
    }
}
