//! Durable session persistence.
//!
//! `SessionStore` mirrors the browser's key-value storage so the same
//! controller runs against `localStorage` in the browser and a `HashMap` in
//! tests. The session lives under two keys, `token` and `username`.

use std::collections::HashMap;

use crate::error::StorageError;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";

/// The authenticated user's token and username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
}

pub trait SessionStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Wipes every key, not just the session ones.
    fn clear(&mut self) -> Result<(), StorageError>;

    /// A session exists only when both keys are present and non-empty.
    fn load_session(&self) -> Option<Session> {
        let token = self.get_item(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let username = self.get_item(USERNAME_KEY).filter(|u| !u.is_empty())?;
        Some(Session { token, username })
    }

    fn save_session(&mut self, session: &Session) -> Result<(), StorageError> {
        self.set_item(TOKEN_KEY, &session.token)?;
        self.set_item(USERNAME_KEY, &session.username)
    }

    fn clear_session(&mut self) -> Result<(), StorageError> {
        self.clear()
    }
}

/// In-memory store for tests and native hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: &Session) -> Self {
        let mut items = HashMap::new();
        items.insert(TOKEN_KEY.to_string(), session.token.clone());
        items.insert(USERNAME_KEY.to_string(), session.username.clone());
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.items.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: "t-1".to_string(),
            username: "alice".to_string(),
        }
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        store.save_session(&session()).unwrap();
        assert_eq!(store.get_item(TOKEN_KEY).as_deref(), Some("t-1"));
        assert_eq!(store.load_session(), Some(session()));
    }

    #[test]
    fn load_requires_both_keys() {
        let mut store = MemoryStore::new();
        store.set_item(TOKEN_KEY, "t-1").unwrap();
        assert_eq!(store.load_session(), None);

        let mut store = MemoryStore::new();
        store.set_item(USERNAME_KEY, "alice").unwrap();
        assert_eq!(store.load_session(), None);
    }

    #[test]
    fn clear_removes_unrelated_keys_too() {
        let mut store = MemoryStore::with_session(&session());
        store.set_item("theme", "dark").unwrap();
        store.clear_session().unwrap();
        assert!(store.is_empty());
    }
}
