//! `localStorage`-backed session store.

use todo_core::{SessionStore, StorageError};
use web_sys::Storage;

/// Looks `window.localStorage` up on every call, so the type carries no JS
/// handle and stays `Send + Sync`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl SessionStore for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{e:?}"),
        })
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        Self::storage()?
            .clear()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}
