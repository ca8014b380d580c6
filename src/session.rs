//! Client-side session storage.
//!
//! One key, one value: the session identifier handed back by the server on a
//! successful registration. Scoped to the browsing session, so a plain
//! in-memory map is a faithful stand-in outside the browser.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Key the session identifier is stored under.
pub const SESSION_STORAGE_KEY: &str = "lab_session_id";

/// Keyed string storage scoped to the page's browsing session.
pub trait SessionStore: Send + Sync {
    fn set(&self, key: &str, value: &str);
    fn get(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
}

/// In-memory [`SessionStore`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get(SESSION_STORAGE_KEY), None);

        store.set(SESSION_STORAGE_KEY, "abc-123");
        assert_eq!(store.get(SESSION_STORAGE_KEY).as_deref(), Some("abc-123"));

        store.remove(SESSION_STORAGE_KEY);
        assert_eq!(store.get(SESSION_STORAGE_KEY), None);
    }
}
