//! In-memory session store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::traits::{SessionStore, SessionStoreError};

/// In-memory session store.
///
/// Clones share the same entries, so a test can keep a handle and inspect
/// what the code under test wrote.
///
/// # Example
///
/// ```ignore
/// use secops::adapters::mock::InMemorySessionStore;
///
/// let store = InMemorySessionStore::new();
/// store.insert_raw("auth_token", "abc");
/// let session = SessionManager::new(Arc::new(store.clone()));
/// session.clear_credentials().await?;
/// assert_eq!(store.raw("auth_token"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    should_fail: Arc<AtomicBool>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read an entry without going through the trait.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Write an entry without going through the trait.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Make every subsequent operation fail.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    fn check(&self, op: &str) -> Result<(), SessionStoreError> {
        if self.should_fail.load(Ordering::SeqCst) {
            let msg = format!("Mock {} failure", op);
            return Err(if op == "get" {
                SessionStoreError::LoadFailed(msg)
            } else {
                SessionStoreError::SaveFailed(msg)
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        self.check("get")?;
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.check("set")?;
        self.insert_raw(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        self.check("remove")?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = InMemorySessionStore::new();
        assert!(store.is_empty());

        store.set("auth_token", "abc").await.unwrap();
        assert_eq!(store.get("auth_token").await.unwrap(), Some("abc".to_string()));

        store.remove("auth_token").await.unwrap();
        assert_eq!(store.get("auth_token").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_should_fail() {
        let store = InMemorySessionStore::new();
        store.set_should_fail(true);

        assert!(matches!(
            store.get("k").await,
            Err(SessionStoreError::LoadFailed(_))
        ));
        assert!(matches!(
            store.set("k", "v").await,
            Err(SessionStoreError::SaveFailed(_))
        ));

        store.set_should_fail(false);
        assert!(store.set("k", "v").await.is_ok());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = InMemorySessionStore::new();
        let cloned = store.clone();
        store.insert_raw("session_id", "s");
        assert_eq!(cloned.raw("session_id"), Some("s".to_string()));
    }
}
