//! Session storage trait abstraction.
//!
//! The session store is a small persistent key/value space holding the
//! bearer token, the serialized user profile and the chat session id. Only
//! [`crate::auth::SessionManager`] talks to it directly.

use async_trait::async_trait;

/// Session storage errors.
#[derive(Debug, Clone)]
pub enum SessionStoreError {
    /// Failed to read the backing storage
    LoadFailed(String),
    /// Failed to write the backing storage
    SaveFailed(String),
    /// Serialization/deserialization error
    Serialization(String),
}

impl std::fmt::Display for SessionStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStoreError::LoadFailed(msg) => write!(f, "Failed to load session: {}", msg),
            SessionStoreError::SaveFailed(msg) => write!(f, "Failed to save session: {}", msg),
            SessionStoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for SessionStoreError {}

/// Persistent key/value storage for session state.
///
/// Implementations include the file-backed store used by the CLI and an
/// in-memory store for tests.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;

    /// Remove a value. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_store_error_display() {
        assert_eq!(
            SessionStoreError::LoadFailed("denied".to_string()).to_string(),
            "Failed to load session: denied"
        );
        assert_eq!(
            SessionStoreError::SaveFailed("disk full".to_string()).to_string(),
            "Failed to save session: disk full"
        );
        assert_eq!(
            SessionStoreError::Serialization("bad json".to_string()).to_string(),
            "Serialization error: bad json"
        );
    }

    #[test]
    fn test_session_store_error_implements_error_trait() {
        let err = SessionStoreError::LoadFailed("x".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
