//! Session state accessor.
//!
//! All reads and writes of the persisted credentials go through
//! [`SessionManager`]. Other modules never see the storage keys.

use std::sync::Arc;

use tracing::{debug, warn};

use super::profile::UserProfile;
use crate::traits::{SessionStore, SessionStoreError};

/// Storage key for the bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Storage key for the JSON-serialized [`UserProfile`].
pub const USER_DATA_KEY: &str = "user_data";

/// Storage key for the chat session identifier.
pub const SESSION_ID_KEY: &str = "session_id";

/// Handle over the persisted session. Clones share the same store.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The stored bearer token, if any. Empty strings count as absent.
    pub async fn token(&self) -> Result<Option<String>, SessionStoreError> {
        Ok(self
            .store
            .get(AUTH_TOKEN_KEY)
            .await?
            .filter(|t| !t.is_empty()))
    }

    /// A stored token means the user is treated as authenticated.
    pub async fn is_authenticated(&self) -> Result<bool, SessionStoreError> {
        Ok(self.token().await?.is_some())
    }

    /// The stored user profile.
    ///
    /// A profile that no longer parses is reported as absent.
    pub async fn user(&self) -> Result<Option<UserProfile>, SessionStoreError> {
        let Some(raw) = self.store.get(USER_DATA_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Ignoring unreadable stored user profile: {}", e);
                Ok(None)
            }
        }
    }

    /// Persist a fresh login.
    pub async fn store_login(
        &self,
        token: &str,
        user: &UserProfile,
    ) -> Result<(), SessionStoreError> {
        self.store.set(AUTH_TOKEN_KEY, token).await?;
        self.update_user(user).await?;
        debug!("Stored session for {}", user.display_name());
        Ok(())
    }

    /// Replace the stored profile, keeping the token.
    pub async fn update_user(&self, user: &UserProfile) -> Result<(), SessionStoreError> {
        let json = serde_json::to_string(user)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        self.store.set(USER_DATA_KEY, &json).await
    }

    /// Forget the token and profile. The chat session id survives.
    pub async fn clear_credentials(&self) -> Result<(), SessionStoreError> {
        self.store.remove(AUTH_TOKEN_KEY).await?;
        self.store.remove(USER_DATA_KEY).await
    }

    /// Forget everything, including the chat session id.
    pub async fn clear_all(&self) -> Result<(), SessionStoreError> {
        self.clear_credentials().await?;
        self.store.remove(SESSION_ID_KEY).await
    }

    pub async fn session_id(&self) -> Result<Option<String>, SessionStoreError> {
        Ok(self
            .store
            .get(SESSION_ID_KEY)
            .await?
            .filter(|id| !id.is_empty()))
    }

    pub async fn set_session_id(&self, id: &str) -> Result<(), SessionStoreError> {
        self.store.set(SESSION_ID_KEY, id).await
    }

    /// The stored chat session id, generating and storing one if needed.
    pub async fn ensure_session_id(&self) -> Result<String, SessionStoreError> {
        if let Some(id) = self.session_id().await? {
            return Ok(id);
        }
        let id = generate_session_id();
        self.set_session_id(&id).await?;
        Ok(id)
    }
}

/// `session_<unix millis>_<9 lowercase base36 chars>`.
pub fn generate_session_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = to_base36(uuid::Uuid::new_v4().as_u128());
    format!("session_{}_{}", millis, &suffix[..9])
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = Vec::with_capacity(25);
    loop {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    // Left-pad so short values still yield 9 characters.
    while out.len() < 9 {
        out.push(b'0');
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::InMemorySessionStore;

    fn manager() -> (InMemorySessionStore, SessionManager) {
        let store = InMemorySessionStore::new();
        let manager = SessionManager::new(Arc::new(store.clone()));
        (store, manager)
    }

    fn ada() -> UserProfile {
        UserProfile {
            username: Some("ada".to_string()),
            full_name: Some("Ada Lovelace".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_store_login_writes_both_keys() {
        let (store, session) = manager();
        session.store_login("tok-1", &ada()).await.unwrap();

        assert_eq!(store.raw(AUTH_TOKEN_KEY), Some("tok-1".to_string()));
        assert!(store.raw(USER_DATA_KEY).unwrap().contains("\"username\":\"ada\""));
        assert_eq!(session.token().await.unwrap(), Some("tok-1".to_string()));
        assert_eq!(session.user().await.unwrap(), Some(ada()));
        assert!(session.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_credentials_keeps_session_id() {
        let (store, session) = manager();
        session.store_login("tok-1", &ada()).await.unwrap();
        session.set_session_id("session_1_abc").await.unwrap();

        session.clear_credentials().await.unwrap();

        assert!(store.raw(AUTH_TOKEN_KEY).is_none());
        assert!(store.raw(USER_DATA_KEY).is_none());
        assert_eq!(store.raw(SESSION_ID_KEY), Some("session_1_abc".to_string()));
        assert!(!session.is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_all_removes_session_id() {
        let (store, session) = manager();
        session.store_login("tok-1", &ada()).await.unwrap();
        session.set_session_id("session_1_abc").await.unwrap();

        session.clear_all().await.unwrap();

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_empty_token_is_absent() {
        let (store, session) = manager();
        store.insert_raw(AUTH_TOKEN_KEY, "");
        assert_eq!(session.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_user_data_reads_as_none() {
        let (store, session) = manager();
        store.insert_raw(USER_DATA_KEY, "{not json");
        assert_eq!(session.user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ensure_session_id_is_stable() {
        let (_store, session) = manager();
        let first = session.ensure_session_id().await.unwrap();
        let second = session.ensure_session_id().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let (store, session) = manager();
        store.set_should_fail(true);
        assert!(session.token().await.is_err());
        assert!(session.store_login("t", &ada()).await.is_err());
    }

    #[test]
    fn test_generate_session_id_format() {
        let id = generate_session_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "000000000");
        assert_eq!(to_base36(35), "00000000z");
        assert_eq!(to_base36(36), "000000010");
    }
}
