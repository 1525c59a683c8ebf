//! Session persistence through the file store, across client instances.

mod common;

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use common::user_json;
use secops::adapters::FileSessionStore;
use secops::auth::{token, SESSION_ID_KEY};
use secops::{SessionManager, UserProfile};

fn manager_at(dir: &TempDir) -> SessionManager {
    SessionManager::new(Arc::new(FileSessionStore::new(
        dir.path().join("nested").join("session.json"),
    )))
}

#[tokio::test]
async fn test_login_survives_new_manager() {
    let dir = TempDir::new().unwrap();
    let user: UserProfile = serde_json::from_value(user_json("alice")).unwrap();

    manager_at(&dir).store_login("tok", &user).await.unwrap();

    let reopened = manager_at(&dir);
    assert!(reopened.is_authenticated().await.unwrap());
    assert_eq!(reopened.token().await.unwrap(), Some("tok".to_string()));
    assert_eq!(reopened.user().await.unwrap(), Some(user));
}

#[tokio::test]
async fn test_unknown_profile_fields_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut raw = user_json("alice");
    raw["department"] = json!("SOC");
    let user: UserProfile = serde_json::from_value(raw).unwrap();

    let manager = manager_at(&dir);
    manager.store_login("tok", &user).await.unwrap();

    let stored = manager.user().await.unwrap().unwrap();
    assert_eq!(stored.extra["department"], "SOC");
}

#[tokio::test]
async fn test_session_id_shared_between_managers() {
    let dir = TempDir::new().unwrap();
    let first = manager_at(&dir).ensure_session_id().await.unwrap();
    let second = manager_at(&dir).ensure_session_id().await.unwrap();
    assert_eq!(first, second);

    let parts: Vec<&str> = first.splitn(3, '_').collect();
    assert_eq!(parts[0], "session");
    assert!(parts[1].parse::<i64>().unwrap() > 0);
    assert_eq!(parts[2].len(), 9);
    assert!(parts[2]
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

#[tokio::test]
async fn test_clear_credentials_then_clear_all() {
    let dir = TempDir::new().unwrap();
    let manager = manager_at(&dir);
    manager
        .store_login("tok", &UserProfile::default())
        .await
        .unwrap();
    let id = manager.ensure_session_id().await.unwrap();

    manager.clear_credentials().await.unwrap();
    assert!(!manager.is_authenticated().await.unwrap());
    assert_eq!(manager.user().await.unwrap(), None);
    assert_eq!(manager.session_id().await.unwrap(), Some(id));

    manager.clear_all().await.unwrap();
    assert_eq!(manager.session_id().await.unwrap(), None);

    let text = std::fs::read_to_string(dir.path().join("nested").join("session.json")).unwrap();
    assert!(!text.contains(SESSION_ID_KEY));
}

#[test]
fn test_opaque_token_counts_as_expired() {
    assert_eq!(token::expires_at("not-a-jwt"), None);
    assert!(token::is_token_expired("not-a-jwt"));
}
