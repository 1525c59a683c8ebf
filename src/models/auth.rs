use serde::{Deserialize, Serialize};

use crate::auth::UserProfile;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
}

/// Response of `POST /auth/login` and `POST /auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_response_minimal() {
        let resp: TokenResponse = serde_json::from_value(json!({
            "access_token": "abc",
            "user": {"username": "alice"}
        }))
        .unwrap();
        assert_eq!(resp.access_token, "abc");
        assert_eq!(resp.refresh_token, None);
        assert_eq!(resp.user.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_token_response_full() {
        let resp: TokenResponse = serde_json::from_value(json!({
            "access_token": "abc",
            "refresh_token": "def",
            "token_type": "bearer",
            "user": {"id": "u1", "email": "a@b.c"}
        }))
        .unwrap();
        assert_eq!(resp.refresh_token.as_deref(), Some("def"));
        assert_eq!(resp.token_type.as_deref(), Some("bearer"));
    }

    #[test]
    fn test_signup_request_fields() {
        let body = serde_json::to_value(SignupRequest {
            email: "a@b.c".to_string(),
            username: "alice".to_string(),
            full_name: "Alice Doe".to_string(),
            password: "pw".to_string(),
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "email": "a@b.c",
                "username": "alice",
                "full_name": "Alice Doe",
                "password": "pw"
            })
        );
    }
}
