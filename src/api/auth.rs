use serde_json::Value;
use tracing::warn;

use super::ApiClient;
use crate::auth::UserProfile;
use crate::error::ApiError;
use crate::models::{LoginRequest, SignupRequest, TokenResponse};

/// `/auth/*` endpoints.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.client.post("/auth/login", &body).await
    }

    pub async fn signup(
        &self,
        email: &str,
        username: &str,
        full_name: &str,
        password: &str,
    ) -> Result<Value, ApiError> {
        let body = SignupRequest {
            email: email.to_string(),
            username: username.to_string(),
            full_name: full_name.to_string(),
            password: password.to_string(),
        };
        self.client.post("/auth/signup", &body).await
    }

    /// Tell the server the session is over. Failures are logged, not
    /// returned; local cleanup is the caller's job.
    pub async fn logout(&self) {
        if let Err(e) = self.client.post_empty::<Value>("/auth/logout").await {
            warn!("Logout request failed [{}]: {}", e.error_code(), e);
        }
    }

    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.client.get("/auth/me").await
    }

    pub async fn refresh(&self) -> Result<TokenResponse, ApiError> {
        self.client.post_empty("/auth/refresh").await
    }
}
