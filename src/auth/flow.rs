//! Session lifecycle against the API: sign in, restore, sign out.

use tracing::{debug, info, warn};

use super::profile::UserProfile;
use crate::api::ApiClient;
use crate::error::ApiError;

/// Drives login and logout, keeping the stored session in step with the
/// server.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    client: ApiClient,
}

impl AuthFlow {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Log in and persist the returned token and profile.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<UserProfile, ApiError> {
        let token = self.client.auth().login(username, password).await?;
        self.client
            .session()
            .store_login(&token.access_token, &token.user)
            .await?;
        info!("Signed in as {}", token.user.display_name());
        Ok(token.user)
    }

    /// Revalidate a stored session.
    ///
    /// Returns `None` when nothing is stored. When the server no longer
    /// accepts the token the session is signed out and `None` is returned.
    /// On success the stored profile is replaced with the server's copy.
    pub async fn restore(&self) -> Result<Option<UserProfile>, ApiError> {
        let session = self.client.session();
        if session.token().await?.is_none() || session.user().await?.is_none() {
            debug!("No stored session to restore");
            return Ok(None);
        }

        match self.client.auth().current_user().await {
            Ok(user) => {
                session.update_user(&user).await?;
                debug!("Restored session for {}", user.display_name());
                Ok(Some(user))
            }
            Err(e) => {
                warn!("Token validation failed [{}]: {}", e.error_code(), e);
                self.sign_out().await?;
                Ok(None)
            }
        }
    }

    /// Tell the server, then forget the stored credentials whatever it
    /// answered.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        self.client.auth().logout().await;
        self.client.session().clear_credentials().await?;
        info!("Signed out");
        Ok(())
    }

    /// Replace the locally stored profile.
    pub async fn update_user(&self, user: &UserProfile) -> Result<(), ApiError> {
        self.client.session().update_user(user).await?;
        Ok(())
    }
}
