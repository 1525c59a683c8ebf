//! Configured request-issuing client for the console REST API.
//!
//! Every request gets `Content-Type: application/json` and, when a session
//! token is stored, `Authorization: Bearer <token>`. Failures are normalized
//! into [`ApiError`]. A 401 response additionally clears the stored
//! credentials and sends the user to the login route before the error is
//! returned.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::adapters::ReqwestHttpClient;
use crate::auth::SessionManager;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::traits::{Headers, HttpClient, Navigator, Response};

use super::{
    AdminApi, AiAnalysisApi, AuthApi, BlockchainApi, ChatApi, CollaborationApi, HealthApi,
    ReportsApi,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// HTTP client for the console API.
///
/// Clones share the transport, session and navigator. Calls are independent
/// of each other; nothing is queued or deduplicated.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    session: SessionManager,
    navigator: Arc<dyn Navigator>,
    login_route: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("login_route", &self.login_route)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        http: Arc<dyn HttpClient>,
        session: SessionManager,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http,
            session,
            navigator,
            login_route: config.login_route.clone(),
        }
    }

    /// Build a client over reqwest with the configured request timeout.
    pub fn from_config(
        config: &ClientConfig,
        session: SessionManager,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)
            .map_err(ApiError::transport)?;
        Ok(Self::new(config, Arc::new(http), session, navigator))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi::new(self)
    }

    pub fn reports(&self) -> ReportsApi<'_> {
        ReportsApi::new(self)
    }

    pub fn health(&self) -> HealthApi<'_> {
        HealthApi::new(self)
    }

    pub fn blockchain(&self) -> BlockchainApi<'_> {
        BlockchainApi::new(self)
    }

    pub fn collaboration(&self) -> CollaborationApi<'_> {
        CollaborationApi::new(self)
    }

    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }

    pub fn ai_analysis(&self) -> AiAnalysisApi<'_> {
        AiAnalysisApi::new(self)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Get, path, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.request(Method::Post, path, Some(body)).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Post, path, None).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = encode_body(body)?;
        self.request(Method::Put, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::Delete, path, None).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let headers = self.headers().await;

        debug!("{} {}", method.as_str(), url);

        let result = match method {
            Method::Get => self.http.get(&url, &headers).await,
            Method::Post => self.http.post(&url, body.as_deref(), &headers).await,
            Method::Put => self.http.put(&url, body.as_deref(), &headers).await,
            Method::Delete => self.http.delete(&url, &headers).await,
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let err = ApiError::transport(e);
                warn!("{} {} failed [{}]: {}", method.as_str(), url, err.error_code(), err);
                return Err(err);
            }
        };

        if !response.is_success() {
            let err = ApiError::from_status(response.status, &response.body);
            debug!("{} {} -> {} ({})", method.as_str(), url, response.status, err);
            if err.is_unauthorized() {
                self.handle_unauthorized().await;
            }
            return Err(err);
        }

        decode(&response)
    }

    async fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        match self.session.token().await {
            Ok(Some(token)) => {
                headers.insert("Authorization".to_string(), format!("Bearer {}", token));
            }
            Ok(None) => {}
            Err(e) => warn!("Could not read session token, sending unauthenticated: {}", e),
        }

        headers
    }

    async fn handle_unauthorized(&self) {
        warn!("Server rejected the session; signing out");
        if let Err(e) = self.session.clear_credentials().await {
            warn!("Failed to clear stored credentials: {}", e);
        }
        self.navigator.navigate(&self.login_route);
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body)
        .map_err(|e| ApiError::invalid_request(format!("Failed to encode request body: {}", e)))
}

fn decode<T: DeserializeOwned>(response: &Response) -> Result<T, ApiError> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(Value::Null).map_err(ApiError::decode);
    }
    response.json().map_err(ApiError::decode)
}

/// Percent-encode a caller-supplied path segment.
pub(crate) fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}
