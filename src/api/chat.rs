use serde_json::Value;

use super::{segment, ApiClient};
use crate::error::ApiError;
use crate::models::{ChatHistory, ChatQueryRequest, ChatQueryResponse};

/// History page size used when the caller has no preference.
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

/// `/chat/*` endpoints.
pub struct ChatApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ChatApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn send_message(
        &self,
        message: &str,
        session_id: &str,
        user_id: Option<&str>,
    ) -> Result<ChatQueryResponse, ApiError> {
        require_session(session_id)?;
        let body = ChatQueryRequest {
            message: message.to_string(),
            session_id: session_id.to_string(),
            user_id: user_id.map(str::to_string),
        };
        self.client.post("/chat/query", &body).await
    }

    pub async fn history(
        &self,
        session_id: &str,
        limit: Option<u32>,
    ) -> Result<ChatHistory, ApiError> {
        require_session(session_id)?;
        let path = format!(
            "/chat/history/{}?limit={}",
            segment(session_id),
            limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
        );
        self.client.get(&path).await
    }

    /// Merge `updates` into the server-side conversation context. The
    /// acknowledgement body is returned as sent; an empty body is `null`.
    pub async fn update_context(
        &self,
        session_id: &str,
        updates: &Value,
    ) -> Result<Value, ApiError> {
        require_session(session_id)?;
        let path = format!("/chat/context/{}", segment(session_id));
        self.client.post(&path, updates).await
    }

    pub async fn clear_session(&self, session_id: &str) -> Result<Value, ApiError> {
        require_session(session_id)?;
        let path = format!("/chat/session/{}", segment(session_id));
        self.client.delete(&path).await
    }
}

fn require_session(session_id: &str) -> Result<(), ApiError> {
    if session_id.trim().is_empty() {
        return Err(ApiError::invalid_request("A chat session id is required"));
    }
    Ok(())
}
