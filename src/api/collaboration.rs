use serde_json::Value;

use super::{segment, ApiClient};
use crate::error::ApiError;

/// `/collaboration/investigations` endpoints.
pub struct CollaborationApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CollaborationApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create_investigation(&self, data: &Value) -> Result<Value, ApiError> {
        self.client.post("/collaboration/investigations", data).await
    }

    pub async fn investigations(&self) -> Result<Value, ApiError> {
        self.client.get("/collaboration/investigations").await
    }

    pub async fn investigation(&self, id: &str) -> Result<Value, ApiError> {
        let path = format!("/collaboration/investigations/{}", segment(id));
        self.client.get(&path).await
    }

    pub async fn join(&self, id: &str) -> Result<Value, ApiError> {
        let path = format!("/collaboration/investigations/{}/join", segment(id));
        self.client.post_empty(&path).await
    }

    /// Attach a query result to an investigation.
    pub async fn share_query(&self, id: &str, data: &Value) -> Result<Value, ApiError> {
        let path = format!("/collaboration/investigations/{}/share-query", segment(id));
        self.client.post(&path, data).await
    }
}
