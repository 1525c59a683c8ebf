use serde_json::Value;

use super::ApiClient;
use crate::error::ApiError;

/// `/ai-analysis/*` threat-analysis endpoints.
pub struct AiAnalysisApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AiAnalysisApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn analyze_threats(&self, query: &Value) -> Result<Value, ApiError> {
        self.client.post("/ai-analysis/analyze-threats", query).await
    }

    pub async fn threat_dashboard(&self) -> Result<Value, ApiError> {
        self.client.get("/ai-analysis/threat-dashboard").await
    }
}
