use serde_json::Value;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{ReportRequest, ReportResponse, ReportType};

/// `/reports/*` endpoints.
pub struct ReportsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReportsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Generate a report from a natural-language description. Charts are
    /// always requested.
    pub async fn generate(
        &self,
        description: &str,
        report_type: ReportType,
    ) -> Result<ReportResponse, ApiError> {
        let body = ReportRequest::new(description, report_type);
        self.client.post("/reports/generate", &body).await
    }

    pub async fn templates(&self) -> Result<Value, ApiError> {
        self.client.get("/reports/templates").await
    }
}
