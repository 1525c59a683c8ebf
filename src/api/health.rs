use super::ApiClient;
use crate::error::ApiError;
use crate::models::HealthStatus;

/// `/health` endpoints.
pub struct HealthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> HealthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn check(&self) -> Result<HealthStatus, ApiError> {
        self.client.get("/health").await
    }

    pub async fn detailed(&self) -> Result<HealthStatus, ApiError> {
        self.client.get("/health/detailed").await
    }
}
