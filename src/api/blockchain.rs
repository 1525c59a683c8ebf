use serde_json::Value;

use super::{segment, ApiClient};
use crate::error::ApiError;
use crate::models::VerifyRequest;

/// `/blockchain/*` audit-trail endpoints.
pub struct BlockchainApi<'a> {
    client: &'a ApiClient,
}

impl<'a> BlockchainApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn audit_history(&self) -> Result<Value, ApiError> {
        self.client.get("/blockchain/audit-history").await
    }

    pub async fn verify(&self, tx_hash: &str) -> Result<Value, ApiError> {
        let body = VerifyRequest {
            tx_hash: tx_hash.to_string(),
        };
        self.client.post("/blockchain/verify", &body).await
    }

    pub async fn stats(&self) -> Result<Value, ApiError> {
        self.client.get("/blockchain/stats").await
    }

    pub async fn transactions(&self) -> Result<Value, ApiError> {
        self.client.get("/blockchain/transactions").await
    }

    pub async fn transaction(&self, tx_hash: &str) -> Result<Value, ApiError> {
        let path = format!("/blockchain/transactions/{}", segment(tx_hash));
        self.client.get(&path).await
    }

    pub async fn wallet(&self) -> Result<Value, ApiError> {
        self.client.get("/blockchain/wallet").await
    }
}
