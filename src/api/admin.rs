use serde_json::Value;

use super::{segment, ApiClient};
use crate::error::ApiError;
use crate::models::RoleUpdate;

/// `/admin/users` endpoints.
pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn users(&self) -> Result<Value, ApiError> {
        self.client.get("/admin/users").await
    }

    pub async fn delete_user(&self, id: &str) -> Result<Value, ApiError> {
        let path = format!("/admin/users/{}", segment(id));
        self.client.delete(&path).await
    }

    pub async fn update_role(&self, id: &str, role: &str) -> Result<Value, ApiError> {
        let path = format!("/admin/users/{}/role", segment(id));
        let body = RoleUpdate {
            role: role.to_string(),
        };
        self.client.put(&path, &body).await
    }
}
