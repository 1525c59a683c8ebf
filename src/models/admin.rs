use serde::{Deserialize, Serialize};

/// Body of `PUT /admin/users/{id}/role`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleUpdate {
    pub role: String,
}
