//! Authenticated user profile.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile returned by `/auth/login` and `/auth/me`.
///
/// The backend has shipped both integer and string ids, so `id` is kept as
/// raw JSON. Fields this client does not know about are preserved in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain_address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Name to show for this user: full name, then username, then email.
    pub fn display_name(&self) -> &str {
        [&self.full_name, &self.username, &self.email]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("User")
    }

    /// Two-letter avatar initials.
    pub fn initials(&self) -> String {
        if let Some(full_name) = self.full_name.as_deref().filter(|s| !s.trim().is_empty()) {
            let mut parts = full_name.split_whitespace();
            let first = parts.next().and_then(|p| p.chars().next());
            let second = parts.next().and_then(|p| p.chars().next());
            return match (first, second) {
                (Some(a), Some(b)) => format!("{}{}", a, b).to_uppercase(),
                (Some(a), None) => a.to_uppercase().to_string(),
                _ => "U".to_string(),
            };
        }

        [&self.username, &self.email]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .map(|s| s.chars().take(2).collect::<String>().to_uppercase())
            .unwrap_or_else(|| "U".to_string())
    }

    /// Admin privileges are granted only by an explicit `is_superuser: true`.
    pub fn is_admin(&self) -> bool {
        self.is_superuser == Some(true)
    }
}
