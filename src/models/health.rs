use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of `GET /health` and `GET /health/detailed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    /// Per-dependency status, detailed check only
    #[serde(default)]
    pub services: Map<String, Value>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detailed_health() {
        let health: HealthStatus = serde_json::from_value(json!({
            "status": "degraded",
            "timestamp": "2024-03-01T10:15:30",
            "services": {"elasticsearch": "unhealthy"}
        }))
        .unwrap();
        assert!(!health.is_healthy());
        assert_eq!(health.services["elasticsearch"], json!("unhealthy"));
    }
}
