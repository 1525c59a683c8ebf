use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Summary,
    Detailed,
    Custom,
}

impl std::str::FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(ReportType::Summary),
            "detailed" => Ok(ReportType::Detailed),
            "custom" => Ok(ReportType::Custom),
            other => Err(format!("unknown report type: {}", other)),
        }
    }
}

/// Body of `POST /reports/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRequest {
    pub description: String,
    pub report_type: ReportType,
    pub include_charts: bool,
}

impl ReportRequest {
    /// Charts are always requested.
    pub fn new(description: impl Into<String>, report_type: ReportType) -> Self {
        Self {
            description: description.into(),
            report_type,
            include_charts: true,
        }
    }
}

/// Response of `POST /reports/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportResponse {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub visualizations: Option<Vec<Value>>,
    pub generated_at: String,
    #[serde(default)]
    pub query_used: Option<String>,
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub execution_time: f64,
}
