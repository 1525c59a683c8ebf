use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /chat/query`.
///
/// `user_id` is always sent, as `null` when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatQueryRequest {
    pub message: String,
    pub session_id: String,
    pub user_id: Option<String>,
}

/// What the backend understood a chat query to be asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    SearchLogs,
    GenerateReport,
    GetStatistics,
    FilterResults,
    Clarification,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Response of `POST /chat/query`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatQueryResponse {
    pub response: String,
    #[serde(default)]
    pub intent: QueryIntent,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub visualization: Option<Value>,
    #[serde(default)]
    pub query_used: Option<String>,
    /// Seconds spent answering the query
    #[serde(default)]
    pub execution_time: Option<f64>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

/// Author of a chat history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    User,
    Assistant,
    System,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub content: String,
    /// ISO-8601 timestamp as sent by the server
    pub timestamp: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl ChatMessage {
    /// Parse the timestamp; `None` if it is not a naive ISO-8601 datetime.
    pub fn sent_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

/// Response of `GET /chat/history/{session_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatHistory {
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}
