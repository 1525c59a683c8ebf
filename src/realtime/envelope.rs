//! The `{type, payload}` frame format used in both directions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound: incremental data update for a subscribed channel.
pub const UPDATE: &str = "update";
/// Inbound: chat/notification message.
pub const MESSAGE: &str = "message";
/// Outbound: start receiving a channel.
pub const SUBSCRIBE: &str = "subscribe";
/// Outbound: stop receiving a channel.
pub const UNSUBSCRIBE: &str = "unsubscribe";

/// A realtime frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub payload: Value,
}

impl Envelope {
    pub fn new(message_type: impl Into<String>, payload: Value) -> Self {
        Self {
            message_type: message_type.into(),
            payload,
        }
    }

    /// Parse a text frame. A missing `payload` becomes `null`; a missing or
    /// non-string `type` is an error.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
