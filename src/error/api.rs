//! HTTP API error type.
//!
//! Every failed API call is normalized into an [`ApiError`] carrying a single
//! human-readable message, picked in this order: the server's `detail`
//! field, the transport message, then [`FALLBACK_MESSAGE`].

use serde_json::Value;
use thiserror::Error;

use crate::traits::{HttpError, SessionStoreError};

/// Message used when neither the server nor the transport explains a failure.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Error returned by every [`crate::ApiClient`] call.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No response was received.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        cause: HttpError,
    },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("{message}")]
    Decode { message: String },

    /// The request was rejected locally before any I/O.
    #[error("{message}")]
    InvalidRequest { message: String },

    /// Persisting or reading the session failed around an API call.
    #[error("{message}")]
    Session {
        message: String,
        #[source]
        cause: SessionStoreError,
    },
}

impl From<SessionStoreError> for ApiError {
    fn from(cause: SessionStoreError) -> Self {
        ApiError::Session {
            message: format!("Session storage error: {}", cause),
            cause,
        }
    }
}

impl ApiError {
    /// Build a transport error, normalizing an empty transport message.
    pub fn transport(cause: HttpError) -> Self {
        let message = non_empty(cause.transport_message())
            .unwrap_or(FALLBACK_MESSAGE)
            .to_string();
        ApiError::Transport { message, cause }
    }

    /// Build a status error from a non-2xx response body.
    ///
    /// `detail` wins when present; a non-string detail (validation error
    /// lists, objects) is rendered as JSON text. Otherwise the message is
    /// the generic `Request failed with status code N`.
    pub fn from_status(status: u16, raw_body: &[u8]) -> Self {
        let body: Option<Value> = serde_json::from_slice(raw_body).ok();

        let detail = body
            .as_ref()
            .and_then(|b| b.get("detail"))
            .and_then(|d| match d {
                Value::Null => None,
                Value::String(s) => non_empty(s).map(str::to_string),
                other => Some(other.to_string()),
            });

        let message =
            detail.unwrap_or_else(|| format!("Request failed with status code {}", status));

        ApiError::Status {
            status,
            message,
            body,
        }
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        ApiError::Decode {
            message: format!("Invalid response payload: {}", err),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest {
            message: message.into(),
        }
    }

    /// The normalized human-readable message.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Transport { message, .. }
            | ApiError::Status { message, .. }
            | ApiError::Decode { message }
            | ApiError::InvalidRequest { message }
            | ApiError::Session { message, .. } => message,
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the session (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Transport {
                cause: HttpError::Timeout(_),
                ..
            } => "E_API_TIMEOUT",
            ApiError::Transport { .. } => "E_API_TRANSPORT",
            ApiError::Status { status: 401, .. } => "E_API_UNAUTHORIZED",
            ApiError::Status { status: 403, .. } => "E_API_FORBIDDEN",
            ApiError::Status { status, .. } if *status >= 500 => "E_API_SERVER",
            ApiError::Status { .. } => "E_API_STATUS",
            ApiError::Decode { .. } => "E_API_DECODE",
            ApiError::InvalidRequest { .. } => "E_API_INVALID",
            ApiError::Session { .. } => "E_API_SESSION",
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
