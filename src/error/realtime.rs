//! Realtime client error type.

use thiserror::Error;

use crate::traits::{SessionStoreError, WsError};

/// Error returned by [`crate::RealtimeClient`] operations.
///
/// Only explicit calls return these. Failures inside the connection task
/// (malformed frames, dropped sockets) are logged and handled there.
#[derive(Debug, Clone, Error)]
pub enum RealtimeError {
    /// No bearer token is stored, so the socket cannot authenticate.
    #[error("No auth token found for WebSocket connection")]
    MissingCredentials,

    /// The session store could not be read.
    #[error("Session unavailable: {0}")]
    Session(#[from] SessionStoreError),

    /// The socket could not be opened.
    #[error("Failed to create WebSocket connection: {0}")]
    ConnectionFailed(#[from] WsError),

    /// A send was attempted while not connected. The message was dropped.
    #[error("WebSocket is not connected")]
    NotConnected,

    /// The outgoing envelope could not be serialized.
    #[error("Failed to encode message: {0}")]
    Encode(String),
}

impl RealtimeError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            RealtimeError::MissingCredentials => "E_RT_NO_TOKEN",
            RealtimeError::Session(_) => "E_RT_SESSION",
            RealtimeError::ConnectionFailed(_) => "E_RT_CONN",
            RealtimeError::NotConnected => "E_RT_NOT_CONNECTED",
            RealtimeError::Encode(_) => "E_RT_ENCODE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            RealtimeError::MissingCredentials.to_string(),
            "No auth token found for WebSocket connection"
        );
        assert_eq!(
            RealtimeError::NotConnected.to_string(),
            "WebSocket is not connected"
        );
        let err: RealtimeError = WsError::ConnectionFailed("refused".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Failed to create WebSocket connection: Connection failed: refused"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(RealtimeError::MissingCredentials.error_code(), "E_RT_NO_TOKEN");
        assert_eq!(RealtimeError::NotConnected.error_code(), "E_RT_NOT_CONNECTED");
        assert_eq!(
            RealtimeError::from(SessionStoreError::LoadFailed("x".into())).error_code(),
            "E_RT_SESSION"
        );
    }
}
