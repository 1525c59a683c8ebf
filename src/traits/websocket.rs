//! WebSocket connector trait abstraction.
//!
//! The realtime client never touches a socket library directly. It asks a
//! [`WebSocketConnector`] for a connection and gets back a sink for outgoing
//! text frames and a stream of incoming frames.

use async_trait::async_trait;
use futures::{Sink, Stream};
use std::pin::Pin;

/// WebSocket transport errors.
#[derive(Debug, Clone)]
pub enum WsError {
    /// Connection failed
    ConnectionFailed(String),
    /// Disconnected from server
    Disconnected,
    /// Failed to send message
    SendFailed(String),
    /// Protocol-level error on an open socket
    Protocol(String),
}

impl std::fmt::Display for WsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WsError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            WsError::Disconnected => write!(f, "Disconnected from server"),
            WsError::SendFailed(msg) => write!(f, "Send failed: {}", msg),
            WsError::Protocol(msg) => write!(f, "Protocol error: {}", msg),
        }
    }
}

impl std::error::Error for WsError {}

/// A frame received from the server.
///
/// Control frames (ping/pong) are handled by the transport and never
/// surface here.
#[derive(Debug, Clone, PartialEq)]
pub enum WsFrame {
    /// A text frame
    Text(String),
    /// The server closed the connection
    Close,
}

/// Outgoing half of a connection: accepts serialized text frames.
pub type FrameSink = Pin<Box<dyn Sink<String, Error = WsError> + Send>>;

/// Incoming half of a connection. Ends when the socket is gone.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<WsFrame, WsError>> + Send>>;

/// Opens WebSocket connections.
///
/// # Example
///
/// ```ignore
/// use futures::{SinkExt, StreamExt};
/// use secops::traits::WebSocketConnector;
///
/// async fn echo<C: WebSocketConnector>(connector: &C) -> Result<(), WsError> {
///     let (mut sink, mut stream) = connector.connect("ws://localhost:8000/ws?token=t").await?;
///     sink.send(r#"{"type":"ping","payload":null}"#.to_string()).await?;
///     let _reply = stream.next().await;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait WebSocketConnector: Send + Sync {
    /// Open one connection to `url`.
    async fn connect(&self, url: &str) -> Result<(FrameSink, FrameStream), WsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_error_display() {
        assert_eq!(
            WsError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(WsError::Disconnected.to_string(), "Disconnected from server");
        assert_eq!(
            WsError::SendFailed("closed".to_string()).to_string(),
            "Send failed: closed"
        );
        assert_eq!(
            WsError::Protocol("reset".to_string()).to_string(),
            "Protocol error: reset"
        );
    }

    #[test]
    fn test_ws_error_clone() {
        let err = WsError::ConnectionFailed("test".to_string());
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
