//! Mock WebSocket connector for testing.
//!
//! Every successful `connect` produces a [`MockServerConnection`]: the test's
//! view of the server end of that socket. Tests inject frames through it,
//! read what the client sent, and close or drop it to simulate the server
//! going away.

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::traits::{FrameSink, FrameStream, WebSocketConnector, WsError, WsFrame};

/// Server end of one mock connection.
#[derive(Debug)]
pub struct MockServerConnection {
    url: String,
    to_client: mpsc::UnboundedSender<Result<WsFrame, WsError>>,
    from_client: mpsc::UnboundedReceiver<String>,
}

impl MockServerConnection {
    /// URL the client connected to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Push a text frame to the client. Returns false if the client side
    /// is gone.
    pub fn send_text(&self, text: impl Into<String>) -> bool {
        self.to_client
            .unbounded_send(Ok(WsFrame::Text(text.into())))
            .is_ok()
    }

    /// Push a JSON text frame to the client.
    pub fn send_json(&self, value: &serde_json::Value) -> bool {
        self.send_text(value.to_string())
    }

    /// Push a transport error to the client.
    pub fn send_error(&self, error: WsError) -> bool {
        self.to_client.unbounded_send(Err(error)).is_ok()
    }

    /// Send a close frame and end the stream.
    pub fn close(&self) {
        let _ = self.to_client.unbounded_send(Ok(WsFrame::Close));
        self.to_client.close_channel();
    }

    /// Next frame the client sent; `None` once the client dropped its sink.
    pub async fn next_sent(&mut self) -> Option<String> {
        self.from_client.next().await
    }

    /// Next frame the client sent, without waiting.
    pub fn try_next_sent(&mut self) -> Option<String> {
        self.from_client.try_next().ok().flatten()
    }

    /// Whether the client still holds the connection open.
    pub fn is_client_connected(&self) -> bool {
        !self.to_client.is_closed()
    }
}

#[derive(Debug, Default)]
struct ConnectorState {
    urls: Vec<String>,
    fail_remaining: usize,
    accepted: VecDeque<MockServerConnection>,
}

/// Mock WebSocket connector.
///
/// # Example
///
/// ```ignore
/// use secops::adapters::mock::MockConnector;
///
/// let connector = MockConnector::new();
/// let client = RealtimeClient::new(config, session, Arc::new(connector.clone()));
/// client.connect().await?;
///
/// let mut server = connector.accept().await;
/// server.send_json(&json!({"type": "message", "payload": {"id": 1}}));
/// assert!(server.next_sent().await.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    state: Arc<Mutex<ConnectorState>>,
    accepted: Arc<Notify>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` connection attempts fail.
    pub fn fail_next(&self, count: usize) {
        self.state.lock().unwrap().fail_remaining = count;
    }

    /// Every URL a connection was attempted against, in order.
    pub fn urls(&self) -> Vec<String> {
        self.state.lock().unwrap().urls.clone()
    }

    /// Number of connection attempts, failed ones included.
    pub fn connect_count(&self) -> usize {
        self.state.lock().unwrap().urls.len()
    }

    /// Wait for the next successful connection.
    pub async fn accept(&self) -> MockServerConnection {
        loop {
            if let Some(conn) = self.try_accept() {
                return conn;
            }
            self.accepted.notified().await;
        }
    }

    /// Take the next successful connection if one is waiting.
    pub fn try_accept(&self) -> Option<MockServerConnection> {
        self.state.lock().unwrap().accepted.pop_front()
    }
}

#[async_trait]
impl WebSocketConnector for MockConnector {
    async fn connect(&self, url: &str) -> Result<(FrameSink, FrameStream), WsError> {
        let mut state = self.state.lock().unwrap();
        state.urls.push(url.to_string());

        if state.fail_remaining > 0 {
            state.fail_remaining -= 1;
            return Err(WsError::ConnectionFailed("Mock connection refused".to_string()));
        }

        let (to_client, client_rx) = mpsc::unbounded();
        let (client_tx, from_client) = mpsc::unbounded::<String>();

        state.accepted.push_back(MockServerConnection {
            url: url.to_string(),
            to_client,
            from_client,
        });
        drop(state);
        self.accepted.notify_one();

        let sink = client_tx.sink_map_err(|e| WsError::SendFailed(e.to_string()));
        Ok((Box::pin(sink), Box::pin(client_rx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_connect_records_url() {
        let connector = MockConnector::new();
        let _conn = connector.connect("ws://host/ws?token=a").await.unwrap();

        assert_eq!(connector.urls(), vec!["ws://host/ws?token=a".to_string()]);
        let server = connector.accept().await;
        assert_eq!(server.url(), "ws://host/ws?token=a");
    }

    #[tokio::test]
    async fn test_fail_next() {
        let connector = MockConnector::new();
        connector.fail_next(1);

        assert!(matches!(
            connector.connect("ws://host/ws").await,
            Err(WsError::ConnectionFailed(_))
        ));
        assert!(connector.connect("ws://host/ws").await.is_ok());
        assert_eq!(connector.connect_count(), 2);
    }

    #[tokio::test]
    async fn test_frames_flow_both_ways() {
        let connector = MockConnector::new();
        let (mut sink, mut stream) = connector.connect("ws://host/ws").await.unwrap();
        let mut server = connector.accept().await;

        server.send_text(r#"{"type":"update","payload":1}"#);
        assert_eq!(
            stream.next().await.unwrap().unwrap(),
            WsFrame::Text(r#"{"type":"update","payload":1}"#.to_string())
        );
        assert!(server.send_json(&json!({"type": "message"})));

        sink.send("hello".to_string()).await.unwrap();
        assert_eq!(server.next_sent().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_close_ends_stream() {
        let connector = MockConnector::new();
        let (_sink, mut stream) = connector.connect("ws://host/ws").await.unwrap();
        let server = connector.accept().await;

        server.close();
        assert_eq!(stream.next().await.unwrap().unwrap(), WsFrame::Close);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_client_drop_is_visible() {
        let connector = MockConnector::new();
        let (sink, stream) = connector.connect("ws://host/ws").await.unwrap();
        let server = connector.accept().await;
        assert!(server.is_client_connected());

        drop(sink);
        drop(stream);
        assert!(!server.is_client_connected());
    }
}
