//! Common test utilities for integration tests.
//!
//! Builds clients wired to the real adapters (reqwest, tokio-tungstenite,
//! file-backed session) against local servers, with the login redirect
//! recorded instead of acted on.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::handshake::server::{Request, Response};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use secops::adapters::mock::RecordingNavigator;
use secops::adapters::{FileSessionStore, TungsteniteConnector};
use secops::{ApiClient, AuthFlow, ClientConfig, RealtimeClient, SessionManager};

/// Upper bound for anything a test waits on.
pub const WAIT: Duration = Duration::from_secs(5);

/// Clients sharing one session file in a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
    pub config: ClientConfig,
    pub session: SessionManager,
    pub navigator: RecordingNavigator,
}

impl Fixture {
    pub fn new(config: ClientConfig) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let config = config.with_session_file(path.clone());
        let session = SessionManager::new(Arc::new(FileSessionStore::new(path)));
        Self {
            dir,
            config,
            session,
            navigator: RecordingNavigator::new(),
        }
    }

    pub fn api(&self) -> ApiClient {
        ApiClient::from_config(&self.config, self.session.clone(), Arc::new(self.navigator.clone()))
            .unwrap()
    }

    pub fn auth(&self) -> AuthFlow {
        AuthFlow::new(self.api())
    }

    pub fn realtime(&self) -> RealtimeClient {
        RealtimeClient::new(
            &self.config,
            self.session.clone(),
            Arc::new(TungsteniteConnector::new()),
        )
    }

    /// Raw contents of the session file, or an empty object.
    pub fn session_file(&self) -> Value {
        let path = self.config.session_file.as_ref().unwrap();
        match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap(),
            Err(_) => Value::Object(Default::default()),
        }
    }
}

/// Minimal profile JSON as the backend returns it.
pub fn user_json(username: &str) -> Value {
    serde_json::json!({
        "id": 7,
        "username": username,
        "email": format!("{}@soc.example", username),
        "full_name": "Alice Analyst",
        "role": "analyst",
        "is_active": true,
        "is_superuser": false
    })
}

/// One accepted server-side socket.
pub struct ServerSocket {
    /// Request target of the upgrade, e.g. `/ws?token=abc`
    pub uri: String,
    pub socket: WebSocketStream<TcpStream>,
}

impl ServerSocket {
    pub async fn send_text(&mut self, text: &str) {
        use futures::SinkExt;
        self.socket.send(Message::Text(text.to_string())).await.unwrap();
    }

    /// Next text frame from the client; `None` once the client is gone.
    pub async fn next_text(&mut self) -> Option<String> {
        loop {
            match tokio::time::timeout(WAIT, self.socket.next()).await.ok()?? {
                Ok(Message::Text(text)) => return Some(text),
                Ok(Message::Close(_)) | Err(_) => return None,
                Ok(_) => continue,
            }
        }
    }
}

/// Local WebSocket server handing every accepted socket to the test.
pub struct WsServer {
    pub base_url: String,
    accepted: mpsc::UnboundedReceiver<ServerSocket>,
}

impl WsServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("ws://{}", listener.local_addr().unwrap());
        let (tx, accepted) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let mut uri = String::new();
                let handshake = tokio_tungstenite::accept_hdr_async(
                    stream,
                    |req: &Request, resp: Response| {
                        uri = req.uri().to_string();
                        Ok(resp)
                    },
                )
                .await;
                if let Ok(socket) = handshake {
                    if tx.send(ServerSocket { uri, socket }).is_err() {
                        break;
                    }
                }
            }
        });

        Self { base_url, accepted }
    }

    pub async fn accept(&mut self) -> ServerSocket {
        tokio::time::timeout(WAIT, self.accepted.recv())
            .await
            .expect("no connection within timeout")
            .expect("server stopped")
    }

    /// Wait `window` for a connection that should not come.
    pub async fn expect_no_connection(&mut self, window: Duration) {
        if let Ok(Some(socket)) = tokio::time::timeout(window, self.accepted.recv()).await {
            panic!("unexpected connection to {}", socket.uri);
        }
    }
}
