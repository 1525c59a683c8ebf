//! Reconnecting realtime client.
//!
//! One [`RealtimeClient`] owns at most one live socket. A background task
//! per connection reads frames and dispatches them to listeners, and writes
//! queued outgoing frames. When the socket goes away the client retries with
//! linear backoff (`reconnect_delay * attempt`) up to
//! `max_reconnect_attempts`, unless the close was requested via
//! [`RealtimeClient::disconnect`].
//!
//! Every connection and every scheduled reconnect carries the generation it
//! was started under. `connect` and `disconnect` bump the generation, which
//! turns any older connection task or pending timer into a no-op.

use futures::{SinkExt, StreamExt};
use serde::Serialize;
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use super::envelope::{Envelope, SUBSCRIBE, UNSUBSCRIBE};
use super::listeners::{ListenerId, ListenerRegistry};
use crate::auth::SessionManager;
use crate::config::ClientConfig;
use crate::error::RealtimeError;
use crate::traits::{FrameSink, FrameStream, WebSocketConnector, WsError, WsFrame};

/// Connection state of the realtime client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// A reconnect is scheduled; `attempt` counts from 1.
    Reconnecting { attempt: u32 },
}

#[derive(Debug, Default)]
struct Inner {
    attempts: u32,
    intentional_close: bool,
    generation: u64,
    outgoing: Option<mpsc::UnboundedSender<String>>,
    shutdown: Option<oneshot::Sender<()>>,
}

struct Shared {
    ws_base_url: String,
    max_attempts: u32,
    base_delay: Duration,
    connector: Arc<dyn WebSocketConnector>,
    session: SessionManager,
    listeners: ListenerRegistry,
    state_tx: watch::Sender<ConnectionState>,
    inner: Mutex<Inner>,
}

/// Realtime publish/subscribe client.
///
/// Construct one and share clones; all clones drive the same socket and
/// listener table.
///
/// # Example
///
/// ```ignore
/// let client = RealtimeClient::new(&config, session, Arc::new(TungsteniteConnector::new()));
/// client.on("update", |payload| println!("update: {}", payload));
/// client.connect().await?;
/// client.subscribe("alerts")?;
/// ```
#[derive(Clone)]
pub struct RealtimeClient {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for RealtimeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeClient")
            .field("ws_base_url", &self.shared.ws_base_url)
            .field("state", &self.connection_state())
            .field("listeners", &self.shared.listeners)
            .finish()
    }
}

impl RealtimeClient {
    pub fn new(
        config: &ClientConfig,
        session: SessionManager,
        connector: Arc<dyn WebSocketConnector>,
    ) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            shared: Arc::new(Shared {
                ws_base_url: config.ws_base_url.trim_end_matches('/').to_string(),
                max_attempts: config.max_reconnect_attempts,
                base_delay: config.reconnect_delay,
                connector,
                session,
                listeners: ListenerRegistry::new(),
                state_tx,
                inner: Mutex::new(Inner::default()),
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.shared
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: ConnectionState) {
        self.shared.state_tx.send_replace(state);
    }

    /// Subscribe to state changes.
    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state_tx.subscribe()
    }

    pub fn connection_state(&self) -> ConnectionState {
        *self.shared.state_tx.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }

    /// `<ws_base>/ws?token=<token>`
    pub fn endpoint(&self, token: &str) -> String {
        format!(
            "{}/ws?token={}",
            self.shared.ws_base_url,
            urlencoding::encode(token)
        )
    }

    /// Open the socket.
    ///
    /// Does nothing if a socket is already open. If one is being opened,
    /// waits for that attempt and reports its outcome. Fails with
    /// [`RealtimeError::MissingCredentials`] when no token is stored. If the
    /// socket cannot be opened a reconnect is scheduled and the error is
    /// returned.
    pub async fn connect(&self) -> Result<(), RealtimeError> {
        match self.connection_state() {
            ConnectionState::Connected => {
                debug!("WebSocket already connected");
                return Ok(());
            }
            ConnectionState::Connecting => return self.await_pending_open().await,
            _ => {}
        }

        let Some(token) = self.shared.session.token().await? else {
            error!("No auth token found for WebSocket connection");
            return Err(RealtimeError::MissingCredentials);
        };

        let generation = {
            let mut inner = self.inner();
            match self.connection_state() {
                ConnectionState::Connected | ConnectionState::Connecting => None,
                _ => {
                    inner.intentional_close = false;
                    inner.generation += 1;
                    self.set_state(ConnectionState::Connecting);
                    Some(inner.generation)
                }
            }
        };

        match generation {
            Some(generation) => self.open(generation, &token).await,
            None => self.await_pending_open().await,
        }
    }

    /// Wait for an open already in flight to settle.
    async fn await_pending_open(&self) -> Result<(), RealtimeError> {
        debug!("WebSocket connection already in progress; waiting for it");
        let mut state = self.state();
        let settled = state
            .wait_for(|s| *s != ConnectionState::Connecting)
            .await
            .map(|s| *s);
        match settled {
            Ok(ConnectionState::Connected) => Ok(()),
            _ => Err(RealtimeError::ConnectionFailed(WsError::ConnectionFailed(
                "pending connection attempt did not succeed".to_string(),
            ))),
        }
    }

    async fn open(&self, generation: u64, token: &str) -> Result<(), RealtimeError> {
        let url = self.endpoint(token);
        debug!("Opening WebSocket connection to {}/ws", self.shared.ws_base_url);

        let (sink, stream) = match self.shared.connector.connect(&url).await {
            Ok(pair) => pair,
            Err(e) => {
                error!("Failed to create WebSocket connection: {}", e);
                self.handle_close(generation);
                return Err(RealtimeError::ConnectionFailed(e));
            }
        };

        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        {
            let mut inner = self.inner();
            if inner.generation != generation || inner.intentional_close {
                debug!("Connection superseded while opening; dropping it");
                return Ok(());
            }
            inner.attempts = 0;
            inner.outgoing = Some(outgoing_tx);
            inner.shutdown = Some(shutdown_tx);
            self.set_state(ConnectionState::Connected);
        }

        info!("WebSocket connected");
        let client = self.clone();
        tokio::spawn(async move {
            client
                .run_connection(generation, sink, stream, outgoing_rx, shutdown_rx)
                .await;
        });
        Ok(())
    }

    async fn run_connection(
        self,
        generation: u64,
        mut sink: FrameSink,
        mut stream: FrameStream,
        mut outgoing_rx: mpsc::UnboundedReceiver<String>,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                frame = stream.next() => match frame {
                    Some(Ok(WsFrame::Text(text))) => self.dispatch_frame(&text),
                    Some(Ok(WsFrame::Close)) => {
                        info!("WebSocket closed by server");
                        break;
                    }
                    Some(Err(e)) => {
                        error!("WebSocket error: {}", e);
                        break;
                    }
                    None => {
                        info!("WebSocket stream ended");
                        break;
                    }
                },
                outgoing = outgoing_rx.recv() => match outgoing {
                    Some(text) => {
                        if let Err(e) = sink.send(text).await {
                            error!("Failed to send WebSocket frame: {}", e);
                            break;
                        }
                    }
                    None => break,
                },
                _ = &mut shutdown_rx => {
                    debug!("Closing WebSocket on request");
                    let _ = sink.close().await;
                    return;
                }
            }
        }

        let _ = sink.close().await;
        self.handle_close(generation);
    }

    fn dispatch_frame(&self, text: &str) {
        match Envelope::parse(text) {
            Ok(envelope) => {
                let called = self
                    .shared
                    .listeners
                    .dispatch(&envelope.message_type, &envelope.payload);
                debug!("Dispatched '{}' to {} listener(s)", envelope.message_type, called);
            }
            Err(e) => warn!("Dropping malformed WebSocket frame: {}", e),
        }
    }

    /// React to the loss of the socket started under `generation`.
    fn handle_close(&self, generation: u64) {
        let mut inner = self.inner();
        if inner.generation != generation {
            return;
        }
        inner.outgoing = None;
        inner.shutdown = None;
        self.set_state(ConnectionState::Disconnected);

        if inner.intentional_close {
            debug!("WebSocket closed intentionally; not reconnecting");
            return;
        }

        if inner.attempts < self.shared.max_attempts {
            inner.attempts += 1;
            let attempt = inner.attempts;
            let delay = self.shared.base_delay * attempt;
            self.set_state(ConnectionState::Reconnecting { attempt });
            drop(inner);
            info!(
                "Reconnecting in {:?} (attempt {}/{})",
                delay, attempt, self.shared.max_attempts
            );
            self.schedule_reconnect(generation, delay);
        } else {
            error!("Max reconnection attempts reached");
        }
    }

    fn schedule_reconnect(&self, generation: u64, delay: Duration) {
        let client = self.clone();
        let task: Pin<Box<dyn Future<Output = ()> + Send>> = Box::pin(async move {
            tokio::time::sleep(delay).await;
            client.reconnect(generation).await;
        });
        tokio::spawn(task);
    }

    async fn reconnect(&self, generation: u64) {
        {
            let inner = self.inner();
            if inner.generation != generation || inner.intentional_close {
                debug!("Scheduled reconnect cancelled");
                return;
            }
            self.set_state(ConnectionState::Connecting);
        }

        let token = match self.shared.session.token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                error!("No auth token found for WebSocket connection; giving up reconnect");
                self.abandon(generation);
                return;
            }
            Err(e) => {
                error!("Session unavailable during reconnect: {}", e);
                self.abandon(generation);
                return;
            }
        };

        if let Err(e) = self.open(generation, &token).await {
            debug!("Reconnect attempt failed [{}]", e.error_code());
        }
    }

    fn abandon(&self, generation: u64) {
        let inner = self.inner();
        if inner.generation == generation {
            self.set_state(ConnectionState::Disconnected);
        }
    }

    /// Close the socket and stop reconnecting, including any reconnect that
    /// is already scheduled. A later [`connect`](Self::connect) starts over.
    pub fn disconnect(&self) {
        let mut inner = self.inner();
        inner.intentional_close = true;
        inner.generation += 1;
        inner.outgoing = None;
        if let Some(shutdown) = inner.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.set_state(ConnectionState::Disconnected);
        info!("WebSocket disconnected");
    }

    /// Register a listener for inbound messages of `message_type`.
    pub fn on<F>(&self, message_type: &str, callback: F) -> ListenerId
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.shared.listeners.add(message_type, Arc::new(callback))
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn off(&self, message_type: &str, id: ListenerId) -> bool {
        self.shared.listeners.remove(message_type, id)
    }

    /// Send `{type, payload}`.
    ///
    /// Only works while connected. Otherwise the message is dropped, logged,
    /// and [`RealtimeError::NotConnected`] returned. Nothing is queued for
    /// later.
    pub fn send<P: Serialize + ?Sized>(
        &self,
        message_type: &str,
        payload: &P,
    ) -> Result<(), RealtimeError> {
        let inner = self.inner();
        let outgoing = match (&inner.outgoing, self.connection_state()) {
            (Some(tx), ConnectionState::Connected) => tx,
            _ => {
                error!("WebSocket is not connected; dropping '{}' message", message_type);
                return Err(RealtimeError::NotConnected);
            }
        };

        let payload =
            serde_json::to_value(payload).map_err(|e| RealtimeError::Encode(e.to_string()))?;
        let text = Envelope::new(message_type, payload)
            .to_json()
            .map_err(|e| RealtimeError::Encode(e.to_string()))?;

        outgoing.send(text).map_err(|_| {
            error!("WebSocket is not connected; dropping '{}' message", message_type);
            RealtimeError::NotConnected
        })
    }

    pub fn subscribe(&self, channel: &str) -> Result<(), RealtimeError> {
        self.send(SUBSCRIBE, &json!({ "channel": channel }))
    }

    pub fn unsubscribe(&self, channel: &str) -> Result<(), RealtimeError> {
        self.send(UNSUBSCRIBE, &json!({ "channel": channel }))
    }
}
