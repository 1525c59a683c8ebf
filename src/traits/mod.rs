//! Trait abstractions for dependency injection and testability.
//!
//! Every piece of I/O the clients perform goes through one of these traits,
//! so tests can substitute in-memory doubles for the network, the session
//! storage and the login redirect.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, PUT, DELETE)
//! - [`WebSocketConnector`] - opens realtime sockets
//! - [`SessionStore`] - persistent key/value session storage
//! - [`Navigator`] - sends the user to the login route

pub mod http;
pub mod navigator;
pub mod session;
pub mod websocket;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use navigator::Navigator;
pub use session::{SessionStore, SessionStoreError};
pub use websocket::{FrameSink, FrameStream, WebSocketConnector, WsError, WsFrame};
