//! Mock implementations for testing.
//!
//! This module provides mock implementations of all trait abstractions,
//! enabling unit testing without network dependencies or file system access.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockConnector`] - WebSocket connector with a scriptable server side
//! - [`InMemorySessionStore`] - In-memory session storage
//! - [`RecordingNavigator`] - Navigator that records redirects

pub mod http;
pub mod navigator;
pub mod session;
pub mod websocket;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use navigator::RecordingNavigator;
pub use session::InMemorySessionStore;
pub use websocket::{MockConnector, MockServerConnection};
