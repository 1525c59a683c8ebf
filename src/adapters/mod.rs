//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`TungsteniteConnector`] - WebSocket using tokio-tungstenite
//! - [`FileSessionStore`] - JSON file session storage
//! - [`ConsoleNavigator`] - login redirect for terminal use
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for all adapters:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::MockConnector`] - Scriptable WebSocket server side
//! - [`mock::InMemorySessionStore`] - In-memory session storage
//! - [`mock::RecordingNavigator`] - Records redirects

pub mod console_navigator;
pub mod file_session;
pub mod mock;
pub mod reqwest_http;
pub mod tungstenite_ws;

pub use console_navigator::ConsoleNavigator;
pub use file_session::FileSessionStore;
pub use mock::{InMemorySessionStore, MockConnector, MockHttpClient, RecordingNavigator};
pub use reqwest_http::ReqwestHttpClient;
pub use tungstenite_ws::TungsteniteConnector;
