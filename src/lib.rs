//! secops - client for the security-operations console backend
//!
//! This library exposes the HTTP API client, the realtime WebSocket client
//! and the session accessor they share. The `secops` binary is a thin CLI
//! on top of these modules.

pub mod adapters;
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod realtime;
pub mod traits;

pub use api::ApiClient;
pub use auth::{AuthFlow, SessionManager, UserProfile};
pub use config::ClientConfig;
pub use error::{ApiError, RealtimeError};
pub use realtime::{ConnectionState, RealtimeClient};
