//! Error types for the API and realtime clients.
//!
//! | Error | Raised by | Surfaced to caller |
//! |-------|-----------|--------------------|
//! | [`ApiError::Transport`] | network failure, no response | yes |
//! | [`ApiError::Status`] | non-2xx response (401 also logs out) | yes |
//! | [`ApiError::Decode`] | 2xx with unexpected body | yes |
//! | [`ApiError::InvalidRequest`] | arguments rejected before I/O | yes |
//! | [`ApiError::Session`] | session storage around a call | yes |
//! | [`RealtimeError`] | `connect` / `send` on the realtime client | yes |
//! | malformed realtime frame | connection task | no, logged |
//! | realtime connection loss | connection task | no, logged + reconnect |

mod api;
mod realtime;

pub use api::{ApiError, FALLBACK_MESSAGE};
pub use realtime::RealtimeError;
