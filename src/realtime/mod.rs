//! Realtime WebSocket client.
//!
//! Frames in both directions are `{type, payload}` envelopes. Inbound
//! frames go to listeners registered per type; outbound frames are only
//! sent while connected.

mod client;
pub mod envelope;
pub mod listeners;

pub use client::{ConnectionState, RealtimeClient};
pub use envelope::Envelope;
pub use listeners::{Listener, ListenerId, ListenerRegistry};
