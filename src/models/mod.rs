//! Request and response bodies exchanged with the console backend.
//!
//! Only the shapes the client actually inspects are typed. Everything the
//! backend returns as free-form data (audit history, investigations, user
//! lists) stays a `serde_json::Value`.

mod admin;
mod auth;
mod blockchain;
mod chat;
mod health;
mod reports;

pub use admin::RoleUpdate;
pub use auth::{LoginRequest, SignupRequest, TokenResponse};
pub use blockchain::VerifyRequest;
pub use chat::{
    ChatHistory, ChatMessage, ChatQueryRequest, ChatQueryResponse, MessageType, QueryIntent,
};
pub use health::HealthStatus;
pub use reports::{ReportRequest, ReportResponse, ReportType};
