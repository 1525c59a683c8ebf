//! REST API client and its endpoint groups.
//!
//! [`ApiClient`] owns the request pipeline. The endpoint groups are thin
//! borrowed views over it, one per backend area:
//!
//! ```ignore
//! let user = client.auth().current_user().await?;
//! let answer = client.chat().send_message("failed logins today", &session_id, None).await?;
//! ```

mod admin;
mod ai_analysis;
mod auth;
mod blockchain;
mod chat;
mod client;
mod collaboration;
mod health;
mod reports;

pub use admin::AdminApi;
pub use ai_analysis::AiAnalysisApi;
pub use auth::AuthApi;
pub use blockchain::BlockchainApi;
pub use chat::{ChatApi, DEFAULT_HISTORY_LIMIT};
pub use client::ApiClient;
pub use collaboration::CollaborationApi;
pub use health::HealthApi;
pub use reports::ReportsApi;

pub(crate) use client::segment;
