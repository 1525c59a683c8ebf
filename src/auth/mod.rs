//! Authentication and session state.
//!
//! - [`SessionManager`] is the single owner of the persisted token, user
//!   profile and chat session id.
//! - [`AuthFlow`] drives sign-in, session restore and sign-out against the
//!   API.
//! - [`token`] decodes bearer JWTs for expiry checks.

pub mod flow;
pub mod profile;
pub mod session;
pub mod token;

pub use flow::AuthFlow;
pub use profile::UserProfile;
pub use session::{SessionManager, AUTH_TOKEN_KEY, SESSION_ID_KEY, USER_DATA_KEY};
