//! Login redirect abstraction.

/// Sends the user to a route, typically the login screen after the server
/// rejected the session with HTTP 401.
///
/// Called synchronously from the response path, after the stored
/// credentials have already been cleared.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}
