//! Login redirect for terminal use.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::warn;

use crate::traits::Navigator;

/// Navigator for the CLI: there is no page to leave, so a redirect is a
/// warning telling the user to sign in again, plus a counter the command
/// loop can poll.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    redirects: AtomicUsize,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many redirects have been requested so far.
    pub fn redirect_count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: &str) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
        warn!(route, "Session expired or rejected; sign in again (secops login)");
    }
}
