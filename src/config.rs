//! Client configuration.
//!
//! Both clients read their endpoints from here. Values come from the
//! environment with hard-coded development fallbacks.

use std::path::PathBuf;
use std::time::Duration;

/// Default REST API base URL (development backend).
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// Default WebSocket base URL (development backend).
pub const DEFAULT_WS_URL: &str = "ws://localhost:8000";

/// Environment variable overriding the REST API base URL.
pub const API_BASE_URL_ENV: &str = "SECOPS_API_BASE_URL";

/// Environment variable overriding the WebSocket base URL.
pub const WS_URL_ENV: &str = "SECOPS_WS_URL";

/// Environment variable overriding the session file location.
pub const SESSION_FILE_ENV: &str = "SECOPS_SESSION_FILE";

/// Per-request timeout applied to every HTTP call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Route the user is sent to when the server rejects the session.
pub const LOGIN_ROUTE: &str = "/login";

const SESSION_DIR: &str = ".secops";
const SESSION_FILE: &str = "session.json";

/// Configuration shared by the API and realtime clients.
///
/// # Example
///
/// ```
/// use secops::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_api_base_url("http://10.0.0.5:8000/api/")
///     .with_max_reconnect_attempts(3);
/// assert_eq!(config.api_base_url, "http://10.0.0.5:8000/api");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST API base URL, without trailing slash
    pub api_base_url: String,
    /// WebSocket base URL, without trailing slash
    pub ws_base_url: String,
    /// Timeout for a single HTTP request
    pub request_timeout: Duration,
    /// Route handed to the navigator on HTTP 401
    pub login_route: String,
    /// Reconnect ceiling for the realtime client
    pub max_reconnect_attempts: u32,
    /// Base reconnect delay, multiplied by the attempt number
    pub reconnect_delay: Duration,
    /// Location of the persisted session file
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            ws_base_url: DEFAULT_WS_URL.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            login_route: LOGIN_ROUTE.to_string(),
            max_reconnect_attempts: 5,
            reconnect_delay: Duration::from_millis(1000),
            session_file: default_session_file(),
        }
    }
}

impl ClientConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from `SECOPS_API_BASE_URL`, `SECOPS_WS_URL` and
    /// `SECOPS_SESSION_FILE`, falling back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = non_empty_env(API_BASE_URL_ENV) {
            config = config.with_api_base_url(url);
        }
        if let Some(url) = non_empty_env(WS_URL_ENV) {
            config = config.with_ws_base_url(url);
        }
        if let Some(path) = non_empty_env(SESSION_FILE_ENV) {
            config = config.with_session_file(PathBuf::from(path));
        }

        config
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = trim_base(url.into());
        self
    }

    pub fn with_ws_base_url(mut self, url: impl Into<String>) -> Self {
        self.ws_base_url = trim_base(url.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    pub fn with_max_reconnect_attempts(mut self, attempts: u32) -> Self {
        self.max_reconnect_attempts = attempts;
        self
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn with_session_file(mut self, path: PathBuf) -> Self {
        self.session_file = Some(path);
        self
    }
}

/// `~/.secops/session.json`, or `None` without a home directory.
pub fn default_session_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(SESSION_DIR).join(SESSION_FILE))
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
