//! HTTP client trait abstraction.
//!
//! Provides a trait-based abstraction for HTTP operations, enabling
//! dependency injection and mocking in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
///
/// Any status code the server produced lands here; only failures to get a
/// response at all are reported as [`HttpError`].
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// Response body
    pub body: Bytes,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    /// Create a new response with headers.
    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a response with a JSON body.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::with_headers(status, headers, Bytes::from(value.to_string()))
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as a string.
    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP transport errors (no response was received).
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Request was cancelled
    Cancelled,
    /// IO error
    Io(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl HttpError {
    /// The underlying transport message, without the variant prefix.
    ///
    /// Empty when the transport gave no detail.
    pub fn transport_message(&self) -> &str {
        match self {
            HttpError::ConnectionFailed(msg)
            | HttpError::Timeout(msg)
            | HttpError::Io(msg)
            | HttpError::InvalidUrl(msg)
            | HttpError::Other(msg) => msg,
            HttpError::Cancelled => "Request cancelled",
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::Cancelled => write!(f, "Request cancelled"),
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// Implementations include the production reqwest-based client and the
/// recording mock used in tests.
///
/// # Example
///
/// ```ignore
/// use secops::traits::{HttpClient, Headers, HttpError};
///
/// async fn ping<C: HttpClient>(client: &C) -> Result<u16, HttpError> {
///     let response = client.get("http://localhost:8000/api/health", &Headers::new()).await?;
///     Ok(response.status)
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// Perform a POST request. `body` is `None` for body-less posts.
    async fn post(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError>;

    /// Perform a PUT request.
    async fn put(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError>;

    /// Perform a DELETE request.
    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;
}
