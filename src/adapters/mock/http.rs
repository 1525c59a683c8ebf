//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors for testing purposes.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method (GET, POST, PUT or DELETE)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body, if one was sent
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Parse the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_str(body).ok())
    }

    /// The `Authorization` header, if any.
    pub fn authorization(&self) -> Option<&str> {
        self.headers.get("Authorization").map(String::as_str)
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

impl MockResponse {
    /// A response with a JSON body.
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        MockResponse::Success(Response::json_body(status, &value))
    }

    /// A response with an empty body.
    pub fn empty(status: u16) -> Self {
        MockResponse::Success(Response::new(status, Bytes::new()))
    }
}

/// Mock HTTP client for testing.
///
/// Responses are keyed by `"METHOD url"`. Lookup tries an exact match
/// first, then the longest matching prefix, then the default response.
///
/// # Example
///
/// ```ignore
/// use secops::adapters::mock::{MockHttpClient, MockResponse};
/// use serde_json::json;
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "GET",
///     "http://api/health",
///     MockResponse::json(200, json!({"status": "ok"})),
/// );
///
/// let response = client.get("http://api/health", &Headers::new()).await?;
/// assert_eq!(response.status, 200);
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by method and URL pattern
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn key(method: &str, url: &str) -> String {
        format!("{} {}", method, url)
    }

    /// Set a response for a method and URL.
    pub fn set_response(&self, method: &str, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(Self::key(method, url), response);
    }

    /// Set a default response for requests without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, method: &str, url: &str, headers: &Headers, body: Option<&str>) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(str::to_string),
        });
    }

    fn get_response(&self, method: &str, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();
        let key = Self::key(method, url);

        if let Some(response) = responses.get(&key) {
            return Some(response.clone());
        }

        let prefix_match = responses
            .iter()
            .filter(|(pattern, _)| key.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if prefix_match.is_some() {
            return prefix_match;
        }

        self.default_response.lock().unwrap().clone()
    }

    fn respond(
        &self,
        method: &str,
        url: &str,
        headers: &Headers,
        body: Option<&str>,
    ) -> Result<Response, HttpError> {
        self.record_request(method, url, headers, body);

        match self.get_response(method, url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for {} {}",
                method, url
            ))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.respond("GET", url, headers, None)
    }

    async fn post(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.respond("POST", url, headers, body)
    }

    async fn put(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.respond("PUT", url, headers, body)
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.respond("DELETE", url, headers, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response(
            "GET",
            "https://example.com/test",
            MockResponse::Success(Response::new(200, Bytes::from("Hello"))),
        );

        let response = client
            .get("https://example.com/test", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Bytes::from("Hello"));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, "https://example.com/test");
    }

    #[tokio::test]
    async fn test_method_is_part_of_key() {
        let client = MockHttpClient::new();
        client.set_response("POST", "https://example.com/a", MockResponse::empty(201));

        let result = client.get("https://example.com/a", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));

        let response = client
            .post("https://example.com/a", Some("{}"), &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(client.last_request().unwrap().body.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_transport_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "GET",
            "https://example.com/down",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        let result = client.get("https://example.com/down", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_response("GET", "https://example.com/api", MockResponse::empty(200));
        client.set_response(
            "GET",
            "https://example.com/api/reports",
            MockResponse::json(200, json!({"reports": []})),
        );

        let response = client
            .get("https://example.com/api/reports/r1", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.json::<serde_json::Value>().unwrap(), json!({"reports": []}));
    }

    #[tokio::test]
    async fn test_default_response() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::empty(404));

        let response = client
            .delete("https://example.com/anything", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_headers_recorded() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::empty(200));

        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), "Bearer token123".to_string());
        client.get("https://example.com/auth", &headers).await.unwrap();

        let request = client.last_request().unwrap();
        assert_eq!(request.authorization(), Some("Bearer token123"));
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::empty(200));

        let cloned = client.clone();
        cloned
            .put("https://example.com", Some(r#"{"a":1}"#), &Headers::new())
            .await
            .unwrap();

        assert_eq!(client.get_requests().len(), 1);
        assert_eq!(client.get_requests()[0].json_body(), Some(json!({"a": 1})));

        client.clear_requests();
        assert!(cloned.get_requests().is_empty());
    }
}
