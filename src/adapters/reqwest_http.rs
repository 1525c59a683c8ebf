//! Reqwest-based HTTP client adapter.
//!
//! This module provides the production HTTP client implementation using
//! reqwest, implementing the [`HttpClient`] trait from `crate::traits`.

use async_trait::async_trait;
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use secops::adapters::ReqwestHttpClient;
/// use secops::traits::{Headers, HttpClient};
///
/// let client = ReqwestHttpClient::with_timeout(Duration::from_secs(30))?;
/// let response = client.get("http://localhost:8000/api/health", &Headers::new()).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a client that aborts any request running longer than `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Self::convert_error)?;
        Ok(Self { client })
    }

    /// Convert reqwest error to HttpError.
    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    /// Convert reqwest headers to our Headers type.
    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    /// Apply headers to a request builder.
    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder;
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder
    }

    async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let mut builder = Self::apply_headers(builder, headers);
        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let response_headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(Response::with_headers(status, response_headers, body))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.execute(self.client.get(url), None, headers).await
    }

    async fn post(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.execute(self.client.post(url), body, headers).await
    }

    async fn put(
        &self,
        url: &str,
        body: Option<&str>,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        self.execute(self.client.put(url), body, headers).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.execute(self.client.delete(url), None, headers).await
    }
}
