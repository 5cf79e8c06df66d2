//! HTTP client for the NexusPulse backend API
//!
//! Owns the base URL, JSON defaults, timeout, and bearer attachment. The
//! typed endpoint wrappers in this module's siblings are thin layers over
//! the generic verbs here.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use super::auth::AccessTokenProvider;
use super::errors::ApiError;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL including the path prefix (e.g. "http://localhost:5000/api")
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:5000/api".to_string(), timeout: Duration::from_secs(30) }
    }
}

/// Query parameters as name/value pairs; `None` values are skipped.
pub type QueryParams<'a> = &'a [(&'a str, Option<String>)];

/// HTTP client for backend requests
pub struct ApiClient {
    client: reqwest::Client,
    config: ApiClientConfig,
    auth: Option<Arc<dyn AccessTokenProvider>>,
}

impl ApiClient {
    /// Create a client without bearer attachment (pre-login auth endpoints)
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] when the underlying HTTP client cannot
    /// be built.
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        Self::build(config, None)
    }

    /// Create a client that attaches `Authorization: Bearer <token>` when
    /// the provider yields one
    ///
    /// # Errors
    /// Returns [`ApiError::Config`] when the underlying HTTP client cannot
    /// be built.
    pub fn with_auth(
        config: ApiClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        Self::build(config, Some(auth))
    }

    fn build(
        config: ApiClientConfig,
        auth: Option<Arc<dyn AccessTokenProvider>>,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config, auth })
    }

    /// Base URL this client targets
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Execute a GET request
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: QueryParams<'_>,
    ) -> Result<R, ApiError> {
        let request = self.request(Method::GET, path, query).await?;
        self.execute(path, request).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let request = self.request(Method::POST, path, &[]).await?.json(body);
        self.execute(path, request).await
    }

    /// Execute a bodyless POST request
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.request(Method::POST, path, &[]).await?;
        self.execute(path, request).await
    }

    /// Execute a PUT request with a JSON body
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<T: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<R, ApiError> {
        let request = self.request(Method::PUT, path, &[]).await?.json(body);
        self.execute(path, request).await
    }

    /// Execute a bodyless PUT request
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn put_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.request(Method::PUT, path, &[]).await?;
        self.execute(path, request).await
    }

    /// Execute a DELETE request
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be
    /// deserialized.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self.request(Method::DELETE, path, &[]).await?;
        self.execute(path, request).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        query: QueryParams<'_>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}{}", self.config.base_url, path);
        debug!(url = %url, method = %method, "API request");

        let mut request =
            self.client.request(method, &url).header("Content-Type", "application/json");

        let params: Vec<(&str, String)> = query
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (*name, v.clone())))
            .collect();
        if !params.is_empty() {
            request = request.query(&params);
        }

        if let Some(auth) = &self.auth {
            if let Some(token) = auth.access_token().await? {
                request = request.header("Authorization", format!("Bearer {token}"));
            }
        }

        Ok(request)
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<R, ApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.config.timeout)
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        // 204 and empty bodies deserialize to unit responses.
        let result: R = if status == StatusCode::NO_CONTENT {
            serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Client(format!(
                    "No content response from {path}, but a body was expected"
                ))
            })?
        } else {
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::Network(format!("Failed to read response: {e}")))?;
            if body.is_empty() {
                serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                    ApiError::Client(format!(
                        "Empty response from {path}, but a body was expected"
                    ))
                })?
            } else {
                serde_json::from_str(&body)
                    .map_err(|e| ApiError::Client(format!("Failed to parse response: {e}")))?
            }
        };

        debug!(path = %path, "API request successful");
        Ok(result)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("authenticated", &self.auth.is_some())
            .finish()
    }
}
