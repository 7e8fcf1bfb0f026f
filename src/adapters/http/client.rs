//! Low-level HTTP client for the CareMyCar backend.
//!
//! Owns the `reqwest` client with the configured connect/read timeouts,
//! injects the bearer token from the [`TokenStore`] when one is present
//! (the header is simply omitted otherwise), and logs traffic via
//! `tracing`. Performs no retries and no status interpretation; callers
//! run responses through [`super::error::ensure_success`].

use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::domain::ApiError;
use crate::ports::TokenStore;

/// A completed HTTP exchange: status plus the raw body bytes.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decodes the body as JSON. A malformed body on a successful status is
    /// a transport-level failure and reads as a connection error.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| {
            tracing::warn!(error = %e, "failed to decode response body");
            ApiError::malformed()
        })
    }

    /// Consumes the response, returning the raw body (PDF downloads).
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }
}

/// Shared transport handle; one per app, cloned into every repository.
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    log_bodies: bool,
}

impl ApiClient {
    /// Creates a client from configuration and an injected token store.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Self {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
            log_bodies: config.log_bodies,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send("GET", path, self.client.get(self.url(path))).await
    }

    pub async fn get_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, ApiError> {
        self.send("GET", path, self.client.get(self.url(path)).query(query))
            .await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        if self.log_bodies {
            tracing::debug!(body = %json_for_log(body), "request body");
        }
        self.send("POST", path, self.client.post(self.url(path)).json(body))
            .await
    }

    /// POST without a body (lifecycle sub-path transitions).
    pub async fn post_empty(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send("POST", path, self.client.post(self.url(path))).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        if self.log_bodies {
            tracing::debug!(body = %json_for_log(body), "request body");
        }
        self.send("PATCH", path, self.client.patch(self.url(path)).json(body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send("DELETE", path, self.client.delete(self.url(path)))
            .await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse, ApiError> {
        let request = match self.tokens.get() {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        };

        tracing::debug!(method, path, "api request");

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?.to_vec();

        if self.log_bodies {
            tracing::debug!(
                method,
                path,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "api response"
            );
        } else {
            tracing::debug!(method, path, status = status.as_u16(), "api response");
        }

        Ok(ApiResponse { status, body })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn map_transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::network("Request timed out")
    } else if e.is_connect() {
        ApiError::network(format!("Connection failed: {}", e))
    } else {
        ApiError::network(e.to_string())
    }
}

fn json_for_log<B: Serialize + ?Sized>(body: &B) -> String {
    serde_json::to_string(body).unwrap_or_else(|_| "<unserializable>".to_string())
}

/// Response envelope for list endpoints (`{"items": [...]}`).
#[derive(Debug, serde::Deserialize)]
pub struct ItemsEnvelope<T> {
    #[serde(default)]
    pub items: Vec<T>,
}
