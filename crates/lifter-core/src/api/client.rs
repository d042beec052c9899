//! API client for communicating with the Lifter REST API.
//!
//! This module provides the `LifterClient` struct and the request plumbing
//! shared by the athlete, competition, session and lift operations. Read
//! operations are anonymous; anything that writes needs a refresh token.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::TokenManager;
use crate::config::{Config, DEFAULT_TIMEOUT_SECS};
use crate::models::Page;

use super::guard::ResourceRefs;
use super::ApiError;

/// API client for the Lifter API.
///
/// Each instance owns its credentials; two clients never share a cached
/// access token.
pub struct LifterClient {
    client: Client,
    base_url: String,
    version: String,
    tokens: TokenManager,
}

impl LifterClient {
    /// Create a client without touching the network.
    pub fn new(
        base_url: impl Into<String>,
        version: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Result<Self> {
        Self::with_timeout(base_url, version, refresh_token, DEFAULT_TIMEOUT_SECS)
    }

    fn with_timeout(
        base_url: impl Into<String>,
        version: impl Into<String>,
        refresh_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            tokens: TokenManager::new(client.clone(), base_url.clone(), refresh_token),
            client,
            base_url,
            version: version.into(),
        })
    }

    /// Create a client from loaded configuration, without touching the network.
    pub fn from_config(config: &Config, refresh_token: Option<String>) -> Result<Self> {
        Self::with_timeout(
            config.base_url(),
            config.version.clone(),
            refresh_token,
            config.timeout_secs,
        )
    }

    /// Create a client and make sure it can be used: the versioned API root
    /// must answer, and a supplied refresh token must yield an access token.
    pub async fn connect(
        base_url: impl Into<String>,
        version: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Result<Self> {
        let client = Self::new(base_url, version, refresh_token)?;
        client.ready().await?;
        Ok(client)
    }

    /// Probe the API root and, when credentials are configured, obtain an
    /// access token up front.
    pub async fn ready(&self) -> Result<()> {
        self.check_api().await?;
        if self.tokens.has_refresh_token() {
            self.tokens.obtain_access_token().await?;
        }
        Ok(())
    }

    /// `GET {base}/{version}`; any non-2xx means the URL or version is wrong.
    pub async fn check_api(&self) -> Result<()> {
        let url = format!("{}/{}", self.base_url, self.version);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to reach API at {}", url))?;
        Self::check_response(response)
            .await
            .with_context(|| format!("API not available at {}", url))?;
        debug!(url = %url, "API root reachable");
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// `{base}/{version}/{path}`
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.version, path)
    }

    /// Check if response is successful, returning an error with body if not.
    pub(crate) async fn check_response(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Anonymous request.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Fail with `TokenNotProvided` before any lookup a write would make.
    pub(crate) fn require_credentials(&self) -> Result<(), ApiError> {
        if self.tokens.has_refresh_token() {
            Ok(())
        } else {
            Err(ApiError::TokenNotProvided)
        }
    }

    /// Request carrying a confirmed-valid bearer token.
    pub(crate) async fn authenticated(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let headers = self.auth_headers().await?;
        Ok(self.client.request(method, url).headers(headers))
    }

    async fn auth_headers(&self) -> Result<header::HeaderMap> {
        self.tokens.authorization_header().await
    }

    /// Send a request and parse a successful JSON response.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send {} request", what))?;
        let response = Self::check_response(response).await?;
        debug!(what, status = %response.status(), "Response received");
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {} response", what))
    }

    /// Send a request whose successful response body is not needed.
    pub(crate) async fn execute(&self, request: RequestBuilder, what: &str) -> Result<()> {
        let response = request
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send {} request", what))?;
        let response = Self::check_response(response).await?;
        debug!(what, status = %response.status(), "Response received");
        Ok(())
    }

    /// Turn a bare 404 into a message naming the referenced resources that
    /// are missing. Other errors pass through untouched.
    pub(crate) async fn explain_not_found(&self, err: anyhow::Error, refs: ResourceRefs<'_>) -> anyhow::Error {
        if !is_not_found(&err) {
            return err;
        }
        match self.missing_resources(&refs).await {
            Ok(Some(detail)) => ApiError::NotFound(detail).into(),
            Ok(None) => err,
            Err(guard_err) => {
                warn!(error = %guard_err, "Existence check after 404 failed");
                err
            }
        }
    }

    /// Follow a `next`/`previous` URL from a previously fetched page.
    pub async fn next_page<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>> {
        self.fetch(self.request(Method::GET, url), "page").await
    }
}

/// Whether `err` is (or wraps) a 404 from the API.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ApiError>()
        .map(ApiError::is_not_found)
        .unwrap_or(false)
}
