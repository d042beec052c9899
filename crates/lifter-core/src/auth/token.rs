//! Access-token lifecycle: verify the cached token, refresh it from the
//! long-lived refresh token when it is missing or rejected.
//!
//! Every authenticated request goes through [`TokenManager::authorization_header`],
//! which costs one verify call when a token is cached and still good, and one
//! refresh call when no token has been cached yet or the server says it is no
//! longer valid.

use anyhow::{Context, Result};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::ApiError;

/// Path of the token verification endpoint, relative to the base URL
const VERIFY_PATH: &str = "api/token/verify";

/// Path of the token refresh endpoint. The trailing slash is required.
const REFRESH_PATH: &str = "api/token/refresh/";

/// `code` value the verify endpoint returns for an expired or forged token
const TOKEN_NOT_VALID: &str = "token_not_valid";

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Owns one client's credentials.
///
/// `refresh_token` never changes after construction. The access token is
/// only ever written by a successful refresh and sits behind an async mutex
/// that is held for the whole verify/refresh pass, so concurrent callers on
/// one instance never refresh twice.
pub struct TokenManager {
    client: Client,
    base_url: String,
    refresh_token: Option<String>,
    access_token: Mutex<Option<String>>,
}

impl TokenManager {
    pub fn new(client: Client, base_url: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            refresh_token,
            access_token: Mutex::new(None),
        }
    }

    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// The currently cached access token, without verifying it.
    pub async fn cached_access_token(&self) -> Option<String> {
        self.access_token.lock().await.clone()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn require_refresh_token(&self) -> Result<&str, ApiError> {
        self.refresh_token.as_deref().ok_or(ApiError::TokenNotProvided)
    }

    /// Ask the server whether `access_token` is still good.
    ///
    /// With nothing cached there is nothing to verify, so this answers
    /// `false` without a request.
    pub async fn verify_access_token(&self, access_token: Option<&str>) -> Result<bool> {
        self.require_refresh_token()?;

        let Some(token) = access_token else {
            debug!("No access token cached yet, skipping verification");
            return Ok(false);
        };

        let response = self
            .client
            .post(self.endpoint(VERIFY_PATH))
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await
            .map_err(ApiError::from)
            .context("Failed to send token verification request")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read token verification response")?;

        let verify: VerifyResponse = serde_json::from_str(&text).map_err(|e| {
            warn!(status = %status, error = %e, "Malformed token verification response");
            ApiError::InvalidResponse(format!("token verification returned {}", status))
        })?;

        let valid = verify.code.as_deref() != Some(TOKEN_NOT_VALID);
        debug!(status = %status, valid, "Access token verified");
        Ok(valid)
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String> {
        debug!("Refreshing access token");

        let response = self
            .client
            .post(self.endpoint(REFRESH_PATH))
            .form(&[("refresh", refresh_token)])
            .send()
            .await
            .map_err(ApiError::from)
            .context("Failed to send token refresh request")?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Refresh token rejected by the server");
            return Err(ApiError::TokenNotValid.into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body).into());
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .context("Failed to parse token refresh response")?;
        Ok(refreshed.access)
    }

    /// Return an access token the server has confirmed, refreshing if needed.
    ///
    /// Fails with [`ApiError::TokenNotProvided`] (no request made) when the
    /// client has no refresh token, and with [`ApiError::TokenNotValid`] when
    /// the refresh token itself is rejected. A failed refresh leaves the
    /// previous access token cached; it is re-verified before any reuse.
    pub async fn obtain_access_token(&self) -> Result<String> {
        let refresh_token = self.require_refresh_token()?;

        let mut cached = self.access_token.lock().await;
        if let Some(token) = cached.as_deref() {
            if self.verify_access_token(Some(token)).await? {
                return Ok(token.to_string());
            }
            debug!("Cached access token no longer valid");
        }

        let fresh = self.refresh_access_token(refresh_token).await?;
        *cached = Some(fresh.clone());
        Ok(fresh)
    }

    /// `Authorization: Bearer <token>` for an authenticated request.
    pub async fn authorization_header(&self) -> Result<header::HeaderMap> {
        let token = self.obtain_access_token().await?;
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))
                .context("Access token is not a valid header value")?,
        );
        Ok(headers)
    }
}
