//! Existence checks for the ids an operation refers to.
//!
//! Used before creating a lift (athlete and competition must exist) and
//! after a 404 to say which of several referenced resources is missing.

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use tracing::debug;

use super::{ApiError, LifterClient};

pub const ATHLETE_MISSING: &str = "Athlete does not exist.";
pub const COMPETITION_MISSING: &str = "Competition does not exist.";
pub const SESSION_MISSING: &str = "Session does not exist.";
pub const LIFT_MISSING: &str = "Lift does not exist.";

/// Ids an operation refers to. Sessions and lifts live inside their
/// competition, so they are only checked when `competition` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceRefs<'a> {
    pub athlete: Option<&'a str>,
    pub competition: Option<&'a str>,
    pub session: Option<&'a str>,
    pub lift: Option<&'a str>,
}

impl<'a> ResourceRefs<'a> {
    pub fn athlete(id: &'a str) -> Self {
        Self {
            athlete: Some(id),
            ..Default::default()
        }
    }

    pub fn competition(id: &'a str) -> Self {
        Self {
            competition: Some(id),
            ..Default::default()
        }
    }

    pub fn with_athlete(mut self, id: &'a str) -> Self {
        self.athlete = Some(id);
        self
    }

    pub fn with_session(mut self, id: &'a str) -> Self {
        self.session = Some(id);
        self
    }

    pub fn with_lift(mut self, id: &'a str) -> Self {
        self.lift = Some(id);
        self
    }
}

impl LifterClient {
    /// GET a resource and report whether it exists. Only 200 and 404 are
    /// expected; anything else is an error.
    async fn exists(&self, path: &str) -> Result<bool> {
        let url = self.api_url(path);
        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to check {}", url))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::from_status(status, &body).into())
            }
        }
    }

    /// Messages for every referenced resource that does not exist, joined
    /// with spaces, or `None` when all of them exist.
    ///
    /// A missing competition hides its sessions and lifts: only the
    /// competition is reported.
    pub async fn missing_resources(&self, refs: &ResourceRefs<'_>) -> Result<Option<String>> {
        let mut missing = Vec::new();

        if let Some(athlete) = refs.athlete {
            if !self.exists(&format!("athletes/{}", athlete)).await? {
                missing.push(ATHLETE_MISSING);
            }
        }

        if let Some(competition) = refs.competition {
            if !self.exists(&format!("competitions/{}", competition)).await? {
                missing.push(COMPETITION_MISSING);
            } else {
                if let Some(session) = refs.session {
                    let path = format!("competitions/{}/sessions/{}", competition, session);
                    if !self.exists(&path).await? {
                        missing.push(SESSION_MISSING);
                    }
                }
                if let Some(lift) = refs.lift {
                    let path = format!("competitions/{}/lifts/{}", competition, lift);
                    if !self.exists(&path).await? {
                        missing.push(LIFT_MISSING);
                    }
                }
            }
        }

        debug!(?refs, missing = missing.len(), "Existence check");
        if missing.is_empty() {
            Ok(None)
        } else {
            Ok(Some(missing.join(" ")))
        }
    }

    /// Fail with `NotFound` if any referenced resource is missing.
    pub async fn ensure_exists(&self, refs: &ResourceRefs<'_>) -> Result<()> {
        match self.missing_resources(refs).await? {
            Some(detail) => Err(ApiError::NotFound(detail).into()),
            None => Ok(()),
        }
    }
}
