//! Caller Identity Resolution
//!
//! This module defines the contract for resolving the caller's contact email,
//! the first stage of the progress pipeline. The concrete backend is selected
//! once at startup from configuration; the rest of the pipeline only ever
//! sees the trait object.

use crate::RequestContext;
use async_trait::async_trait;
use reqwest::StatusCode;

/// Errors produced while resolving the caller's email.
///
/// This is the one stage whose failure carries a distinct user-facing
/// message, so it surfaces as a typed error instead of degrading to the
/// pipeline's `None` sentinel.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The user has not granted email permission to the skill, or no
    /// voice profile was recognized for this request.
    #[error("email permission has not been granted for this request")]
    PermissionNotGranted,
    /// The profile service could not be reached or answered unexpectedly.
    #[error("profile service request failed: {0}")]
    ProfileService(String),
}

/// Defines the contract for any backend that can resolve the caller's email.
///
/// This abstraction allows the service to swap between the platform's
/// profile service and a fixed demo address while the pipeline stays
/// unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailResolver: Send + Sync {
    /// Resolves the contact email of the caller described by `ctx`.
    async fn resolve_email(&self, ctx: &RequestContext) -> Result<String, IdentityError>;
}

/// Resolver backed by the voice platform's user-profile service.
///
/// Uses the per-request API endpoint and access token carried in the
/// envelope. The profile service returns the email as a bare JSON string.
pub struct ProfileServiceResolver {
    http: reqwest::Client,
}

impl ProfileServiceResolver {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl EmailResolver for ProfileServiceResolver {
    async fn resolve_email(&self, ctx: &RequestContext) -> Result<String, IdentityError> {
        let (endpoint, token) = match (&ctx.api_endpoint, &ctx.api_access_token) {
            (Some(endpoint), Some(token)) => (endpoint, token),
            _ => return Err(IdentityError::PermissionNotGranted),
        };

        let url = format!("{}/v2/accounts/~current/settings/Profile.email", endpoint);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| IdentityError::ProfileService(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<String>()
                .await
                .map_err(|e| IdentityError::ProfileService(e.to_string())),
            StatusCode::FORBIDDEN | StatusCode::UNAUTHORIZED => {
                Err(IdentityError::PermissionNotGranted)
            }
            status => Err(IdentityError::ProfileService(format!(
                "unexpected status {status} from profile service"
            ))),
        }
    }
}

/// Resolver that always returns the same configured address.
///
/// Useful for demos and local testing where no voice profile exists.
pub struct StaticEmailResolver {
    email: String,
}

impl StaticEmailResolver {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

#[async_trait]
impl EmailResolver for StaticEmailResolver {
    async fn resolve_email(&self, _ctx: &RequestContext) -> Result<String, IdentityError> {
        Ok(self.email.clone())
    }
}
