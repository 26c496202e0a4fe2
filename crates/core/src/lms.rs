//! Open edX Platform API Client
//!
//! This module defines the contract for the five remote calls the progress
//! pipeline makes against the learning platform, and a `reqwest`-backed
//! implementation. Every operation degrades to an empty sentinel on
//! transport failure, non-2xx status, or a missing response field; the
//! distinction between those cases survives only in the logs.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// A course as listed in the user's catalog view.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CourseSummary {
    pub id: String,
    pub name: String,
}

/// Immutable service credentials for the client-credentials grant.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
}

/// The remote operations the pipeline performs against the platform.
///
/// Degrading instead of erroring is part of the contract: callers decide
/// the user-facing outcome purely from the pattern of empty results.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LmsApi: Send + Sync {
    /// Exchanges the service credentials for a bearer token.
    async fn access_token(&self) -> Option<String>;

    /// Looks up the platform username registered under `email`.
    async fn username_for_email(&self, email: &str, token: &str) -> Option<String>;

    /// Lists the course ids the user is enrolled in. Empty on failure.
    async fn enrollments(&self, username: &str, token: &str) -> Vec<String>;

    /// Lists all courses visible to the user. Empty on failure.
    async fn courses(&self, username: &str, token: &str) -> Vec<CourseSummary>;

    /// Fetches the fractional earned grade (0.0–1.0) for the course.
    async fn earned_grade(&self, username: &str, course_id: &str, token: &str) -> Option<f64>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct UserLookup {
    username: Option<String>,
}

#[derive(Deserialize)]
struct EnrollmentEntry {
    course_id: String,
}

#[derive(Deserialize)]
struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Deserialize)]
struct GradeRecord {
    earned_grade: Option<f64>,
}

/// `LmsApi` implementation over a shared `reqwest::Client`.
///
/// The client is built once at startup with the configured request timeout,
/// so every call here inherits it.
pub struct LmsClient {
    http: reqwest::Client,
    base: String,
    credentials: Credentials,
}

impl LmsClient {
    pub fn new(http: reqwest::Client, base: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            http,
            base: base.into(),
            credentials,
        }
    }

    /// Performs a bearer-authorized GET and decodes the 200 JSON body.
    /// Anything else becomes `None`, logged at warn level.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: &str,
    ) -> Option<T> {
        let url = format!("{}{}", self.base, path);
        let result = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(%path, error = %e, "platform request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(%path, status = %response.status(), "platform returned non-success status");
            return None;
        }

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(%path, error = %e, "platform response body could not be decoded");
                None
            }
        }
    }
}

#[async_trait]
impl LmsApi for LmsClient {
    async fn access_token(&self) -> Option<String> {
        let url = format!("{}/oauth2/access_token", self.base);
        let form = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("grant_type", self.credentials.grant_type.as_str()),
        ];

        let response = match self.http.post(&url).form(&form).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "token request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "token endpoint returned non-success status");
            return None;
        }

        match response.json::<TokenResponse>().await {
            Ok(body) => body.access_token,
            Err(e) => {
                warn!(error = %e, "token response could not be decoded");
                None
            }
        }
    }

    async fn username_for_email(&self, email: &str, token: &str) -> Option<String> {
        self.get_json::<UserLookup>("/eox-core/api/v1/user/", &[("email", email)], token)
            .await?
            .username
    }

    async fn enrollments(&self, username: &str, token: &str) -> Vec<String> {
        self.get_json::<ResultsPage<EnrollmentEntry>>(
            "/api/enrollment/v1/enrollments/",
            &[("username", username)],
            token,
        )
        .await
        .map(|page| page.results.into_iter().map(|e| e.course_id).collect())
        .unwrap_or_default()
    }

    async fn courses(&self, username: &str, token: &str) -> Vec<CourseSummary> {
        self.get_json::<ResultsPage<CourseSummary>>(
            "/api/courses/v1/courses/",
            &[("username", username)],
            token,
        )
        .await
        .map(|page| page.results)
        .unwrap_or_default()
    }

    async fn earned_grade(&self, username: &str, course_id: &str, token: &str) -> Option<f64> {
        self.get_json::<GradeRecord>(
            "/eox-core/api/v1/grade/",
            &[("username", username), ("course_id", course_id)],
            token,
        )
        .await?
        .earned_grade
    }
}
