//! Course Progress Pipeline
//!
//! This module implements the strict-sequence pipeline behind the progress
//! intent: resolve the caller's email, obtain a bearer token, map the email
//! to a platform username, resolve the spoken course name to a course id,
//! and fetch the earned grade. The first stage that comes back empty
//! short-circuits the run; the outcome enum captures exactly where it
//! stopped so the router can pick the matching spoken message.

use crate::RequestContext;
use crate::identity::{EmailResolver, IdentityError};
use crate::lms::LmsApi;
use crate::messages;
use std::collections::HashMap;
use tracing::{debug, info};

/// Terminal result of a progress-pipeline run.
#[derive(Debug)]
pub enum ProgressOutcome {
    /// The caller's email could not be resolved.
    IdentityFailed(IdentityError),
    /// The client-credentials exchange failed; no platform call was made.
    TokenUnavailable,
    /// No platform account is registered under the resolved email.
    UserNotFound { email: String },
    /// The spoken name matched no course in the user's enrollment∩catalog set.
    CourseNotFound,
    /// The grade endpoint failed for a course the user is enrolled in.
    GradeUnavailable,
    /// Full success. `percent` is the earned grade as a percentage rounded
    /// to two decimals; zero is a legitimate value here.
    Progress {
        username: String,
        course_name: String,
        percent: f64,
    },
}

impl ProgressOutcome {
    /// Maps the outcome to the phrase the assistant speaks.
    pub fn speech(&self) -> String {
        match self {
            ProgressOutcome::IdentityFailed(_) => messages::EMAIL_PERMISSION_MESSAGE.to_string(),
            ProgressOutcome::TokenUnavailable => messages::TOKEN_ERROR_MESSAGE.to_string(),
            ProgressOutcome::UserNotFound { email } => messages::user_not_found_message(email),
            ProgressOutcome::CourseNotFound => messages::COURSE_NOT_FOUND_MESSAGE.to_string(),
            ProgressOutcome::GradeUnavailable => messages::USER_NOT_ENROLLED_MESSAGE.to_string(),
            ProgressOutcome::Progress {
                username,
                course_name,
                percent,
            } => messages::progress_message(username, course_name, *percent),
        }
    }
}

/// Runs the full pipeline for one spoken course name.
///
/// Each stage is awaited in order and the run stops at the first empty
/// result. Nothing is cached: the token, username, and course id live only
/// for this invocation.
pub async fn fetch_course_progress(
    resolver: &dyn EmailResolver,
    lms: &dyn LmsApi,
    ctx: &RequestContext,
    spoken_name: &str,
) -> ProgressOutcome {
    let email = match resolver.resolve_email(ctx).await {
        Ok(email) => email,
        Err(e) => {
            info!(error = %e, "email resolution failed");
            return ProgressOutcome::IdentityFailed(e);
        }
    };

    let Some(token) = lms.access_token().await else {
        return ProgressOutcome::TokenUnavailable;
    };

    let Some(username) = lms.username_for_email(&email, &token).await else {
        return ProgressOutcome::UserNotFound { email };
    };

    let course_name = spoken_name.to_lowercase();
    let Some(course_id) = resolve_course_id(lms, &course_name, &username, &token).await else {
        return ProgressOutcome::CourseNotFound;
    };

    let Some(grade) = lms.earned_grade(&username, &course_id, &token).await else {
        return ProgressOutcome::GradeUnavailable;
    };

    let percent = round_percent(grade);
    debug!(%username, %course_id, percent, "progress resolved");
    ProgressOutcome::Progress {
        username,
        course_name,
        percent,
    }
}

/// Resolves a lowercased spoken course name to a course id.
///
/// A course counts only if it appears in both the user's catalog view and
/// their enrollment list; enrollment alone is not enough.
async fn resolve_course_id(
    lms: &dyn LmsApi,
    course_name: &str,
    username: &str,
    token: &str,
) -> Option<String> {
    let enrollments = lms.enrollments(username, token).await;
    let catalog = lms.courses(username, token).await;

    if enrollments.is_empty() || catalog.is_empty() {
        return None;
    }

    let valid_courses: HashMap<String, String> = catalog
        .into_iter()
        .filter(|course| enrollments.contains(&course.id))
        .map(|course| (course.name.to_lowercase(), course.id))
        .collect();

    valid_courses.get(course_name).cloned()
}

/// Converts a fractional grade to a percentage rounded to two decimals.
fn round_percent(earned_grade: f64) -> f64 {
    (earned_grade * 100.0 * 100.0).round() / 100.0
}
