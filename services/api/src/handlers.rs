//! Intent Router
//!
//! This module dispatches inbound voice-platform envelopes to the progress
//! pipeline or to the static response handlers. The router is infallible at
//! the HTTP boundary: once the JSON body parses, every path — including
//! unknown request types and intents — produces a well-formed spoken
//! response, and internal failures are only visible in the logs.

use axum::{
    Json,
    extract::State,
};
use edx_voice_core::{
    RequestContext, messages,
    pipeline::fetch_course_progress,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    models::{RequestEnvelope, ResponseEnvelope},
    state::AppState,
};

const COURSE_NAME_SLOT: &str = "coursename";

/// The single webhook endpoint the voice platform posts every request to.
pub async fn webhook(
    State(state): State<Arc<AppState>>,
    Json(envelope): Json<RequestEnvelope>,
) -> Json<ResponseEnvelope> {
    info!(
        request_type = %envelope.request.kind,
        locale = envelope.request.locale.as_deref().unwrap_or("unknown"),
        "handling voice request"
    );
    Json(route(&state, &envelope).await)
}

async fn route(state: &AppState, envelope: &RequestEnvelope) -> ResponseEnvelope {
    match envelope.request.kind.as_str() {
        "LaunchRequest" => launch(envelope),
        "IntentRequest" => intent(state, envelope).await,
        "SessionEndedRequest" => ResponseEnvelope::empty(),
        other => {
            error!(request_type = other, "unhandled request type");
            catch_all()
        }
    }
}

async fn intent(state: &AppState, envelope: &RequestEnvelope) -> ResponseEnvelope {
    let Some(intent) = envelope.request.intent.as_ref() else {
        error!("intent request carried no intent");
        return catch_all();
    };

    match intent.name.as_str() {
        "GetCourseProgressIntent" => course_progress(state, envelope).await,
        "AMAZON.HelpIntent" => {
            ResponseEnvelope::speak(messages::HELP_MESSAGE).with_reprompt(messages::HELP_MESSAGE)
        }
        "AMAZON.CancelIntent" | "AMAZON.StopIntent" => {
            ResponseEnvelope::speak(messages::CANCEL_OR_STOP_MESSAGE).ending_session()
        }
        "AMAZON.FallbackIntent" => ResponseEnvelope::speak(messages::FALLBACK_MESSAGE)
            .with_reprompt(messages::FALLBACK_REPROMPT_MESSAGE),
        other => {
            error!(intent = other, "no handler for intent");
            catch_all()
        }
    }
}

/// A session only makes sense when the platform recognized the speaker;
/// otherwise ask the user to set up a voice profile and close it.
fn launch(envelope: &RequestEnvelope) -> ResponseEnvelope {
    match envelope.person() {
        Some(person) => {
            info!(person_id = %person.person_id, "recognized caller at launch");
            ResponseEnvelope::speak(messages::WELCOME_MESSAGE)
                .with_reprompt(messages::WELCOME_MESSAGE)
        }
        None => ResponseEnvelope::speak(messages::PROFILE_NOT_RECOGNIZED_MESSAGE).ending_session(),
    }
}

async fn course_progress(state: &AppState, envelope: &RequestEnvelope) -> ResponseEnvelope {
    let Some(course_name) = envelope.slot_value(COURSE_NAME_SLOT) else {
        info!("progress intent without a course name slot");
        return ResponseEnvelope::speak(messages::COURSE_NOT_FOUND_MESSAGE)
            .with_reprompt(messages::COURSE_NOT_FOUND_MESSAGE);
    };

    let ctx = request_context(envelope);
    let outcome = fetch_course_progress(
        state.email_resolver.as_ref(),
        state.lms.as_ref(),
        &ctx,
        course_name,
    )
    .await;

    let speech = outcome.speech();
    ResponseEnvelope::speak(speech.clone()).with_reprompt(speech)
}

fn catch_all() -> ResponseEnvelope {
    ResponseEnvelope::speak(messages::CATCH_ALL_MESSAGE).with_reprompt(messages::CATCH_ALL_MESSAGE)
}

/// Builds the per-request context the pipeline stages receive.
fn request_context(envelope: &RequestEnvelope) -> RequestContext {
    let system = envelope.context.as_ref().and_then(|c| c.system.as_ref());
    RequestContext {
        api_endpoint: system.and_then(|s| s.api_endpoint.clone()),
        api_access_token: system.and_then(|s| s.api_access_token.clone()),
        person_id: envelope.person().map(|p| p.person_id.clone()),
        locale: envelope.request.locale.clone(),
    }
}
