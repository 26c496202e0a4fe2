//! Voice-Platform Envelope Models
//!
//! Serde models for the request and response envelopes exchanged with the
//! voice platform over the webhook, plus builder helpers for the handful of
//! response shapes the router produces. Field names are camelCase on the
//! wire. The request `type` and intent name are kept as plain strings so an
//! unknown value routes to the catch-all message instead of failing to
//! deserialize.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- Inbound ---

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    pub version: String,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: Request,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    pub session_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub system: Option<System>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct System {
    #[serde(default)]
    pub person: Option<Person>,
    pub api_endpoint: Option<String>,
    pub api_access_token: Option<String>,
}

/// The recognized speaker, attached only when a voice profile matched.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub person_id: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Request type, e.g. "LaunchRequest" or "IntentRequest".
    #[serde(rename = "type")]
    pub kind: String,
    pub request_id: Option<String>,
    pub locale: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub name: String,
    pub value: Option<String>,
}

impl RequestEnvelope {
    /// The recognized person, if the platform attached one.
    pub fn person(&self) -> Option<&Person> {
        self.context
            .as_ref()
            .and_then(|c| c.system.as_ref())
            .and_then(|s| s.person.as_ref())
    }

    /// The value of a named slot, if present and filled.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.request
            .intent
            .as_ref()
            .and_then(|intent| intent.slots.get(name))
            .and_then(|slot| slot.value.as_deref())
    }
}

// --- Outbound ---

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: ResponseBody,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl OutputSpeech {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: "PlainText".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl ResponseEnvelope {
    const VERSION: &'static str = "1.0";

    /// Speaks `text` and keeps the session open.
    pub fn speak(text: impl Into<String>) -> Self {
        Self {
            version: Self::VERSION.to_string(),
            response: ResponseBody {
                output_speech: Some(OutputSpeech::plain(text)),
                reprompt: None,
                should_end_session: false,
            },
        }
    }

    /// An empty response with no speech, ending the session.
    pub fn empty() -> Self {
        Self {
            version: Self::VERSION.to_string(),
            response: ResponseBody {
                output_speech: None,
                reprompt: None,
                should_end_session: true,
            },
        }
    }

    /// Adds a reprompt, spoken if the user stays silent.
    pub fn with_reprompt(mut self, text: impl Into<String>) -> Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::plain(text),
        });
        self
    }

    /// Marks the session as ended after the speech plays.
    pub fn ending_session(mut self) -> Self {
        self.response.should_end_session = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_request_deserializes() {
        let json = r#"{
            "version": "1.0",
            "session": {"new": true, "sessionId": "amzn1.echo-api.session.123"},
            "context": {
                "system": {
                    "person": {"personId": "amzn1.ask.person.ABC"},
                    "apiEndpoint": "https://api.amazonalexa.example",
                    "apiAccessToken": "token-123"
                }
            },
            "request": {
                "type": "LaunchRequest",
                "requestId": "amzn1.echo-api.request.123",
                "locale": "en-US"
            }
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.request.kind, "LaunchRequest");
        assert_eq!(envelope.request.locale.as_deref(), Some("en-US"));
        assert_eq!(envelope.person().unwrap().person_id, "amzn1.ask.person.ABC");
        assert!(envelope.request.intent.is_none());
    }

    #[test]
    fn test_intent_request_deserializes_with_slots() {
        let json = r#"{
            "version": "1.0",
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.456",
                "locale": "en-US",
                "intent": {
                    "name": "GetCourseProgressIntent",
                    "slots": {
                        "coursename": {"name": "coursename", "value": "Demo"}
                    }
                }
            }
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.request.kind, "IntentRequest");
        assert_eq!(
            envelope.request.intent.as_ref().unwrap().name,
            "GetCourseProgressIntent"
        );
        assert_eq!(envelope.slot_value("coursename"), Some("Demo"));
        assert_eq!(envelope.slot_value("missing"), None);
        assert!(envelope.person().is_none());
    }

    #[test]
    fn test_unknown_request_type_still_parses() {
        let json = r#"{
            "version": "1.0",
            "request": {"type": "System.ExceptionEncountered"}
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.request.kind, "System.ExceptionEncountered");
    }

    #[test]
    fn test_unfilled_slot_has_no_value() {
        let json = r#"{
            "version": "1.0",
            "request": {
                "type": "IntentRequest",
                "intent": {
                    "name": "GetCourseProgressIntent",
                    "slots": {"coursename": {"name": "coursename"}}
                }
            }
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.slot_value("coursename"), None);
    }

    #[test]
    fn test_speak_response_serializes_camel_case() {
        let response = ResponseEnvelope::speak("Hello").with_reprompt("Still there?");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["version"], "1.0");
        assert_eq!(json["response"]["outputSpeech"]["type"], "PlainText");
        assert_eq!(json["response"]["outputSpeech"]["text"], "Hello");
        assert_eq!(
            json["response"]["reprompt"]["outputSpeech"]["text"],
            "Still there?"
        );
        assert_eq!(json["response"]["shouldEndSession"], false);
    }

    #[test]
    fn test_ending_session_sets_the_flag() {
        let response = ResponseEnvelope::speak("Bye").ending_session();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["response"]["shouldEndSession"], true);
    }

    #[test]
    fn test_empty_response_omits_speech_fields() {
        let response = ResponseEnvelope::empty();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["response"].get("outputSpeech").is_none());
        assert!(json["response"].get("reprompt").is_none());
        assert_eq!(json["response"]["shouldEndSession"], true);
    }
}
