pub mod identity;
pub mod lms;
pub mod messages;
pub mod pipeline;

/// Per-request caller context extracted from the voice-platform envelope.
///
/// Every pipeline stage that needs caller identity receives this value
/// explicitly; nothing is read from ambient or global state. All fields are
/// optional because the platform only attaches them when the user has linked
/// a recognized voice profile and granted the relevant permissions.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Base URL of the voice platform's profile service for this request.
    pub api_endpoint: Option<String>,
    /// Short-lived token authorizing profile-service calls for this request.
    pub api_access_token: Option<String>,
    /// Identifier of the recognized speaker, if any.
    pub person_id: Option<String>,
    /// BCP-47 locale of the utterance (e.g. "en-US").
    pub locale: Option<String>,
}
