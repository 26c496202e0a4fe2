//! Spoken Message Catalog
//!
//! Every phrase the assistant can say lives here, so the router and the
//! pipeline never build user-facing text inline. Locale catalogs are out of
//! scope; the strings are English.

pub const WELCOME_MESSAGE: &str = "Welcome, this is the Open edX assistant, I can provide you \
     information about student metrics and important aspects of a course.";

pub const PROFILE_NOT_RECOGNIZED_MESSAGE: &str =
    "I could not recognize your voice profile. Please set up a voice profile \
     in your companion app and try again.";

pub const EMAIL_PERMISSION_MESSAGE: &str =
    "It was not possible to obtain the user's email. Please enable email \
     permissions in the skill settings via the companion app.";

pub const TOKEN_ERROR_MESSAGE: &str =
    "It was not possible to consult the progress due to an access error.";

pub const COURSE_NOT_FOUND_MESSAGE: &str = "The course is not found. Try with a valid one.";

pub const USER_NOT_ENROLLED_MESSAGE: &str =
    "The user is not enrolled in the course. Try with a valid one.";

pub const HELP_MESSAGE: &str = "Hi, try asking for your progress in some course";

pub const CANCEL_OR_STOP_MESSAGE: &str = "See you soon!";

pub const FALLBACK_MESSAGE: &str =
    "Hmm, I'm not sure. You can say Hello or Help. What do you want to do?";

pub const FALLBACK_REPROMPT_MESSAGE: &str = "I did not understand you. How can I help you?";

pub const CATCH_ALL_MESSAGE: &str =
    "Sorry, I've had trouble doing what you asked me. Please try again.";

/// The not-found message names the email that failed to map to an account.
pub fn user_not_found_message(email: &str) -> String {
    format!("The user with email {email} is not found. Try with a valid one.")
}

/// Progress report spoken on full pipeline success.
pub fn progress_message(username: &str, course_name: &str, percent: f64) -> String {
    format!(
        "The progress for the student with username {username} in the course \
         of {course_name} is {percent}%."
    )
}
