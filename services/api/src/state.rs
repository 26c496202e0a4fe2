//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the read-only
//! configuration and the shared service clients. It is created once at
//! startup and passed to every handler; nothing in it is mutated per request.

use crate::config::Config;
use edx_voice_core::{identity::EmailResolver, lms::LmsApi};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers. All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub lms: Arc<dyn LmsApi>,
    pub email_resolver: Arc<dyn EmailResolver>,
}
