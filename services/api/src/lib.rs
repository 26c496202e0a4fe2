//! Voice Assistant API Library Crate
//!
//! This library contains all the logic for the Open edX voice-assistant
//! webhook service: the envelope models, intent routing, configuration, and
//! shared state. The `bin/api.rs` binary is a thin wrapper around it.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
