//! Main Entrypoint for the Voice Assistant Webhook Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Building the shared HTTP client and selecting the email backend.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use edx_voice_api::{
    config::{Config, EmailBackend},
    router::create_router,
    state::AppState,
};
use edx_voice_core::{
    identity::{EmailResolver, ProfileServiceResolver, StaticEmailResolver},
    lms::{Credentials, LmsClient},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Initialize Shared Services ---
    // One client serves both the platform API and the profile service, so
    // every outbound call inherits the configured timeout.
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let lms = Arc::new(LmsClient::new(
        http.clone(),
        config.api_domain.clone(),
        Credentials {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            grant_type: config.grant_type.clone(),
        },
    ));

    let email_resolver: Arc<dyn EmailResolver> = match &config.email_backend {
        EmailBackend::Profile => {
            info!("Using the profile-service email backend.");
            Arc::new(ProfileServiceResolver::new(http))
        }
        EmailBackend::Static => {
            info!("Using the static email backend.");
            let email = config
                .static_email
                .as_ref()
                .context("STATIC_EMAIL is required for the static backend")?;
            Arc::new(StaticEmailResolver::new(email.clone()))
        }
    };

    let app_state = Arc::new(AppState {
        config: Arc::new(config.clone()),
        lms,
        email_resolver,
    });

    // --- 4. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 5. Start Server ---
    info!(
        api_domain = %config.api_domain,
        email_backend = ?config.email_backend,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server has shut down.");
    Ok(())
}
