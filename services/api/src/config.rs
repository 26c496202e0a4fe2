use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Defines the supported backends for resolving the caller's email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmailBackend {
    /// The voice platform's user-profile service (default).
    Profile,
    /// A fixed address from `STATIC_EMAIL`, for demos and local testing.
    Static,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub api_domain: String,
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
    pub request_timeout: Duration,
    pub email_backend: EmailBackend,
    pub static_email: Option<String>,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let api_domain = std::env::var("API_DOMAIN")
            .map_err(|_| ConfigError::MissingVar("API_DOMAIN".to_string()))?
            .trim_end_matches('/')
            .to_string();

        let client_id = std::env::var("CLIENT_ID")
            .map_err(|_| ConfigError::MissingVar("CLIENT_ID".to_string()))?;
        let client_secret = std::env::var("CLIENT_SECRET")
            .map_err(|_| ConfigError::MissingVar("CLIENT_SECRET".to_string()))?;
        let grant_type =
            std::env::var("GRANT_TYPE").unwrap_or_else(|_| "client_credentials".to_string());

        let timeout_str =
            std::env::var("REQUEST_TIMEOUT_SECS").unwrap_or_else(|_| "5".to_string());
        let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
            ConfigError::InvalidValue(
                "REQUEST_TIMEOUT_SECS".to_string(),
                format!("'{}' is not a number of seconds", timeout_str),
            )
        })?;
        let request_timeout = Duration::from_secs(timeout_secs);

        let backend_str = std::env::var("EMAIL_BACKEND").unwrap_or_else(|_| "profile".to_string());
        let email_backend = match backend_str.to_lowercase().as_str() {
            "static" => EmailBackend::Static,
            _ => EmailBackend::Profile,
        };

        let static_email = std::env::var("STATIC_EMAIL").ok();
        if email_backend == EmailBackend::Static && static_email.is_none() {
            return Err(ConfigError::MissingVar(
                "STATIC_EMAIL must be set for the 'static' email backend".to_string(),
            ));
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            api_domain,
            client_id,
            client_secret,
            grant_type,
            request_timeout,
            email_backend,
            static_email,
            log_level,
        })
    }
}
