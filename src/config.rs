//! Application configuration loaded from environment variables.
//!
//! Secrets are read once at startup and cached in memory. Cloud Run injects
//! them as environment variables via secret bindings, so no Secret Manager
//! round-trips are needed at runtime.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Base URL of the user service (user validation)
    pub user_service_url: String,
    /// Base URL of the habit activity service (habit metadata)
    pub habit_service_url: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Timeout for upstream service calls, in seconds
    pub upstream_timeout_secs: u64,

    // --- Secrets (cached from env at startup) ---
    /// HMAC key for verifying pushed habit events
    pub event_signing_key: Vec<u8>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            user_service_url: "http://localhost:8081/api/users".to_string(),
            habit_service_url: "http://localhost:8082/api/habits".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            upstream_timeout_secs: 5,
            event_signing_key: b"test_event_key_32_bytes_minimum!".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only `EVENT_SIGNING_KEY` is required; everything else has a
    /// local-development default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            user_service_url: env::var("USER_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8081/api/users".to_string()),
            habit_service_url: env::var("HABIT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8082/api/habits".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),

            event_signing_key: env::var("EVENT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("EVENT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("EVENT_SIGNING_KEY", "test_event_key_32_bytes_minimum!");
        env::set_var("HABIT_SERVICE_URL", "http://habits.test/api/habits");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.habit_service_url, "http://habits.test/api/habits");
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_timeout_secs, 5);
    }
}
