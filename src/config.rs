//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// LINE Login channel ID (public)
    pub line_channel_id: String,
    /// LINE Login channel secret (also signs the id_token)
    pub line_channel_secret: String,
    /// Origin the released SPA is served from, e.g. "https://teame-c1a32.web.app"
    pub app_origin: String,
    /// Redirect URI registered with the LINE channel
    pub log_in_redirect_uri: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            line_channel_id: "test_channel_id".to_string(),
            line_channel_secret: "test_channel_secret".to_string(),
            app_origin: "https://teame-c1a32.web.app".to_string(),
            log_in_redirect_uri: "http://localhost:8080/logInCallback".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// For local development, secrets can be set via a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            line_channel_id: env::var("LINE_CHANNEL_ID")
                .map_err(|_| ConfigError::Missing("LINE_CHANNEL_ID"))?,
            line_channel_secret: env::var("LINE_CHANNEL_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("LINE_CHANNEL_SECRET"))?,
            app_origin: env::var("APP_ORIGIN")
                .unwrap_or_else(|_| "https://teame-c1a32.web.app".to_string()),
            log_in_redirect_uri: env::var("LOG_IN_REDIRECT_URI")
                .map_err(|_| ConfigError::Missing("LOG_IN_REDIRECT_URI"))?,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
