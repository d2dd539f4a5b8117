//! Configuration types for the tutor

use crate::error::{Result, TutorError};
use crate::constants::{API_KEY_ENV, DEFAULT_HOST, DEFAULT_PORT, models, providers, timeouts};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Provider configuration for the completion service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name (e.g., "google")
    pub name: String,
    /// API key (optional, the client falls back to the provider's own env lookup)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: providers::GOOGLE.to_string(),
            api_key: None,
            default_model: models::DEFAULT_MODEL.to_string(),
            timeout_seconds: Some(timeouts::DEFAULT_LLM_TIMEOUT),
        }
    }
}

impl ProviderConfig {
    /// Build the default configuration with the API key taken from the environment
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            debug!("{} not set, completion calls will rely on provider defaults", API_KEY_ENV);
        }

        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Override the request timeout; `None` disables it
    pub fn with_timeout(mut self, timeout_seconds: Option<u64>) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Reject configurations no request could succeed with
    pub fn validate(&self) -> Result<()> {
        if self.default_model.trim().is_empty() {
            return Err(TutorError::Config("model identifier must not be empty".to_string()));
        }
        if self.timeout_seconds == Some(0) {
            return Err(TutorError::Config("timeout must be positive when set".to_string()));
        }
        Ok(())
    }
}

/// Bind address of the web server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Socket address in `host:port` form
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
