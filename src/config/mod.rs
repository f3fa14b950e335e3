/// Configuration management for the Flowlens service
///
/// Handles server binding and per-engine connection settings. Engine settings
/// are optional by design: an engine with an incomplete configuration is
/// served from its fallback dataset instead of the network, independently of
/// the other engine's availability.

use serde::{Deserialize, Serialize};

use crate::error::SourceFetchError;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Per-engine connection settings
    pub engines: EnginesConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Connection settings for every supported engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnginesConfig {
    /// n8n-style automation engine
    pub n8n: EngineSettings,
    /// Langflow-style flow engine
    pub langflow: EngineSettings,
}

/// Connection settings for one engine
///
/// Both fields must be present for live retrieval; otherwise the owning
/// adapter skips the network and serves its fallback dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Base address of the engine API (e.g., "http://localhost:5678")
    pub base_url: Option<String>,
    /// API credential sent as a bearer token
    pub api_key: Option<String>,
}

impl EngineSettings {
    /// Build settings from a pair of environment variables
    pub fn from_env(base_url_var: &str, api_key_var: &str) -> Self {
        Self {
            base_url: std::env::var(base_url_var).ok().filter(|v| !v.is_empty()),
            api_key: std::env::var(api_key_var).ok().filter(|v| !v.is_empty()),
        }
    }

    /// Explicit settings, used by tests and embedders
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            api_key: Some(api_key.into()),
        }
    }

    /// Whether both the base address and the credential are present
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }

    /// Borrow both values or report the configuration as missing
    pub fn require(&self) -> Result<(&str, &str), SourceFetchError> {
        match (self.base_url.as_deref(), self.api_key.as_deref()) {
            (Some(base_url), Some(api_key)) => Ok((base_url, api_key)),
            _ => Err(SourceFetchError::ConfigurationMissing),
        }
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("FLOWLENS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("FLOWLENS_PORT")
                    .unwrap_or_else(|_| "3004".to_string())
                    .parse()
                    .unwrap_or(3004),
            },
            engines: EnginesConfig {
                n8n: EngineSettings::from_env("N8N_BASE_URL", "N8N_API_KEY"),
                langflow: EngineSettings::from_env("LANGFLOW_BASE_URL", "LANGFLOW_API_KEY"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_settings_are_not_configured() {
        let mut settings = EngineSettings::default();
        assert!(!settings.is_configured());
        assert!(settings.require().is_err());

        settings.base_url = Some("http://localhost:5678".to_string());
        assert!(!settings.is_configured());

        settings.api_key = Some("secret".to_string());
        assert!(settings.is_configured());
        let (base_url, api_key) = settings.require().unwrap();
        assert_eq!(base_url, "http://localhost:5678");
        assert_eq!(api_key, "secret");
    }
}
