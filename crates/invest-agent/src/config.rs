//! Configuration for the investment research tool layer
//!
//! All process-wide configuration (provider key, search backend identity) is
//! loaded once at startup and passed into adapters at construction, so the
//! adapters stay independently testable with injected configurations.

use crate::error::{InvestError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identity of the managed document-search backend
///
/// All three identifiers are required for the research lookup to be enabled;
/// absence of any of them disables the capability rather than failing
/// startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchBackendConfig {
    /// Cloud project that owns the data store
    pub project_id: String,

    /// Backend location, e.g. "us"
    pub location: String,

    /// Identifier of the document data store to search
    pub data_store_id: String,

    /// Bearer token for the search API
    pub access_token: Option<String>,
}

/// Configuration for the investment research tool layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Financial data provider API key
    pub provider_api_key: Option<String>,

    /// Research search backend, if configured
    pub search_backend: Option<SearchBackendConfig>,

    /// Request timeout duration for outbound HTTP calls
    pub request_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider_api_key: None,
            search_backend: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AgentConfig {
    /// Create a new configuration builder
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }

    /// Load the full configuration from environment variables
    ///
    /// Reads `ALPHA_VANTAGE_API_KEY` for the data provider and
    /// `GCP_PROJECT_ID` / `VERTEX_LOCATION` / `VERTEX_DATA_STORE_ID` /
    /// `GCP_ACCESS_TOKEN` for the search backend. The search backend is
    /// enabled only when both the project and data store are set.
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env_provider_key().with_env_search_backend().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(InvestError::ConfigError(
                "request_timeout must be greater than zero".to_string(),
            ));
        }

        if let Some(backend) = &self.search_backend {
            if backend.project_id.is_empty() || backend.data_store_id.is_empty() {
                return Err(InvestError::ConfigError(
                    "search backend project and data store must be non-empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Whether the research search capability is enabled
    pub fn search_enabled(&self) -> bool {
        self.search_backend.is_some()
    }
}

/// Builder for AgentConfig
#[derive(Debug, Default)]
pub struct AgentConfigBuilder {
    provider_api_key: Option<String>,
    search_backend: Option<SearchBackendConfig>,
    request_timeout: Option<Duration>,
}

impl AgentConfigBuilder {
    /// Set the financial data provider API key
    pub fn provider_api_key(mut self, key: impl Into<String>) -> Self {
        self.provider_api_key = Some(key.into());
        self
    }

    /// Set the search backend identity
    pub fn search_backend(mut self, backend: SearchBackendConfig) -> Self {
        self.search_backend = Some(backend);
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Load the provider API key from the environment
    pub fn with_env_provider_key(mut self) -> Self {
        if let Ok(key) = std::env::var("ALPHA_VANTAGE_API_KEY") {
            self.provider_api_key = Some(key);
        }
        self
    }

    /// Load the search backend identity from the environment
    ///
    /// Leaves the backend unset unless both `GCP_PROJECT_ID` and
    /// `VERTEX_DATA_STORE_ID` are present; `VERTEX_LOCATION` defaults to
    /// "us".
    pub fn with_env_search_backend(mut self) -> Self {
        let project_id = std::env::var("GCP_PROJECT_ID").ok();
        let data_store_id = std::env::var("VERTEX_DATA_STORE_ID").ok();

        if let (Some(project_id), Some(data_store_id)) = (project_id, data_store_id) {
            self.search_backend = Some(SearchBackendConfig {
                project_id,
                location: std::env::var("VERTEX_LOCATION").unwrap_or_else(|_| "us".to_string()),
                data_store_id,
                access_token: std::env::var("GCP_ACCESS_TOKEN").ok(),
            });
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AgentConfig> {
        let defaults = AgentConfig::default();

        let config = AgentConfig {
            provider_api_key: self.provider_api_key,
            search_backend: self.search_backend,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert!(config.provider_api_key.is_none());
        assert!(!config.search_enabled());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = AgentConfig::builder()
            .provider_api_key("test_key")
            .request_timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(config.provider_api_key.as_deref(), Some("test_key"));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_search_backend_enables_capability() {
        let config = AgentConfig::builder()
            .search_backend(SearchBackendConfig {
                project_id: "my-project".to_string(),
                location: "us".to_string(),
                data_store_id: "research-store".to_string(),
                access_token: None,
            })
            .build()
            .unwrap();

        assert!(config.search_enabled());
    }

    #[test]
    fn test_validation_rejects_empty_backend_identity() {
        let config = AgentConfig {
            search_backend: Some(SearchBackendConfig {
                project_id: String::new(),
                location: "us".to_string(),
                data_store_id: "research-store".to_string(),
                access_token: None,
            }),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AgentConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }
}
