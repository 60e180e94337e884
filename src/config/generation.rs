//! Generation API configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ValidationError;

/// Placeholder value shipped in `.env.example`; treated the same as an
/// absent credential.
pub const API_KEY_PLACEHOLDER: &str = "REPLACE_ME";

/// Generation API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// API key for the generation endpoint
    pub api_key: Option<String>,

    /// Model to request
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for the generation API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt timeout for package production, in seconds
    #[serde(default = "default_produce_timeout")]
    pub produce_timeout_secs: u64,

    /// Extra attempts after the first for package production
    #[serde(default = "default_produce_retries")]
    pub produce_max_retries: u32,
}

/// Snapshot of credential state, computed once at startup and injected
/// into the HTTP layer.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl GenerationConfig {
    /// Get the produce timeout as a Duration
    pub fn produce_timeout(&self) -> Duration {
        Duration::from_secs(self.produce_timeout_secs)
    }

    /// Check whether a usable credential is present
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.is_empty() && k != API_KEY_PLACEHOLDER)
    }

    /// The credential, or None when missing/placeholder
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty() && *k != API_KEY_PLACEHOLDER)
    }

    /// Compute the status reported by `GET /configuration-status`
    pub fn status(&self) -> ConfigurationStatus {
        if self.is_configured() {
            ConfigurationStatus {
                configured: true,
                reason: None,
            }
        } else {
            ConfigurationStatus {
                configured: false,
                reason: Some("API key missing or not configured".to_string()),
            }
        }
    }

    /// Validate generation configuration
    ///
    /// A missing credential is not a validation error: the server still
    /// boots and reports "not configured" on the status endpoint.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() || !self.base_url.starts_with("http") {
            return Err(ValidationError::InvalidGenerationUrl);
        }
        if self.model.is_empty() {
            return Err(ValidationError::InvalidGenerationModel);
        }
        if self.produce_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            produce_timeout_secs: default_produce_timeout(),
            produce_max_retries: default_produce_retries(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_produce_timeout() -> u64 {
    40
}

fn default_produce_retries() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.produce_timeout_secs, 40);
        assert_eq!(config.produce_max_retries, 1);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_placeholder_key_is_not_configured() {
        let config = GenerationConfig {
            api_key: Some(API_KEY_PLACEHOLDER.to_string()),
            ..Default::default()
        };
        assert!(!config.is_configured());
        assert!(config.credential().is_none());
    }

    #[test]
    fn test_empty_key_is_not_configured() {
        let config = GenerationConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn test_real_key_is_configured() {
        let config = GenerationConfig {
            api_key: Some("AIza-test-key".to_string()),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert_eq!(config.credential(), Some("AIza-test-key"));
    }

    #[test]
    fn test_status_reports_reason_when_missing() {
        let status = GenerationConfig::default().status();
        assert!(!status.configured);
        assert!(status.reason.is_some());

        let status = GenerationConfig {
            api_key: Some("AIza-test-key".to_string()),
            ..Default::default()
        }
        .status();
        assert!(status.configured);
        assert!(status.reason.is_none());
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let config = GenerationConfig {
            base_url: "not-a-url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_missing_key() {
        let config = GenerationConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_produce_timeout_duration() {
        let config = GenerationConfig {
            produce_timeout_secs: 40,
            ..Default::default()
        };
        assert_eq!(config.produce_timeout(), Duration::from_secs(40));
    }
}
