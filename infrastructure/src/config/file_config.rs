//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to runtime types where used.

use biznisweb_domain::StatusExclusion;
use biznisweb_domain::reshape::statistics::DEFAULT_EXCLUDED_STATUS_LABELS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://www.vevo.sk/api/graphql";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_LANG_CODE: &str = "sk";

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("API token is not set (use [api] token or BIZNISWEB_API_TOKEN)")]
    MissingToken,

    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("API url cannot be empty")]
    EmptyUrl,
}

/// Validated runtime configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub api_token: String,
    pub timeout: Duration,
    pub lang_code: String,
    pub status_exclusion: StatusExclusion,
    pub invocation_log: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Upstream connection settings
    pub api: FileApiConfig,
    /// Order statistics settings
    pub statistics: FileStatisticsConfig,
    /// Invocation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Check the settings the server cannot start without.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyUrl);
        }
        if self.api.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.api.token().is_none() {
            return Err(ConfigValidationError::MissingToken);
        }
        Ok(())
    }

    /// Validate and resolve into an [`AppConfig`].
    pub fn to_app_config(&self) -> Result<AppConfig, ConfigValidationError> {
        self.validate()?;
        let api_token = self
            .api
            .token()
            .ok_or(ConfigValidationError::MissingToken)?
            .to_string();

        Ok(AppConfig {
            api_url: self.api.url.trim().to_string(),
            api_token,
            timeout: self.api.timeout(),
            lang_code: self.api.lang_code.clone(),
            status_exclusion: self.statistics.to_status_exclusion(),
            invocation_log: self.logging.invocation_log.clone(),
        })
    }
}

/// Raw `[api]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// GraphQL endpoint URL
    pub url: String,
    /// API token, sent as `BW-API-Key: Token <token>`
    pub token: Option<String>,
    /// Timeout in seconds for each upstream request
    pub timeout_seconds: u64,
    /// Language code passed to localized operations
    pub lang_code: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            lang_code: DEFAULT_LANG_CODE.to_string(),
        }
    }
}

impl FileApiConfig {
    /// The token, if set and not blank.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Raw `[statistics]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStatisticsConfig {
    /// Stable upstream status ids to exclude
    pub excluded_status_ids: Vec<String>,
    /// Status labels to exclude; consulted for an order only when no ids
    /// are configured or the order carries no status id
    pub excluded_status_labels: Vec<String>,
}

impl Default for FileStatisticsConfig {
    fn default() -> Self {
        Self {
            excluded_status_ids: Vec::new(),
            excluded_status_labels: DEFAULT_EXCLUDED_STATUS_LABELS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl FileStatisticsConfig {
    pub fn to_status_exclusion(&self) -> StatusExclusion {
        StatusExclusion::new(
            self.excluded_status_ids.iter().cloned(),
            self.excluded_status_labels.iter().cloned(),
        )
    }
}

/// Raw `[logging]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one line per tool invocation
    pub invocation_log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
url = "https://shop.example/api/graphql"
token = "secret"
timeout_seconds = 10
lang_code = "cz"

[statistics]
excluded_status_ids = ["7", "9"]
excluded_status_labels = ["Storno"]

[logging]
invocation_log = "/tmp/calls.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.url, "https://shop.example/api/graphql");
        assert_eq!(config.api.token(), Some("secret"));
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.api.lang_code, "cz");
        assert_eq!(config.statistics.excluded_status_ids, vec!["7", "9"]);
        assert_eq!(
            config.logging.invocation_log,
            Some(PathBuf::from("/tmp/calls.jsonl"))
        );
        assert!(config.validate().is_ok());

        let app = config.to_app_config().unwrap();
        assert_eq!(app.api_token, "secret");
        assert_eq!(app.timeout, Duration::from_secs(10));
        assert_eq!(app.status_exclusion.ids().count(), 2);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[api]\ntoken = \"t\"\n").unwrap();

        // Defaults should apply
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.api.lang_code, "sk");
        assert_eq!(config.statistics.excluded_status_labels.len(), 5);
        assert!(config.logging.invocation_log.is_none());
    }

    #[test]
    fn test_validate_missing_token() {
        let config = FileConfig::default();
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingToken));

        let mut blank = FileConfig::default();
        blank.api.token = Some("   ".to_string());
        assert_eq!(blank.validate(), Err(ConfigValidationError::MissingToken));
    }

    #[test]
    fn test_validate_timeout_and_url() {
        let mut config = FileConfig::default();
        config.api.token = Some("t".to_string());

        config.api.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        config.api.timeout_seconds = 5;
        config.api.url = String::new();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyUrl));
    }

    #[test]
    fn test_status_exclusion_from_config() {
        let config: FileConfig = toml::from_str(
            r#"
[statistics]
excluded_status_ids = ["12"]
excluded_status_labels = []
"#,
        )
        .unwrap();

        let exclusion = config.statistics.to_status_exclusion();
        assert!(exclusion.is_excluded(&json!({"status": {"id": 12, "name": "Storno"}})));
        assert!(!exclusion.is_excluded(&json!({"status": {"id": 3, "name": "Storno"}})));
    }
}
