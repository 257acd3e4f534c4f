//! Configuration for the WrapFast API client
//!
//! The client never reads globals at call time: everything it needs is
//! captured here once and injected at construction.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

/// Base URL of a backend running on the local machine
const DEFAULT_DEVELOPMENT_URL: &str = "http://localhost:10000/";

/// Identifier sent in `X-App-Identifier` so the backend knows which app is calling
const DEFAULT_APP_IDENTIFIER: &str = "wrapfast";

/// Requests are allowed this long before the transport gives up
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

/// Pause before the single retry that follows a 401
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Backend running locally
    #[default]
    Development,
    /// Hosted backend
    Production,
}

impl Environment {
    /// Parse from the `WRAPFAST_ENV` environment variable
    #[must_use]
    pub fn from_env() -> Self {
        match env::var("WRAPFAST_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" | "release" => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Shared secret used to sign the authentication request
    pub auth_key: String,
    /// Value of the `X-App-Identifier` header
    pub app_identifier: String,
    /// Per-request timeout
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
    /// Delay before retrying a request rejected with 401
    #[serde(with = "duration_secs")]
    pub retry_delay: Duration,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("auth_key", &"<redacted>")
            .field("app_identifier", &self.app_identifier)
            .field("request_timeout", &self.request_timeout)
            .field("retry_delay", &self.retry_delay)
            .field("environment", &self.environment)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `WRAPFAST_ENV`: Environment (development/production)
    /// - `WRAPFAST_API_URL`: Base URL (required in production)
    /// - `WRAPFAST_AUTH_KEY`: Shared signing secret for the auth endpoint
    /// - `WRAPFAST_APP_IDENTIFIER`: Value of the `X-App-Identifier` header
    /// - `WRAPFAST_TIMEOUT_SECS`: Request timeout in seconds
    /// - `WRAPFAST_RETRY_DELAY_SECS`: Delay before the 401 retry in seconds
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_base_url(None)
    }

    /// Like [`from_env`](Self::from_env), but an explicit `base_url` takes
    /// precedence over `WRAPFAST_API_URL` and satisfies the production requirement
    pub fn from_env_with_base_url(base_url: Option<&str>) -> Result<Self, ConfigError> {
        let environment = Environment::from_env();

        let base_url = match (base_url, env::var("WRAPFAST_API_URL"), environment) {
            (Some(url), _, _) => url.to_string(),
            (None, Ok(url), _) => url,
            (None, Err(_), Environment::Development) => DEFAULT_DEVELOPMENT_URL.to_string(),
            (None, Err(_), Environment::Production) => {
                return Err(ConfigError::missing_env("WRAPFAST_API_URL"));
            }
        };

        let auth_key = env::var("WRAPFAST_AUTH_KEY").unwrap_or_default();
        let app_identifier = env::var("WRAPFAST_APP_IDENTIFIER")
            .unwrap_or_else(|_| DEFAULT_APP_IDENTIFIER.to_string());

        let request_timeout = secs_from_env("WRAPFAST_TIMEOUT_SECS").unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let retry_delay = secs_from_env("WRAPFAST_RETRY_DELAY_SECS").unwrap_or(DEFAULT_RETRY_DELAY);

        let config = Self {
            base_url,
            auth_key,
            app_identifier,
            request_timeout,
            retry_delay,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create development configuration (local backend)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: DEFAULT_DEVELOPMENT_URL.to_string(),
            auth_key: String::new(),
            app_identifier: DEFAULT_APP_IDENTIFIER.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry_delay: DEFAULT_RETRY_DELAY,
            environment: Environment::Development,
        }
    }

    /// Create production configuration for a hosted backend
    #[must_use]
    pub fn production(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            environment: Environment::Production,
            ..Self::development()
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the auth signing secret
    #[must_use]
    pub fn with_auth_key(mut self, key: impl Into<String>) -> Self {
        self.auth_key = key.into();
        self
    }

    /// Builder-style method to set the app identifier
    #[must_use]
    pub fn with_app_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.app_identifier = identifier.into();
        self
    }

    /// Builder-style method to set the request timeout
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builder-style method to set the 401 retry delay
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::invalid("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::invalid(
                "base_url must start with http:// or https://",
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::invalid("request_timeout cannot be zero"));
        }

        if self.app_identifier.is_empty() {
            return Err(ConfigError::invalid("app_identifier cannot be empty"));
        }

        Ok(())
    }
}

fn secs_from_env(var: &str) -> Option<Duration> {
    env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:10000/");
        assert_eq!(config.app_identifier, "wrapfast");
        assert_eq!(config.request_timeout, Duration::from_secs(180));
        assert_eq!(config.retry_delay, Duration::from_secs(2));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_production_config() {
        let config = ClientConfig::production("https://api.example.com/");
        assert_eq!(config.base_url, "https://api.example.com/");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.request_timeout, Duration::from_secs(180));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("https://backend.example.com/")
            .with_auth_key("secret")
            .with_retry_delay(Duration::from_millis(10));

        assert_eq!(config.base_url, "https://backend.example.com/");
        assert_eq!(config.auth_key, "secret");
        assert_eq!(config.retry_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default()
            .with_base_url("ftp://example.com")
            .validate()
            .is_err());
        assert!(ClientConfig::default()
            .with_request_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_base_url_override_wins() {
        let config = ClientConfig::from_env_with_base_url(Some("https://override.example.com/"))
            .unwrap();
        assert_eq!(config.base_url, "https://override.example.com/");

        assert!(matches!(
            ClientConfig::from_env_with_base_url(Some("localhost:10000")),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_debug_redacts_auth_key() {
        let config = ClientConfig::default().with_auth_key("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_serde_roundtrip_durations() {
        let config = ClientConfig::default().with_retry_delay(Duration::from_millis(1500));
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.retry_delay, Duration::from_millis(1500));
        assert_eq!(parsed.request_timeout, Duration::from_secs(180));
    }
}
