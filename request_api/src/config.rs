//! Static client configuration: base URL, timeout and credential policy.

use std::time::Duration;

use url::Url;

use crate::ConfigError;

/// Base URL used when `REQUEST_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Timeout used when `REQUEST_TIMEOUT_MS` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

pub const BASE_URL_VAR: &str = "REQUEST_BASE_URL";
pub const TIMEOUT_VAR: &str = "REQUEST_TIMEOUT_MS";
pub const WITH_CREDENTIALS_VAR: &str = "REQUEST_WITH_CREDENTIALS";

/// Immutable settings applied to every request a [`crate::Client`] sends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
    with_credentials: bool,
}

impl ClientConfig {
    /// Creates a config with credentials enabled.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        validate_base_url(base_url)?;
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self {
            base_url: base_url.to_string(),
            timeout,
            with_credentials: true,
        })
    }

    /// Reads the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Unset variables
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidValue {
                    name: TIMEOUT_VAR,
                    value: raw,
                })?,
            None => DEFAULT_TIMEOUT,
        };

        let with_credentials = match lookup(WITH_CREDENTIALS_VAR) {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                name: WITH_CREDENTIALS_VAR,
                value: raw,
            })?,
            None => true,
        };

        Ok(Self::new(&base_url, timeout)?.with_credentials(with_credentials))
    }

    /// Replaces the timeout. A zero timeout is rejected.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Enables or disables sending and storing cookies.
    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn sends_credentials(&self) -> bool {
        self.with_credentials
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };
    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {}", other))),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.sends_credentials());
    }

    #[test]
    fn reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (BASE_URL_VAR, "https://api.example.com/v1"),
            (TIMEOUT_VAR, "2500"),
            (WITH_CREDENTIALS_VAR, "false"),
        ]))
        .unwrap();
        assert_eq!(config.base_url(), "https://api.example.com/v1");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert!(!config.sends_credentials());
    }

    #[test]
    fn rejects_malformed_timeout() {
        let err = ClientConfig::from_lookup(lookup_from(&[(TIMEOUT_VAR, "10s")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: TIMEOUT_VAR,
                value: "10s".to_string()
            }
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ClientConfig::from_lookup(lookup_from(&[(TIMEOUT_VAR, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroTimeout);
    }

    #[test]
    fn rejects_unknown_boolean() {
        let err = ClientConfig::from_lookup(lookup_from(&[(WITH_CREDENTIALS_VAR, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name, .. } if name == WITH_CREDENTIALS_VAR));
    }

    #[test]
    fn rejects_relative_and_non_http_base_urls() {
        assert!(matches!(
            ClientConfig::new("/api", DEFAULT_TIMEOUT),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://files.example.com", DEFAULT_TIMEOUT),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn builder_setters() {
        let config = ClientConfig::new("https://example.com", DEFAULT_TIMEOUT)
            .unwrap()
            .with_credentials(false)
            .with_timeout(Duration::from_secs(3))
            .unwrap();
        assert!(!config.sends_credentials());
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(config.clone().with_timeout(Duration::ZERO).is_err());
    }
}
