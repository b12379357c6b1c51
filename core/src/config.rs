//! Client configuration read from the environment.

use std::env;

use thiserror::Error;
use tracing::info;

use crate::identity::FALLBACK_CONTACT;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API URL must start with http:// or https://, got '{0}'")]
    InvalidApiUrl(String),

    #[error("fallback contact '{0}' is not an email address")]
    InvalidFallbackContact(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backing API, up to and including `/api`.
    pub api_url: String,
    /// Contact recorded on items posted without a signed-in user.
    pub fallback_contact: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fallback_contact: FALLBACK_CONTACT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Read `LOSTFOUND_API_URL` and `LOSTFOUND_FALLBACK_CONTACT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults for
    /// anything unset or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            api_url: load(&lookup, "LOSTFOUND_API_URL", DEFAULT_API_URL),
            fallback_contact: load(&lookup, "LOSTFOUND_FALLBACK_CONTACT", FALLBACK_CONTACT),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace the API URL, e.g. from a command-line flag.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.api_url = api_url.into();
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        if !self.fallback_contact.contains('@') {
            return Err(ConfigError::InvalidFallbackContact(self.fallback_contact.clone()));
        }
        Ok(())
    }
}

fn load<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_string()) {
        Some(value) if !value.is_empty() => value,
        _ => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, "http://localhost:8000/api");
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("LOSTFOUND_API_URL", "https://lostfound.umt.edu/api"),
            ("LOSTFOUND_FALLBACK_CONTACT", "desk@umt.edu"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://lostfound.umt.edu/api");
        assert_eq!(config.fallback_contact, "desk@umt.edu");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[("LOSTFOUND_API_URL", "  ")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn rejects_non_http_url() {
        let err = ClientConfig::from_lookup(lookup(&[("LOSTFOUND_API_URL", "ftp://x")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidApiUrl("ftp://x".to_string()));
    }

    #[test]
    fn with_api_url_validates() {
        assert!(ClientConfig::default().with_api_url("localhost:8000").is_err());
        let config = ClientConfig::default()
            .with_api_url("http://127.0.0.1:9000/api")
            .unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:9000/api");
    }
}
