//! Runtime configuration, read from the environment.
//!
//! | variable                          | default                      |
//! |-----------------------------------|------------------------------|
//! | `GEMINI_API_KEY`                  | unset (AI features alert)    |
//! | `CONVERTHUB_GEMINI_URL`           | `DEFAULT_GEMINI_ENDPOINT`    |
//! | `CONVERTHUB_API_URL`              | `DEFAULT_BACKEND_URL`        |
//! | `CONVERTHUB_TICK_MS`              | 200                          |
//! | `CONVERTHUB_REQUEST_TIMEOUT_SECS` | unset (no timeout)           |
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::{BackendSettings, CompletionSettings, JobSettings};

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_URL: &str = "CONVERTHUB_GEMINI_URL";
pub const ENV_BACKEND_URL: &str = "CONVERTHUB_API_URL";
pub const ENV_TICK_MS: &str = "CONVERTHUB_TICK_MS";
pub const ENV_REQUEST_TIMEOUT: &str = "CONVERTHUB_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{var} has invalid value {value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct HubConfig {
    pub completion: CompletionSettings,
    pub backend: BackendSettings,
    pub jobs: JobSettings,
}

impl HubConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = HubConfig::default();
        let read = |var: &'static str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        config.completion.api_key = read(ENV_API_KEY);

        if let Some(raw) = read(ENV_GEMINI_URL) {
            Url::parse(&raw).map_err(|err| ConfigError {
                var: ENV_GEMINI_URL,
                value: raw.clone(),
                reason: err.to_string(),
            })?;
            config.completion.endpoint = raw;
        }

        if let Some(raw) = read(ENV_BACKEND_URL) {
            Url::parse(&raw).map_err(|err| ConfigError {
                var: ENV_BACKEND_URL,
                value: raw.clone(),
                reason: err.to_string(),
            })?;
            config.backend.base_url = raw;
        }

        if let Some(raw) = read(ENV_TICK_MS) {
            let millis = parse_positive(ENV_TICK_MS, &raw)?;
            config.jobs.tick_interval = Duration::from_millis(millis);
        }

        if let Some(raw) = read(ENV_REQUEST_TIMEOUT) {
            let secs = parse_positive(ENV_REQUEST_TIMEOUT, &raw)?;
            config.completion.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError {
            var,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Ok(value) => Ok(value),
        Err(err) => Err(ConfigError {
            var,
            value: raw.to_string(),
            reason: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{DEFAULT_BACKEND_URL, DEFAULT_GEMINI_ENDPOINT};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = HubConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.completion.api_key, None);
        assert_eq!(config.completion.endpoint, DEFAULT_GEMINI_ENDPOINT);
        assert_eq!(config.completion.request_timeout, None);
        assert_eq!(config.backend.base_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.jobs.tick_interval, Duration::from_millis(200));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = HubConfig::from_lookup(lookup(&[(ENV_API_KEY, "   ")])).unwrap();
        assert_eq!(config.completion.api_key, None);
    }

    #[test]
    fn overrides_are_applied() {
        let config = HubConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "secret"),
            (ENV_BACKEND_URL, "https://api.example.com/v2"),
            (ENV_GEMINI_URL, "http://127.0.0.1:9000/generate"),
            (ENV_TICK_MS, "50"),
            (ENV_REQUEST_TIMEOUT, "15"),
        ]))
        .unwrap();
        assert_eq!(config.completion.api_key.as_deref(), Some("secret"));
        assert_eq!(config.backend.base_url, "https://api.example.com/v2");
        assert_eq!(config.completion.endpoint, "http://127.0.0.1:9000/generate");
        assert_eq!(config.jobs.tick_interval, Duration::from_millis(50));
        assert_eq!(
            config.completion.request_timeout,
            Some(Duration::from_secs(15))
        );
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = HubConfig::from_lookup(lookup(&[(ENV_TICK_MS, "0")])).unwrap_err();
        assert_eq!(err.var, ENV_TICK_MS);

        let err = HubConfig::from_lookup(lookup(&[(ENV_TICK_MS, "fast")])).unwrap_err();
        assert_eq!(err.var, ENV_TICK_MS);

        let err = HubConfig::from_lookup(lookup(&[(ENV_BACKEND_URL, "nope")])).unwrap_err();
        assert_eq!(err.var, ENV_BACKEND_URL);

        let err = HubConfig::from_lookup(lookup(&[(ENV_GEMINI_URL, "nope")])).unwrap_err();
        assert_eq!(err.var, ENV_GEMINI_URL);
    }
}
