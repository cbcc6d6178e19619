use crate::errors::ConfigError;
use chrono::{DateTime, Utc};
use std::{env, time::Duration};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub store_url: String,
    pub port: u16,
    pub closes_at: Option<DateTime<Utc>>,
    pub store_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_url = lookup("STORE_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingStoreUrl)?;

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let closes_at = match lookup("PORTAL_CLOSES_AT").filter(|value| !value.trim().is_empty()) {
            Some(value) => Some(
                DateTime::parse_from_rfc3339(value.trim())
                    .map_err(|source| ConfigError::InvalidCutoff {
                        value: value.clone(),
                        source,
                    })?
                    .with_timezone(&Utc),
            ),
            None => None,
        };

        let timeout_secs = lookup("STORE_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_STORE_TIMEOUT_SECS)
            .max(1);

        Ok(Self {
            store_url,
            port,
            closes_at,
            store_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_store_is_set() {
        let config = Config::from_lookup(lookup(&[("STORE_URL", "http://store.test/exec")])).unwrap();
        assert_eq!(config.store_url, "http://store.test/exec");
        assert_eq!(config.port, 8080);
        assert!(config.closes_at.is_none());
        assert_eq!(config.store_timeout, Duration::from_secs(20));
    }

    #[test]
    fn store_url_is_required() {
        let err = Config::from_lookup(lookup(&[("STORE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingStoreUrl));
    }

    #[test]
    fn cutoff_is_parsed_as_utc() {
        let config = Config::from_lookup(lookup(&[
            ("STORE_URL", "http://store.test"),
            ("PORTAL_CLOSES_AT", "2026-03-01T17:00:00+05:30"),
            ("PORT", "9000"),
            ("STORE_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();

        assert_eq!(
            config.closes_at.unwrap().to_rfc3339(),
            "2026-03-01T11:30:00+00:00"
        );
        assert_eq!(config.port, 9000);
        assert_eq!(config.store_timeout, Duration::from_secs(1));
    }

    #[test]
    fn malformed_cutoff_is_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("STORE_URL", "http://store.test"),
            ("PORTAL_CLOSES_AT", "tomorrow"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCutoff { .. }));
    }
}
