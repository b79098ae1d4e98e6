use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

const MIN_API_KEY_CHARS: usize = 10;

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub google_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub content_cache_capacity: usize,
    pub content_cache_ttl: Duration,
    pub fetch_timeout: Duration,
    pub model_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let google_api_key = require(&lookup, "GOOGLE_API_KEY")?;
        if google_api_key.trim().chars().count() < MIN_API_KEY_CHARS {
            bail!("GOOGLE_API_KEY looks invalid (expected at least {MIN_API_KEY_CHARS} characters)");
        }

        let content_cache_capacity: usize = optional(&lookup, "CONTENT_CACHE_CAPACITY", 256)?;
        if content_cache_capacity == 0 {
            bail!("CONTENT_CACHE_CAPACITY must be greater than zero");
        }

        Ok(Config {
            database_url: require(&lookup, "DATABASE_URL")?,
            google_api_key,
            port: optional(&lookup, "PORT", 8000)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            content_cache_capacity,
            content_cache_ttl: Duration::from_secs(optional(&lookup, "CONTENT_CACHE_TTL_SECS", 3600)?),
            fetch_timeout: Duration::from_secs(optional(&lookup, "FETCH_TIMEOUT_SECS", 10)?),
            model_timeout: Duration::from_secs(optional(&lookup, "MODEL_TIMEOUT_SECS", 60)?),
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/verify"),
        ("GOOGLE_API_KEY", "AIzaSyTestKey123"),
    ];

    #[test]
    fn test_defaults() {
        let config = config_from(&REQUIRED).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.content_cache_capacity, 256);
        assert_eq!(config.content_cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.model_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "9000"));
        vars.push(("CONTENT_CACHE_CAPACITY", "16"));
        vars.push(("FETCH_TIMEOUT_SECS", "3"));
        let config = config_from(&vars).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.content_cache_capacity, 16);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_missing_database_url() {
        let err = config_from(&[("GOOGLE_API_KEY", "AIzaSyTestKey123")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_short_api_key_is_rejected() {
        let err = config_from(&[("DATABASE_URL", "postgres://x"), ("GOOGLE_API_KEY", "abc")])
            .unwrap_err();
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_zero_cache_capacity_is_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("CONTENT_CACHE_CAPACITY", "0"));
        assert!(config_from(&vars).is_err());
    }

    #[test]
    fn test_malformed_port_is_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("PORT", "eighty"));
        let err = config_from(&vars).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
