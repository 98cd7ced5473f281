//! Application configuration loaded from environment variables.
//!
//! The API credential is read once at startup and handed to the client
//! explicitly; nothing reads it from the environment afterwards.

use crate::services::points::MAX_HISTORY_DAYS;
use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Pages database API ---
    /// Bearer credential (empty when serving from fixtures)
    pub notion_api_key: String,
    /// API base URL
    pub notion_api_url: String,
    /// Value of the `Notion-Version` header
    pub notion_version: String,
    /// Per-request timeout for API calls
    pub provider_timeout_secs: u64,

    // --- Server ---
    /// Server port
    pub port: u16,

    // --- Dashboard ---
    /// Number of days in the daily history chart
    pub history_days: u32,
    /// Serve pages from this JSON fixture instead of the live API
    pub fixture_path: Option<PathBuf>,
}

const DEFAULT_API_URL: &str = "https://api.notion.com/v1";
const DEFAULT_API_VERSION: &str = "2022-06-28";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HISTORY_DAYS: u32 = 30;

impl Config {
    /// Config for tests: offline, nothing read from the environment.
    pub fn test_default() -> Self {
        Self {
            notion_api_key: "test_api_key".to_string(),
            notion_api_url: "http://127.0.0.1:9/v1".to_string(),
            notion_version: DEFAULT_API_VERSION.to_string(),
            provider_timeout_secs: 5,
            port: 8080,
            history_days: DEFAULT_HISTORY_DAYS,
            fixture_path: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `NOTION_API_KEY` is required unless `POINTS_FIXTURE_PATH` is set.
    /// `HISTORY_DAYS` must be between 1 and [`MAX_HISTORY_DAYS`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let fixture_path = env::var("POINTS_FIXTURE_PATH").ok().map(PathBuf::from);
        let notion_api_key = match env::var("NOTION_API_KEY") {
            Ok(key) => key.trim().to_string(),
            Err(_) if fixture_path.is_some() => String::new(),
            Err(_) => return Err(ConfigError::Missing("NOTION_API_KEY")),
        };

        let history_days = parse_or("HISTORY_DAYS", DEFAULT_HISTORY_DAYS)?;
        if !(1..=MAX_HISTORY_DAYS).contains(&history_days) {
            return Err(ConfigError::Invalid("HISTORY_DAYS", history_days.to_string()));
        }

        Ok(Self {
            notion_api_key,
            notion_api_url: env::var("NOTION_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            notion_version: env::var("NOTION_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            provider_timeout_secs: parse_or("PROVIDER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            history_days,
            fixture_path,
        })
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset.
fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the environment is never mutated concurrently
    #[test]
    fn test_config_from_env() {
        env::remove_var("POINTS_FIXTURE_PATH");
        env::remove_var("NOTION_API_KEY");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("NOTION_API_KEY"))
        ));

        env::set_var("NOTION_API_KEY", " secret_abc \n");
        env::set_var("HISTORY_DAYS", "14");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.notion_api_key, "secret_abc");
        assert_eq!(config.history_days, 14);
        assert_eq!(config.provider_timeout_secs, 30);
        assert_eq!(config.notion_version, "2022-06-28");

        for out_of_range in ["0", "367", "200000000"] {
            env::set_var("HISTORY_DAYS", out_of_range);
            assert!(matches!(
                Config::from_env(),
                Err(ConfigError::Invalid("HISTORY_DAYS", value)) if value == out_of_range
            ));
        }
        env::set_var("HISTORY_DAYS", "366");
        assert_eq!(Config::from_env().expect("A year of history is allowed").history_days, 366);

        env::set_var("HISTORY_DAYS", "a month");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("HISTORY_DAYS", _))
        ));
        env::remove_var("HISTORY_DAYS");

        env::remove_var("NOTION_API_KEY");
        env::set_var("POINTS_FIXTURE_PATH", "fixtures/pages.json");
        let config = Config::from_env().expect("Fixture mode needs no key");
        assert_eq!(config.notion_api_key, "");
        assert_eq!(config.fixture_path, Some(PathBuf::from("fixtures/pages.json")));
        env::remove_var("POINTS_FIXTURE_PATH");
    }
}
