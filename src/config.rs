//! Configuration management

use std::path::PathBuf;

use anyhow::{self, Context, Result};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directions endpoint URL (optional, falls back to the route table)
    pub directions_url: Option<String>,

    /// API key sent with Directions requests
    pub directions_api_key: Option<String>,

    /// Upper bound on the whole route lookup, in seconds
    pub route_timeout_seconds: u64,

    /// JSON route table used when no Directions service is configured
    pub route_table_path: Option<PathBuf>,

    /// Directory for rotating log files
    pub logs_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directions_url: None,
            directions_api_key: None,
            route_timeout_seconds: 30,
            route_table_path: None,
            logs_dir: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let directions_url = non_empty_var("DIRECTIONS_URL");
        let directions_api_key = non_empty_var("DIRECTIONS_API_KEY");

        if directions_url.is_some() && directions_api_key.is_none() {
            anyhow::bail!("DIRECTIONS_API_KEY must be set when DIRECTIONS_URL is configured");
        }

        let route_timeout_seconds = match std::env::var("ROUTE_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("ROUTE_TIMEOUT_SECONDS must be a whole number (got {:?})", raw))?,
            Err(_) => 30,
        };
        if route_timeout_seconds == 0 {
            anyhow::bail!("ROUTE_TIMEOUT_SECONDS must be greater than 0");
        }

        let route_table_path = non_empty_var("ROUTE_TABLE_PATH").map(PathBuf::from);

        let logs_dir = std::env::var("LOGS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        Ok(Self {
            directions_url,
            directions_api_key,
            route_timeout_seconds,
            route_table_path,
            logs_dir,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert!(config.directions_url.is_none());
        assert_eq!(config.route_timeout_seconds, 30);
        assert_eq!(config.logs_dir, PathBuf::from("logs"));
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_directions_url_requires_key() {
        std::env::set_var("DIRECTIONS_URL", "http://localhost:8080/directions/json");
        std::env::remove_var("DIRECTIONS_API_KEY");

        let result = Config::from_env();
        assert!(result.is_err());

        std::env::remove_var("DIRECTIONS_URL");
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_rejects_bad_timeout() {
        std::env::set_var("ROUTE_TIMEOUT_SECONDS", "soon");
        assert!(Config::from_env().is_err());

        std::env::set_var("ROUTE_TIMEOUT_SECONDS", "0");
        assert!(Config::from_env().is_err());

        std::env::remove_var("ROUTE_TIMEOUT_SECONDS");
    }

    #[test]
    fn test_non_empty_var_ignores_blank() {
        std::env::set_var("ELD_TEST_BLANK_VAR", "  ");
        assert!(non_empty_var("ELD_TEST_BLANK_VAR").is_none());
        std::env::remove_var("ELD_TEST_BLANK_VAR");
    }
}
