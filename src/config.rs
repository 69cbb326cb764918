//! Configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the service
//! is built.
//!
//! ## Optional Variables
//!
//! - `BASE_URL` - Prefix for public short URLs (default: `http://localhost:8081`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `TOP_DOMAINS_LIMIT` - Default number of domains in metrics (default: 3, max: 100)
//! - `CODE_DIGEST` - Digest used for short codes (default: `sha256`)
//! - `STORE_MAX_RECORDS` - Maximum number of stored URLs (default: unlimited)
//!
//! An unknown `CODE_DIGEST` is not a configuration error: the service starts
//! in degraded mode with sequence-based codes.

use anyhow::{Context, Result};
use std::env;

/// Base URL used when `BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// Number of domains returned by default domain metrics.
pub const DEFAULT_TOP_DOMAINS_LIMIT: usize = 3;

const MAX_TOP_DOMAINS_LIMIT: usize = 100;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub top_domains_limit: usize,
    /// Digest name passed to [`crate::utils::code_generator::CodeGenerator::from_algorithm`].
    pub code_digest: String,
    /// Record limit for the in-memory store. `None` means unbounded.
    pub store_max_records: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            top_domains_limit: DEFAULT_TOP_DOMAINS_LIMIT,
            code_digest: "sha256".to_string(),
            store_max_records: None,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but not a number.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let code_digest = env::var("CODE_DIGEST").unwrap_or_else(|_| "sha256".to_string());

        let top_domains_limit =
            parse_optional("TOP_DOMAINS_LIMIT")?.unwrap_or(DEFAULT_TOP_DOMAINS_LIMIT);
        let store_max_records = parse_optional("STORE_MAX_RECORDS")?;

        Ok(Self {
            base_url,
            log_level,
            log_format,
            top_domains_limit,
            code_digest,
            store_max_records,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `base_url` is not an `http://` or `https://` URL
    /// - `log_format` is not `text` or `json`
    /// - `top_domains_limit` is outside 1..=100
    /// - `store_max_records` is zero
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.top_domains_limit == 0 || self.top_domains_limit > MAX_TOP_DOMAINS_LIMIT {
            anyhow::bail!(
                "TOP_DOMAINS_LIMIT must be between 1 and {}, got {}",
                MAX_TOP_DOMAINS_LIMIT,
                self.top_domains_limit
            );
        }

        if self.store_max_records == Some(0) {
            anyhow::bail!("STORE_MAX_RECORDS must be at least 1");
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Code digest: {}", self.code_digest);
        tracing::info!("  Top domains limit: {}", self.top_domains_limit);

        match self.store_max_records {
            Some(limit) => tracing::info!("  Store capacity: {} records", limit),
            None => tracing::info!("  Store capacity: unlimited"),
        }
    }
}

/// Parses an optional numeric variable; unset or empty means `None`.
fn parse_optional(name: &str) -> Result<Option<usize>> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} must be a non-negative integer, got '{value}'")),
        _ => Ok(None),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "BASE_URL",
        "LOG_FORMAT",
        "TOP_DOMAINS_LIMIT",
        "CODE_DIGEST",
        "STORE_MAX_RECORDS",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        assert!(config.validate().is_ok());

        config.base_url = "ftp://files.example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "https://s.example.com".to_string();
        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.top_domains_limit = 0;
        assert!(config.validate().is_err());

        config.top_domains_limit = 101;
        assert!(config.validate().is_err());

        config.top_domains_limit = 3;
        config.store_max_records = Some(0);
        assert!(config.validate().is_err());

        config.store_max_records = Some(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_format, "text");
        assert_eq!(config.top_domains_limit, 3);
        assert_eq!(config.code_digest, "sha256");
        assert!(config.store_max_records.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("BASE_URL", "https://s.example.com");
            env::set_var("TOP_DOMAINS_LIMIT", "5");
            env::set_var("CODE_DIGEST", "sha512");
            env::set_var("STORE_MAX_RECORDS", "1000");
        }

        let config = load_from_env().unwrap();

        assert_eq!(config.base_url, "https://s.example.com");
        assert_eq!(config.top_domains_limit, 5);
        assert_eq!(config.code_digest, "sha512");
        assert_eq!(config.store_max_records, Some(1000));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_limit() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("TOP_DOMAINS_LIMIT", "three");
        }

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("TOP_DOMAINS_LIMIT"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_empty_store_limit_means_unbounded() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("STORE_MAX_RECORDS", "");
        }

        let config = Config::from_env().unwrap();
        assert!(config.store_max_records.is_none());

        clear_env();
    }
}
