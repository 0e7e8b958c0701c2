use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod user_prompts;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::{validate_config, validate_pacing};

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the federation service. Should include https:// prefix.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Minimum spacing between two outbound requests, shared by all workers.
    #[serde(default = "default_min_request_interval")]
    pub min_request_interval_ms: u64,
    /// Number of leagues fetched concurrently.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    /// League listing offset after which a subdivision is abandoned.
    #[serde(default = "default_pagination_ceiling")]
    pub pagination_ceiling: u32,
}

fn default_api_domain() -> String {
    constants::DEFAULT_API_DOMAIN.to_string()
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_min_request_interval() -> u64 {
    constants::rate_limit::MIN_REQUEST_INTERVAL_MS
}

fn default_max_workers() -> usize {
    constants::workers::DEFAULT_MAX_WORKERS
}

fn default_pagination_ceiling() -> u32 {
    constants::pagination::DEFAULT_OFFSET_CEILING
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: default_api_domain(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            min_request_interval_ms: default_min_request_interval(),
            max_workers: default_max_workers(),
            pagination_ceiling: default_pagination_ceiling(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Falls back to built-in defaults when no config file exists.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `BBB_API_DOMAIN` - Override API domain
    /// - `BBB_LOG_FILE` - Override log file path
    /// - `BBB_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `BBB_MAX_WORKERS` - Override the worker pool size
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `BBB_*` environment overrides on top of the loaded values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            self.api_domain = api_domain;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Some(workers) = std::env::var(env_vars::MAX_WORKERS)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
        {
            self.max_workers = workers;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(
            &self.api_domain,
            &self.log_file_path,
            self.max_workers,
            self.http_timeout_seconds,
        )?;
        validate_pacing(self.min_request_interval_ms, self.pagination_ceiling)
    }

    /// Base URL without trailing slash, with an https:// prefix added when no scheme is given.
    pub fn base_url(&self) -> String {
        let domain = self.api_domain.trim().trim_end_matches('/');
        if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        }
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();
        let config = Config::load().await?;

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        if Path::new(&config_path).exists() {
            println!("{config_path}");
        } else {
            println!("{config_path} (not created yet, using defaults)");
        }
        println!("────────────────────────────────────");
        println!("API Domain:");
        println!("{}", config.api_domain);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Request Spacing / Workers:");
        println!(
            "{} ms / {} workers",
            config.min_request_interval_ms, config.max_workers
        );
        println!("────────────────────────────────────");
        println!("Pagination Ceiling:");
        println!("{}", config.pagination_ceiling);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/bbb_club_discovery.log");
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and ensures the API
    /// domain has the proper https:// prefix.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let api_domain = if !self.api_domain.starts_with("https://") {
            format!("https://{}", self.api_domain.trim_start_matches("http://"))
        } else {
            self.api_domain.clone()
        };
        let content = toml::to_string_pretty(&Config {
            api_domain,
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();

        let config_content = r#"
api_domain = "https://api.example.com"
log_file_path = "/custom/log/path"
max_workers = 8
"#;
        tokio::fs::write(&config_path, config_content)
            .await
            .unwrap();

        let config = Config::load_from_path(&config_path_str).await.unwrap();

        assert_eq!(config.api_domain, "https://api.example.com");
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
        assert_eq!(config.max_workers, 8);
        assert_eq!(config.http_timeout_seconds, default_http_timeout());
        assert_eq!(config.pagination_ceiling, default_pagination_ceiling());
    }

    #[tokio::test]
    async fn test_config_empty_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "").await.unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let config = Config {
            api_domain: "api.example.com".to_string(),
            log_file_path: Some("/tmp/discovery.log".to_string()),
            min_request_interval_ms: 250,
            ..Config::default()
        };

        config.save_to_path(&config_path_str).await.unwrap();
        assert!(config_path.exists());

        let loaded = Config::load_from_path(&config_path_str).await.unwrap();
        assert_eq!(loaded.api_domain, "https://api.example.com");
        assert_eq!(loaded.log_file_path, Some("/tmp/discovery.log".to_string()));
        assert_eq!(loaded.min_request_interval_ms, 250);
    }

    #[tokio::test]
    async fn test_config_malformed_toml_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "api_domain = [unterminated")
            .await
            .unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy()).await;
        assert!(matches!(result.unwrap_err(), AppError::TomlDeserialize(_)));
    }

    #[test]
    fn test_config_without_log_file_path_serialization() {
        let config = Config::default();
        let toml_string = toml::to_string(&config).unwrap();
        assert!(!toml_string.contains("log_file_path"));

        let deserialized: Config = toml::from_str(&toml_string).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_base_url_normalization() {
        let mut config = Config::default();
        assert_eq!(config.base_url(), "https://www.basketball-bund.net");

        config.api_domain = "www.basketball-bund.net/".to_string();
        assert_eq!(config.base_url(), "https://www.basketball-bund.net");

        config.api_domain = "http://127.0.0.1:8080".to_string();
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    #[serial]
    fn test_env_overrides_take_precedence() {
        // SAFETY: serialized test, no other thread touches these variables
        unsafe {
            std::env::set_var(env_vars::API_DOMAIN, "https://override.example.com");
            std::env::set_var(env_vars::MAX_WORKERS, "12");
            std::env::set_var(env_vars::HTTP_TIMEOUT, "not-a-number");
        }

        let mut config = Config::default();
        config.apply_env_overrides();

        unsafe {
            std::env::remove_var(env_vars::API_DOMAIN);
            std::env::remove_var(env_vars::MAX_WORKERS);
            std::env::remove_var(env_vars::HTTP_TIMEOUT);
        }

        assert_eq!(config.api_domain, "https://override.example.com");
        assert_eq!(config.max_workers, 12);
        assert_eq!(config.http_timeout_seconds, default_http_timeout());
    }

    #[test]
    fn test_config_validation_rejects_zero_workers() {
        let config = Config {
            max_workers: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_config_validation_rejects_zero_ceiling() {
        let config = Config {
            pagination_ceiling: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
        assert!(Config::default().validate().is_ok());
    }
}
