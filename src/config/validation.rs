use crate::constants::rate_limit::MAX_REQUEST_INTERVAL_MS;
use crate::constants::workers::MAX_WORKERS_LIMIT;
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API domain cannot be empty
/// - API domain must be a valid URL or domain name
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
/// - Worker pool size must be between 1 and `MAX_WORKERS_LIMIT`
/// - HTTP timeout must be positive
pub fn validate_config(
    api_domain: &str,
    log_file_path: &Option<String>,
    max_workers: usize,
    http_timeout_seconds: u64,
) -> Result<(), AppError> {
    if api_domain.is_empty() {
        return Err(AppError::config_error("API domain cannot be empty"));
    }

    if !api_domain.starts_with("http://")
        && !api_domain.starts_with("https://")
        && !api_domain.contains('.')
        && !api_domain.starts_with("localhost")
    {
        return Err(AppError::config_error(
            "API domain must be a valid URL or domain name",
        ));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    if max_workers == 0 || max_workers > MAX_WORKERS_LIMIT {
        return Err(AppError::config_error(format!(
            "max_workers must be between 1 and {MAX_WORKERS_LIMIT}, got {max_workers}"
        )));
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error("HTTP timeout must be positive"));
    }

    Ok(())
}

/// Validates request pacing and the pagination safety ceiling
///
/// The interval may be zero (no pacing) but not above `MAX_REQUEST_INTERVAL_MS`.
/// A zero ceiling would stop every listing after its first page.
pub fn validate_pacing(
    min_request_interval_ms: u64,
    pagination_ceiling: u32,
) -> Result<(), AppError> {
    if min_request_interval_ms > MAX_REQUEST_INTERVAL_MS {
        return Err(AppError::config_error(format!(
            "min_request_interval_ms must be at most {MAX_REQUEST_INTERVAL_MS}, got {min_request_interval_ms}"
        )));
    }

    if pagination_ceiling == 0 {
        return Err(AppError::config_error("pagination_ceiling must be positive"));
    }

    Ok(())
}
