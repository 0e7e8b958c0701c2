//! Rate-limited, retrying transport shared by every outbound call

use rand::Rng;
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, instrument, warn};

use crate::config::Config;
use crate::constants::retry;
use crate::error::AppError;

use super::http_client::create_http_client_with_timeout;

/// Minimum-interval gate. Callers reserve the next free slot under the lock
/// and sleep outside of it, so concurrent workers are spaced evenly.
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until this caller's slot is due.
    pub async fn wait(&self) {
        let slot = {
            let mut next = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = match *next {
                Some(reserved) if reserved > now => reserved,
                _ => now,
            };
            *next = Some(slot + self.min_interval);
            slot
        };
        tokio::time::sleep_until(slot).await;
    }
}

/// Transport for the federation service.
///
/// Every request, whichever worker issues it, passes the same [`RateGate`]
/// and bumps the same request counter. Transient failures (429, 5xx,
/// timeouts, refused connections) are retried with exponential backoff.
#[derive(Debug)]
pub struct RequestGateway {
    client: Client,
    api_domain: String,
    gate: RateGate,
    request_count: AtomicU64,
    max_retries: u32,
}

impl RequestGateway {
    /// Builds a gateway from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(
            client,
            config.base_url(),
            Duration::from_millis(config.min_request_interval_ms),
        ))
    }

    pub fn new(client: Client, api_domain: impl Into<String>, min_interval: Duration) -> Self {
        Self {
            client,
            api_domain: api_domain.into().trim_end_matches('/').to_string(),
            gate: RateGate::new(min_interval),
            request_count: AtomicU64::new(0),
            max_retries: retry::MAX_ATTEMPTS,
        }
    }

    /// Overrides the number of retries for transient failures.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }

    /// Number of requests issued so far, retries included.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        self.send_json::<T, ()>(Method::GET, url, None).await
    }

    pub async fn post_json<T, B>(&self, url: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, url, Some(body)).await
    }

    #[instrument(skip(self, body))]
    async fn send_json<T, B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut attempt = 0u32;
        let mut backoff = Duration::from_millis(retry::BASE_DELAY_MS);

        let response = loop {
            self.gate.wait().await;
            let issued = self.request_count.fetch_add(1, Ordering::Relaxed) + 1;
            debug!("Request #{issued}: {method} {url}");

            let mut request = self.client.request(method.clone(), url);
            if let Some(body) = body {
                request = request.json(body);
            }

            let outcome = match request.send().await {
                Ok(resp) => classify_status(resp, url),
                Err(e) => Err((transport_error(e, url), None)),
            };

            match outcome {
                Ok(resp) => break resp,
                Err((err, retry_after)) if err.is_retryable() && attempt < self.max_retries => {
                    let wait = retry_after.unwrap_or_else(|| jittered(backoff));
                    warn!(
                        "Transient failure for {}: {}. Retrying in {:?} (attempt {}/{})",
                        url,
                        err,
                        wait,
                        attempt + 1,
                        self.max_retries
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                    backoff = backoff.saturating_mul(2);
                }
                Err((err, _)) => {
                    error!("Request failed for URL {}: {}", url, err);
                    return Err(err);
                }
            }
        };

        let response_text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to read response text from URL {}: {}", url, e);
                return Err(AppError::ApiFetch(e));
            }
        };

        debug!("Response length: {} bytes", response_text.len());
        parse_body(&response_text, url)
    }
}

/// Maps a non-success status to an error, with the server's Retry-After hint if any.
fn classify_status(
    response: Response,
    url: &str,
) -> Result<Response, (AppError, Option<Duration>)> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let status_code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown error");
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs);

    debug!("HTTP {} - {} (URL: {})", status_code, reason, url);

    let err = match status_code {
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(status_code, reason, url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
        _ => AppError::api_server_error(status_code, reason, url),
    };
    Err((err, retry_after))
}

fn transport_error(e: reqwest::Error, url: &str) -> AppError {
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

fn jittered(delay: Duration) -> Duration {
    let factor = 1.0 + rand::rng().random_range(-retry::JITTER_FRACTION..=retry::JITTER_FRACTION);
    delay.mul_f64(factor)
}

/// Parses a response body, telling apart empty, non-JSON and wrongly shaped payloads.
fn parse_body<T: DeserializeOwned>(text: &str, url: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            let trimmed = text.trim_start();
            if trimmed.is_empty() {
                Err(AppError::api_no_data("Response body is empty", url))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(AppError::api_malformed_json("Response is not valid JSON", url))
            } else {
                warn!(
                    "Unexpected payload from {}: {} (first 200 chars: {})",
                    url,
                    e,
                    text.chars().take(200).collect::<String>()
                );
                Err(AppError::api_unexpected_structure(e.to_string(), url))
            }
        }
    }
}
