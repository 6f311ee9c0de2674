//! Try-on API HTTP client.

use std::time::{Duration, Instant};

use reqwest::multipart::Form;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use tryon_models::{SubmissionRequest, SubmissionResult};
use url::Url;

use crate::credential::Credential;
use crate::error::{ClientError, ClientResult};
use crate::metrics::record_submission;
use crate::types::{ApiResponse, TryOnOutput};

/// The try-on API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://changeclothesai.online/api/openapi/change-clothes-ai";

/// Default overall request timeout. Generation routinely takes minutes.
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Configuration for the try-on client.
#[derive(Debug, Clone)]
pub struct TryOnClientConfig {
    /// Endpoint URL
    pub endpoint: String,
    /// Overall timeout covering connect, send and response body
    pub timeout: Duration,
}

impl Default for TryOnClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TryOnClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        let config = Self {
            endpoint: std::env::var("TRYON_API_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            timeout: Duration::from_secs(
                std::env::var("TRYON_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| ClientError::config(format!("Invalid TRYON_API_URL: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::config(format!(
                "Unsupported endpoint scheme: {}",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::config("Timeout must be greater than zero"));
        }
        Ok(())
    }
}

/// Client for the try-on API.
///
/// Holds no per-request state; each call is an independent exchange.
pub struct TryOnClient {
    http: Client,
    config: TryOnClientConfig,
}

impl TryOnClient {
    /// Create a new try-on client.
    pub fn new(config: TryOnClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(TryOnClientConfig::from_env()?)
    }

    pub fn config(&self) -> &TryOnClientConfig {
        &self.config
    }

    /// Submit a request and map every outcome into a [`SubmissionResult`].
    ///
    /// Never fails: HTTP errors, timeouts and transport failures are carried
    /// in `SubmissionResult::error`.
    pub async fn submit(
        &self,
        request: &SubmissionRequest,
        credential: &Credential,
    ) -> SubmissionResult {
        let started = Instant::now();

        let result = match self.send(request, credential).await {
            Ok(output) => SubmissionResult::success(output.result_image_url, output.mask_image_url),
            Err(e) => {
                warn!("Try-on request failed: {}", e);
                SubmissionResult::failure(e.into_failure())
            }
        };

        let elapsed = started.elapsed();
        let outcome = result.outcome().as_str();
        record_submission(outcome, elapsed.as_secs_f64() * 1000.0);
        info!(outcome, elapsed_ms = elapsed.as_millis() as u64, "Try-on request finished");

        result
    }

    /// Submit a request, returning the typed error on failure.
    ///
    /// Exactly one attempt is made.
    pub async fn send(
        &self,
        request: &SubmissionRequest,
        credential: &Credential,
    ) -> ClientResult<TryOnOutput> {
        let form = build_form(request);
        let timeout_secs = self.config.timeout.as_secs();

        debug!(
            category = %request.category,
            garment_remote = request.garment_image.is_remote(),
            has_description = request.description.is_some(),
            "Sending try-on request to {}",
            self.config.endpoint
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(credential.expose())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, timeout_secs))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) if e.is_timeout() => return Err(ClientError::Timeout(timeout_secs)),
                Err(e) => {
                    debug!("Failed to read error body: {}", e);
                    String::new()
                }
            };
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::from_reqwest(e, timeout_secs))?;

        let parsed: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("Expected JSON body: {}", e)))?;

        Ok(parsed.into())
    }
}

/// Multipart form in field order; absent fields are never sent empty.
fn build_form(request: &SubmissionRequest) -> Form {
    request
        .form_fields()
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_defaults() {
        let config = TryOnClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.endpoint.starts_with("https://"));
        assert_eq!(config.timeout, Duration::from_secs(180));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_endpoint() {
        let config = TryOnClientConfig {
            endpoint: "changeclothesai.online".to_string(),
            ..TryOnClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));

        let config = TryOnClientConfig {
            endpoint: "ftp://changeclothesai.online".to_string(),
            ..TryOnClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        let config = TryOnClientConfig {
            timeout: Duration::ZERO,
            ..TryOnClientConfig::default()
        };
        assert!(TryOnClient::new(config).is_err());
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        std::env::set_var("TRYON_API_URL", "http://localhost:9000/tryon");
        std::env::set_var("TRYON_TIMEOUT_SECS", "120");

        let config = TryOnClientConfig::from_env().unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/tryon");
        assert_eq!(config.timeout, Duration::from_secs(120));

        std::env::remove_var("TRYON_API_URL");
        std::env::remove_var("TRYON_TIMEOUT_SECS");
    }
}
