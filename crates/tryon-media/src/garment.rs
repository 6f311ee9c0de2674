//! Garment image resolution.
//!
//! An uploaded garment goes through the same pipeline as the model image and
//! is submitted inline. A garment URL is fetched only to validate it and build
//! a local preview; the URL itself is what gets submitted, so the API fetches
//! the full-size original directly.

use metrics::counter;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info, warn};
use tryon_models::{EncodedImage, RemoteImageRef};
use url::Url;

use crate::config::{MediaConfig, FETCH_USER_AGENT};
use crate::error::{MediaError, MediaResult};
use crate::normalize::{Image, ImageNormalizer};

const FETCH_METRIC: &str = "tryon_garment_fetch_total";

/// Resolves garment images from uploads or remote URLs.
pub struct GarmentSource {
    http: Client,
    normalizer: ImageNormalizer,
    config: MediaConfig,
}

impl GarmentSource {
    /// Create a new garment source.
    pub fn new(config: MediaConfig) -> MediaResult<Self> {
        let http = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(FETCH_USER_AGENT)
            .build()
            .map_err(|e| MediaError::fetch_failed(e.to_string()))?;

        Ok(Self {
            http,
            normalizer: ImageNormalizer::new(&config),
            config,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> MediaResult<Self> {
        Self::new(MediaConfig::from_env())
    }

    pub fn normalizer(&self) -> &ImageNormalizer {
        &self.normalizer
    }

    /// Decode, normalize, resize and encode uploaded garment bytes.
    pub fn from_upload(&self, raw: &[u8]) -> MediaResult<(Image, EncodedImage)> {
        self.normalizer.prepare(raw)
    }

    /// [`GarmentSource::from_upload`] off the async runtime.
    pub async fn from_upload_async(&self, raw: Vec<u8>) -> MediaResult<(Image, EncodedImage)> {
        self.normalizer.prepare_async(raw).await
    }

    /// Fetch a garment URL for preview and return it as a pass-through reference.
    pub async fn from_url(&self, url: &str) -> MediaResult<(Image, RemoteImageRef)> {
        let result = self.fetch_preview(url).await;

        let status = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        counter!(FETCH_METRIC, "status" => status).increment(1);

        result
    }

    async fn fetch_preview(&self, url: &str) -> MediaResult<(Image, RemoteImageRef)> {
        let url = url.trim();
        let parsed =
            Url::parse(url).map_err(|e| MediaError::fetch_failed(format!("Invalid URL: {}", e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MediaError::fetch_failed(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        debug!("Fetching garment image from {}", parsed);

        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(|e| self.map_fetch_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Garment URL returned {}", status);
            return Err(MediaError::fetch_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if !content_type.starts_with("image/") {
            warn!("Garment URL is not an image: {:?}", content_type);
            return Err(MediaError::NotAnImage { content_type });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_fetch_error(e))?;

        let image = self.normalizer.preview_async(bytes.to_vec()).await?;

        info!(
            width = image.width(),
            height = image.height(),
            "Loaded garment preview from URL"
        );

        Ok((image, RemoteImageRef::new(url)))
    }

    fn map_fetch_error(&self, e: reqwest::Error) -> MediaError {
        if e.is_timeout() {
            MediaError::FetchTimeout(self.config.fetch_timeout.as_secs())
        } else {
            MediaError::fetch_failed(e.to_string())
        }
    }
}
