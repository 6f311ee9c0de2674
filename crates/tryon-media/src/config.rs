//! Image pipeline configuration.

use std::time::Duration;

/// Default bound on the longest image side.
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Default garment URL fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// User agent sent when fetching garment URLs. Some hosts refuse bare clients.
pub const FETCH_USER_AGENT: &str = "Mozilla/5.0";

/// Configuration for image normalization and garment fetching.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Longest side after resizing
    pub max_dimension: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Garment URL fetch timeout
    pub fetch_timeout: Duration,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl MediaConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_dimension: std::env::var("IMAGE_MAX_DIMENSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|d| *d > 0)
                .unwrap_or(DEFAULT_MAX_DIMENSION),
            jpeg_quality: std::env::var("IMAGE_JPEG_QUALITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|q: u8| q.clamp(1, 100))
                .unwrap_or(DEFAULT_JPEG_QUALITY),
            fetch_timeout: Duration::from_secs(
                std::env::var("GARMENT_FETCH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
            ),
        }
    }
}
