//! Error types for image operations.

use thiserror::Error;

/// Result type for image operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while preparing an image.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Invalid image format: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("URL does not point to an image file (content-type: {content_type})")]
    NotAnImage { content_type: String },

    #[error("Request timed out after {0} seconds. Please check the URL.")]
    FetchTimeout(u64),

    #[error("Error loading image: {message}")]
    FetchFailed {
        message: String,
        status: Option<u16>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MediaError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed {
            message: message.into(),
            status: None,
        }
    }

    pub fn fetch_status(status: u16, reason: &str) -> Self {
        Self::FetchFailed {
            message: format!("HTTP {} {}", status, reason).trim_end().to_string(),
            status: Some(status),
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            MediaError::Decode(_) => "decode",
            MediaError::Encode(_) => "encode",
            MediaError::NotAnImage { .. } => "not_an_image",
            MediaError::FetchTimeout(_) => "fetch_timeout",
            MediaError::FetchFailed { .. } => "fetch_failed",
            MediaError::Internal(_) => "internal",
        }
    }
}

impl From<image::ImageError> for MediaError {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::Encoding(_) | image::ImageError::Parameter(_) => {
                MediaError::Encode(e.to_string())
            }
            _ => MediaError::Decode(e.to_string()),
        }
    }
}
