//! Image payloads accepted by the try-on API.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing an inline data payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImagePayloadError {
    #[error("Not a data URL")]
    NotDataUrl,

    #[error("Data URL is not base64 encoded")]
    NotBase64,

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Encoded image bytes tagged with their MIME type.
///
/// Serialized into a form field as an inline data payload
/// (`data:<mime>;base64,<content>`).
#[derive(Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime_type: String,
    bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Render as an inline data payload.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }

    /// Parse an inline data payload produced by [`EncodedImage::to_data_url`].
    pub fn from_data_url(data_url: &str) -> Result<Self, ImagePayloadError> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or(ImagePayloadError::NotDataUrl)?;
        let (header, payload) = rest.split_once(',').ok_or(ImagePayloadError::NotDataUrl)?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or(ImagePayloadError::NotBase64)?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| ImagePayloadError::InvalidBase64(e.to_string()))?;

        Ok(Self::new(mime_type, bytes))
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// URL of an image that is already publicly reachable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RemoteImageRef(String);

impl RemoteImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Garment image as submitted: inline bytes or a pass-through URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GarmentImage {
    Encoded(EncodedImage),
    Remote(RemoteImageRef),
}

impl GarmentImage {
    /// Value of the `garmentImg` form field.
    pub fn form_value(&self) -> String {
        match self {
            GarmentImage::Encoded(image) => image.to_data_url(),
            GarmentImage::Remote(url) => url.as_str().to_string(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, GarmentImage::Remote(_))
    }
}

impl From<EncodedImage> for GarmentImage {
    fn from(image: EncodedImage) -> Self {
        GarmentImage::Encoded(image)
    }
}

impl From<RemoteImageRef> for GarmentImage {
    fn from(url: RemoteImageRef) -> Self {
        GarmentImage::Remote(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_format() {
        let image = EncodedImage::new("image/jpeg", vec![0xff, 0xd8, 0xff]);
        assert_eq!(image.to_data_url(), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_data_url_parse() {
        let image = EncodedImage::from_data_url("data:image/jpeg;base64,/9j/").unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.bytes(), &[0xff, 0xd8, 0xff]);
    }

    #[test]
    fn test_data_url_rejects_plain_url() {
        assert_eq!(
            EncodedImage::from_data_url("https://example.com/shirt.jpg"),
            Err(ImagePayloadError::NotDataUrl)
        );
        assert_eq!(
            EncodedImage::from_data_url("data:text/plain,hello"),
            Err(ImagePayloadError::NotBase64)
        );
    }

    #[test]
    fn test_garment_form_value() {
        let remote = GarmentImage::from(RemoteImageRef::new("https://example.com/shirt.jpg"));
        assert!(remote.is_remote());
        assert_eq!(remote.form_value(), "https://example.com/shirt.jpg");

        let inline = GarmentImage::from(EncodedImage::new("image/jpeg", vec![1, 2, 3]));
        assert!(inline.form_value().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_debug_hides_bytes() {
        let image = EncodedImage::new("image/jpeg", vec![0; 4096]);
        let debug = format!("{:?}", image);
        assert!(debug.contains("4096"));
        assert!(!debug.contains("[0, 0"));
    }
}
