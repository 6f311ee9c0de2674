//! Submission request definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::{Category, EncodedImage, GarmentImage};

/// Maximum length of a garment description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Unique identifier for a submission, used for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    /// Generate a new random submission ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("Description is {0} characters long (max {max})", max = MAX_DESCRIPTION_CHARS)]
    TooLong(usize),
}

/// Trimmed, non-empty garment description of at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct GarmentDescription(String);

impl GarmentDescription {
    /// Parse user input. Whitespace-only input is treated as absent.
    pub fn parse(input: &str) -> Result<Option<Self>, DescriptionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let chars = trimmed.chars().count();
        if chars > MAX_DESCRIPTION_CHARS {
            return Err(DescriptionError::TooLong(chars));
        }

        Ok(Some(Self(trimmed.to_string())))
    }

    /// Parse optional user input.
    pub fn parse_optional(input: Option<&str>) -> Result<Option<Self>, DescriptionError> {
        match input {
            Some(s) => Self::parse(s),
            None => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GarmentDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A complete request to the try-on API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    /// Model photo, always sent inline
    pub model_image: EncodedImage,
    /// Garment photo, inline or by URL
    pub garment_image: GarmentImage,
    pub category: Category,
    pub description: Option<GarmentDescription>,
}

impl SubmissionRequest {
    pub fn new(model_image: EncodedImage, garment_image: GarmentImage, category: Category) -> Self {
        Self {
            model_image,
            garment_image,
            category,
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<GarmentDescription>) -> Self {
        self.description = description;
        self
    }

    /// Ordered multipart form fields.
    ///
    /// `garmentDesc` is omitted entirely when there is no description; the API
    /// treats the presence of a field as meaningful.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("modelImg", self.model_image.to_data_url()),
            ("garmentImg", self.garment_image.form_value()),
            ("category", self.category.as_str().to_string()),
        ];

        if let Some(description) = &self.description {
            fields.push(("garmentDesc", description.as_str().to_string()));
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RemoteImageRef;

    fn request(description: Option<&str>) -> SubmissionRequest {
        SubmissionRequest::new(
            EncodedImage::new("image/jpeg", vec![1, 2, 3]),
            RemoteImageRef::new("https://example.com/shirt.jpg").into(),
            Category::Dresses,
        )
        .with_description(GarmentDescription::parse_optional(description).unwrap())
    }

    #[test]
    fn test_description_whitespace_is_absent() {
        assert_eq!(GarmentDescription::parse("   ").unwrap(), None);
        assert_eq!(GarmentDescription::parse("").unwrap(), None);
        assert_eq!(GarmentDescription::parse_optional(None).unwrap(), None);
    }

    #[test]
    fn test_description_is_trimmed() {
        let desc = GarmentDescription::parse("  red silk dress \n").unwrap().unwrap();
        assert_eq!(desc.as_str(), "red silk dress");
    }

    #[test]
    fn test_description_length_limit() {
        let exact = "a".repeat(MAX_DESCRIPTION_CHARS);
        assert!(GarmentDescription::parse(&exact).unwrap().is_some());

        let padded = format!("  {}  ", exact);
        assert!(GarmentDescription::parse(&padded).unwrap().is_some());

        let long = "é".repeat(MAX_DESCRIPTION_CHARS + 1);
        assert_eq!(
            GarmentDescription::parse(&long),
            Err(DescriptionError::TooLong(MAX_DESCRIPTION_CHARS + 1))
        );
    }

    #[test]
    fn test_form_fields_order() {
        let fields = request(Some("A red silk evening dress"));
        let names: Vec<_> = fields.form_fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["modelImg", "garmentImg", "category", "garmentDesc"]);
    }

    #[test]
    fn test_form_fields_omit_blank_description() {
        let fields = request(Some("   ")).form_fields();
        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|(k, _)| *k != "garmentDesc"));
    }

    #[test]
    fn test_form_field_values() {
        let fields = request(None).form_fields();
        assert!(fields[0].1.starts_with("data:image/jpeg;base64,"));
        assert_eq!(fields[1].1, "https://example.com/shirt.jpg");
        assert_eq!(fields[2].1, "dresses");
    }

    #[test]
    fn test_submission_id_unique() {
        assert_ne!(SubmissionId::new(), SubmissionId::new());
    }
}
