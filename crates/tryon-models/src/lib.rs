//! Shared data models for the try-on submission pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Clothing categories
//! - Inline image payloads and remote image references
//! - Submission requests and their ordered form fields
//! - Submission results, failure kinds and remediation hints

pub mod category;
pub mod image;
pub mod request;
pub mod result;

// Re-export common types
pub use category::{Category, CategoryParseError};
pub use image::{EncodedImage, GarmentImage, ImagePayloadError, RemoteImageRef};
pub use request::{
    DescriptionError, GarmentDescription, SubmissionId, SubmissionRequest, MAX_DESCRIPTION_CHARS,
};
pub use result::{FailureKind, FailureReason, Remediation, SubmissionOutcome, SubmissionResult};
