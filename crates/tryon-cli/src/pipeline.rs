//! Submission pipeline.
//!
//! Validates the user's inputs, prepares both images, and performs exactly one
//! call to the try-on API. At most one submission is in flight per pipeline.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::Instrument;
use tryon_client::{Credential, TryOnClient};
use tryon_media::{GarmentSource, Image};
use tryon_models::{
    Category, GarmentDescription, GarmentImage, SubmissionId, SubmissionOutcome,
    SubmissionRequest, SubmissionResult,
};

use crate::error::{CliError, CliResult};
use crate::logging::SubmissionLogger;

/// Where the garment comes from.
#[derive(Debug, Clone)]
pub enum GarmentInput {
    /// Raw bytes of an uploaded file
    Upload(Vec<u8>),
    /// Publicly reachable image URL
    Url(String),
}

/// Raw user input for one submission.
#[derive(Debug, Clone, Default)]
pub struct SubmissionInput {
    pub model: Option<Vec<u8>>,
    pub garment: Option<GarmentInput>,
    pub category: Category,
    pub description: Option<String>,
}

impl SubmissionInput {
    /// Inputs the user still has to provide, in display order.
    pub fn missing_items(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.model.as_ref().map_or(true, |m| m.is_empty()) {
            missing.push("model photo");
        }
        let garment_present = match &self.garment {
            Some(GarmentInput::Upload(bytes)) => !bytes.is_empty(),
            Some(GarmentInput::Url(url)) => !url.trim().is_empty(),
            None => false,
        };
        if !garment_present {
            missing.push("garment image");
        }
        missing
    }
}

/// Dimensions of a prepared image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageSummary {
    pub width: u32,
    pub height: u32,
}

impl From<&Image> for ImageSummary {
    fn from(image: &Image) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

/// Garment origin as reported back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentOrigin {
    Upload,
    Url,
}

/// Everything the presenter needs after a submission completes.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub submission_id: SubmissionId,
    pub category: Category,
    pub model_preview: ImageSummary,
    pub garment_preview: ImageSummary,
    pub garment_origin: GarmentOrigin,
    pub result: SubmissionResult,
    pub completed_at: DateTime<Utc>,
}

/// Clears the processing flag when dropped.
struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ProcessingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> CliResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CliError::AlreadyProcessing)?;
        Ok(Self { flag })
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Orchestrates image preparation and the API call.
pub struct TryOnPipeline {
    client: TryOnClient,
    garments: GarmentSource,
    credential: Credential,
    processing: AtomicBool,
}

impl TryOnPipeline {
    pub fn new(client: TryOnClient, garments: GarmentSource, credential: Credential) -> Self {
        Self {
            client,
            garments,
            credential,
            processing: AtomicBool::new(false),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Run one submission.
    ///
    /// Input and image errors are returned as `Err`; everything that happens
    /// once the request is sent is carried in the report's result.
    pub async fn run(&self, input: SubmissionInput) -> CliResult<PipelineReport> {
        let missing = input.missing_items();
        if !missing.is_empty() {
            return Err(CliError::MissingInputs(missing));
        }

        let description = GarmentDescription::parse_optional(input.description.as_deref())?;
        let _guard = ProcessingGuard::acquire(&self.processing)?;

        let logger = SubmissionLogger::new(SubmissionId::new(), input.category);
        let span = logger.create_span();

        self.run_inner(input, description, &logger)
            .instrument(span)
            .await
            .inspect_err(|e| logger.log_error(&e.to_string()))
    }

    async fn run_inner(
        &self,
        input: SubmissionInput,
        description: Option<GarmentDescription>,
        logger: &SubmissionLogger,
    ) -> CliResult<PipelineReport> {
        logger.log_start("preparing images");

        let model_bytes = input.model.unwrap_or_default();
        let (model_preview, model_image) = self
            .garments
            .normalizer()
            .prepare_async(model_bytes)
            .await
            .map_err(CliError::model_image)?;

        let (garment_preview, garment_image, garment_origin) = match input.garment {
            Some(GarmentInput::Upload(bytes)) => {
                let (preview, encoded) = self
                    .garments
                    .from_upload_async(bytes)
                    .await
                    .map_err(CliError::garment_image)?;
                (preview, GarmentImage::Encoded(encoded), GarmentOrigin::Upload)
            }
            Some(GarmentInput::Url(url)) => {
                let (preview, remote) = self
                    .garments
                    .from_url(&url)
                    .await
                    .map_err(CliError::garment_image)?;
                (preview, GarmentImage::Remote(remote), GarmentOrigin::Url)
            }
            None => return Err(CliError::MissingInputs(vec!["garment image"])),
        };

        let request = SubmissionRequest::new(model_image, garment_image, input.category)
            .with_description(description);

        logger.log_progress("calling try-on API");
        let result = self.client.submit(&request, &self.credential).await;

        match result.outcome() {
            SubmissionOutcome::Success { .. } => logger.log_completion("images returned"),
            SubmissionOutcome::Empty => logger.log_warning("API returned no images"),
            SubmissionOutcome::Failed(reason) => {
                logger.log_warning(&format!("{} failure: {}", reason.kind, reason))
            }
        }

        Ok(PipelineReport {
            submission_id: logger.submission_id().clone(),
            category: input.category,
            model_preview: ImageSummary::from(&model_preview),
            garment_preview: ImageSummary::from(&garment_preview),
            garment_origin,
            result,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_items_all() {
        let input = SubmissionInput::default();
        assert_eq!(input.missing_items(), vec!["model photo", "garment image"]);
    }

    #[test]
    fn test_missing_items_blank_url() {
        let input = SubmissionInput {
            model: Some(vec![1, 2, 3]),
            garment: Some(GarmentInput::Url("   ".to_string())),
            ..SubmissionInput::default()
        };
        assert_eq!(input.missing_items(), vec!["garment image"]);
    }

    #[test]
    fn test_missing_items_empty_upload() {
        let input = SubmissionInput {
            model: Some(Vec::new()),
            garment: Some(GarmentInput::Upload(vec![1])),
            ..SubmissionInput::default()
        };
        assert_eq!(input.missing_items(), vec!["model photo"]);
    }

    #[test]
    fn test_processing_guard() {
        let flag = AtomicBool::new(false);
        {
            let _guard = ProcessingGuard::acquire(&flag).unwrap();
            assert!(flag.load(Ordering::Acquire));
            assert!(matches!(
                ProcessingGuard::acquire(&flag),
                Err(CliError::AlreadyProcessing)
            ));
        }
        assert!(!flag.load(Ordering::Acquire));
        assert!(ProcessingGuard::acquire(&flag).is_ok());
    }
}
