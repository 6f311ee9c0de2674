//! Structured logging for submissions.

use tracing::{error, info, warn, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tryon_models::{Category, SubmissionId};

use crate::config::LogFormat;

/// Install the global tracing subscriber. Logs go to stderr so stdout stays
/// reserved for results.
pub fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tryon=info,tryon_cli=info,tryon_client=info,tryon_media=info"));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(env_filter)
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(true)
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_file(false)
                        .with_line_number(false),
                )
                .with(env_filter)
                .init();
        }
    }
}

/// Logger carrying the submission ID and category on every event.
#[derive(Debug, Clone)]
pub struct SubmissionLogger {
    submission_id: SubmissionId,
    category: Category,
}

impl SubmissionLogger {
    /// Create a new submission logger.
    ///
    /// # Arguments
    /// * `submission_id` - Identifier attached to every event
    /// * `category` - Garment category of the submission
    pub fn new(submission_id: SubmissionId, category: Category) -> Self {
        Self {
            submission_id,
            category,
        }
    }

    /// Log the start of a submission.
    ///
    /// # Arguments
    /// * `message` - Human readable detail appended to the event
    pub fn log_start(&self, message: &str) {
        info!(
            submission_id = %self.submission_id,
            category = %self.category,
            "Submission started: {}", message
        );
    }

    /// Log a pipeline step.
    ///
    /// # Arguments
    /// * `message` - Human readable detail appended to the event
    pub fn log_progress(&self, message: &str) {
        info!(
            submission_id = %self.submission_id,
            category = %self.category,
            "Submission progress: {}", message
        );
    }

    /// Log a non-fatal problem, such as an empty API response.
    ///
    /// # Arguments
    /// * `message` - Human readable detail appended to the event
    pub fn log_warning(&self, message: &str) {
        warn!(
            submission_id = %self.submission_id,
            category = %self.category,
            "Submission warning: {}", message
        );
    }

    /// Log a failed submission.
    ///
    /// # Arguments
    /// * `message` - Human readable detail appended to the event
    pub fn log_error(&self, message: &str) {
        error!(
            submission_id = %self.submission_id,
            category = %self.category,
            "Submission error: {}", message
        );
    }

    /// Log a successful submission.
    ///
    /// # Arguments
    /// * `message` - Human readable detail appended to the event
    pub fn log_completion(&self, message: &str) {
        info!(
            submission_id = %self.submission_id,
            category = %self.category,
            "Submission completed: {}", message
        );
    }

    /// Get the submission ID.
    pub fn submission_id(&self) -> &SubmissionId {
        &self.submission_id
    }

    /// Span covering the whole submission.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "submission",
            submission_id = %self.submission_id,
            category = %self.category
        )
    }
}
