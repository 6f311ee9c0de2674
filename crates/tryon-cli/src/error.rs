//! Front-end error types.

use thiserror::Error;
use tryon_client::ClientError;
use tryon_media::MediaError;
use tryon_models::{DescriptionError, Remediation};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Please provide: {}", .0.join(" and "))]
    MissingInputs(Vec<&'static str>),

    #[error("A submission is already being processed")]
    AlreadyProcessing,

    #[error("Invalid description: {0}")]
    Description(#[from] DescriptionError),

    #[error("Failed to read {path}: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error loading {role} image: {source}")]
    Image {
        role: &'static str,
        #[source]
        source: MediaError,
    },
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn model_image(source: MediaError) -> Self {
        Self::Image {
            role: "model",
            source,
        }
    }

    pub fn garment_image(source: MediaError) -> Self {
        Self::Image {
            role: "garment",
            source,
        }
    }

    /// Operator errors, as opposed to problems with the user's input.
    pub fn is_config(&self) -> bool {
        matches!(self, CliError::Config(_))
    }

    pub fn remediation(&self) -> Option<Remediation> {
        match self {
            CliError::Image { source, .. } => Some(match source {
                MediaError::FetchTimeout(_) => Remediation::Retry,
                MediaError::Encode(_) | MediaError::Internal(_) => {
                    Remediation::RetryThenContactSupport
                }
                _ => Remediation::FixInput,
            }),
            CliError::Config(_) => Some(Remediation::ContactSupport),
            CliError::AlreadyProcessing => Some(Remediation::Retry),
            _ => None,
        }
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        CliError::Config(e.to_string())
    }
}
