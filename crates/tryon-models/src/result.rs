//! Submission result definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distinguishable failure kinds of a completed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The API answered with a non-200 status
    Http,
    /// The overall request timeout elapsed
    Timeout,
    /// Connection-level failure (DNS, refused, TLS)
    Transport,
    /// A 200 response whose body could not be read as JSON
    InvalidResponse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Http => "http",
            FailureKind::Timeout => "timeout",
            FailureKind::Transport => "transport",
            FailureKind::InvalidResponse => "invalid_response",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the user can do about a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Remediation {
    /// Service busy; try again shortly
    Retry,
    /// Credential rejected; operator must fix configuration
    ContactSupport,
    /// Request rejected; check the images
    FixInput,
    /// Unknown cause
    RetryThenContactSupport,
}

impl Remediation {
    pub fn hint(&self) -> &'static str {
        match self {
            Remediation::Retry => "The service is busy right now. Please try again in a moment.",
            Remediation::ContactSupport => "Authentication issue. Please contact support.",
            Remediation::FixInput => "Please check your image formats and try again.",
            Remediation::RetryThenContactSupport => {
                "Please try again. If the problem persists, contact support."
            }
        }
    }
}

/// A failed submission with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FailureReason {
    pub kind: FailureKind,
    /// HTTP status, for [`FailureKind::Http`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

impl FailureReason {
    /// Non-200 answer: `"HTTP <status>: <body>"`.
    pub fn http(status: u16, body: &str) -> Self {
        Self {
            kind: FailureKind::Http,
            status: Some(status),
            message: format!("HTTP {}: {}", status, body),
        }
    }

    pub fn timeout() -> Self {
        Self {
            kind: FailureKind::Timeout,
            status: None,
            message: "timed out".to_string(),
        }
    }

    pub fn transport(description: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            status: None,
            message: description.into(),
        }
    }

    pub fn invalid_response(description: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::InvalidResponse,
            status: None,
            message: description.into(),
        }
    }

    pub fn remediation(&self) -> Remediation {
        match (self.kind, self.status) {
            (FailureKind::Timeout, _) => Remediation::Retry,
            (FailureKind::Http, Some(401 | 403)) => Remediation::ContactSupport,
            (FailureKind::Http, Some(400)) => Remediation::FixInput,
            _ => Remediation::RetryThenContactSupport,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Structured result of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct SubmissionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureReason>,
}

impl SubmissionResult {
    pub fn success(result_image_url: Option<String>, mask_image_url: Option<String>) -> Self {
        Self {
            result_image_url,
            mask_image_url,
            error: None,
        }
    }

    pub fn failure(reason: FailureReason) -> Self {
        Self {
            result_image_url: None,
            mask_image_url: None,
            error: Some(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn error_kind(&self) -> Option<FailureKind> {
        self.error.as_ref().map(|e| e.kind)
    }

    pub fn outcome(&self) -> SubmissionOutcome<'_> {
        match (&self.error, &self.result_image_url, &self.mask_image_url) {
            (Some(reason), _, _) => SubmissionOutcome::Failed(reason),
            (None, None, None) => SubmissionOutcome::Empty,
            (None, result, mask) => SubmissionOutcome::Success {
                result_image_url: result.as_deref(),
                mask_image_url: mask.as_deref(),
            },
        }
    }
}

/// Classification of a [`SubmissionResult`] for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome<'a> {
    Success {
        result_image_url: Option<&'a str>,
        mask_image_url: Option<&'a str>,
    },
    /// The API reported success but returned no image URLs
    Empty,
    Failed(&'a FailureReason),
}

impl SubmissionOutcome<'_> {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionOutcome::Success { .. } => "success",
            SubmissionOutcome::Empty => "empty",
            SubmissionOutcome::Failed(_) => "failed",
        }
    }
}
