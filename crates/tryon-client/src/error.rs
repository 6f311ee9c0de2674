//! Try-on client error types.

use std::error::Error as StdError;

use thiserror::Error;
use tryon_models::FailureReason;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Classify a reqwest failure. `timeout_secs` is reported on timeouts.
    pub fn from_reqwest(e: reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            Self::Timeout(timeout_secs)
        } else {
            Self::Transport(describe(&e))
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout(_))
    }

    /// Convert into the user-facing failure carried by a submission result.
    pub fn into_failure(self) -> FailureReason {
        match self {
            ClientError::Http { status, body } => FailureReason::http(status, &body),
            ClientError::Timeout(_) => FailureReason::timeout(),
            ClientError::Transport(description) => FailureReason::transport(description),
            ClientError::InvalidResponse(description) => {
                FailureReason::invalid_response(description)
            }
            ClientError::Config(msg) => FailureReason::transport(msg),
        }
    }
}

/// Error message followed by its source chain.
///
/// reqwest's own message only names the URL; the useful part (connection
/// refused, dns error, certificate) lives in the sources.
fn describe(e: &dyn StdError) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !message.contains(&cause_msg) {
            message.push_str(": ");
            message.push_str(&cause_msg);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use tryon_models::FailureKind;

    #[test]
    fn test_http_error_display() {
        let err = ClientError::Http {
            status: 401,
            body: "bad token".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 401: bad token");
        assert_eq!(err.into_failure().message, "HTTP 401: bad token");
    }

    #[test]
    fn test_timeout_failure() {
        let err = ClientError::Timeout(180);
        assert!(err.is_timeout());

        let failure = err.into_failure();
        assert_eq!(failure.kind, FailureKind::Timeout);
        assert_eq!(failure.message, "timed out");
    }

    #[test]
    fn test_transport_failure_keeps_description() {
        let failure = ClientError::Transport("dns error".to_string()).into_failure();
        assert_eq!(failure.kind, FailureKind::Transport);
        assert_eq!(failure.message, "dns error");
    }

    #[test]
    fn test_describe_includes_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let outer = std::io::Error::new(std::io::ErrorKind::Other, io);
        assert!(describe(&outer).contains("connection refused"));
    }
}
