//! Virtual try-on submission front end.
//!
//! This crate provides:
//! - Environment configuration and tracing setup
//! - The submission pipeline (input validation, image preparation, one API call)
//! - Result presentation with remediation hints

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod presenter;

pub use config::{AppConfig, LogFormat};
pub use error::{CliError, CliResult};
pub use logging::SubmissionLogger;
pub use pipeline::{GarmentInput, PipelineReport, SubmissionInput, TryOnPipeline};
