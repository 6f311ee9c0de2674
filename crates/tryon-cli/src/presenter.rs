//! Result presentation.

use std::fmt::Write;

use tryon_models::SubmissionOutcome;

use crate::error::CliError;
use crate::pipeline::PipelineReport;

/// Human readable report.
pub fn render_text(report: &PipelineReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Model image ready. Size: {} × {} pixels",
        report.model_preview.width, report.model_preview.height
    );
    let _ = writeln!(
        out,
        "Garment image ready. Size: {} × {} pixels",
        report.garment_preview.width, report.garment_preview.height
    );
    let _ = writeln!(out, "Category: {}", report.category.label());

    match report.result.outcome() {
        SubmissionOutcome::Success {
            result_image_url,
            mask_image_url,
        } => {
            let _ = writeln!(out, "Your try-on result is ready!");
            if let Some(url) = result_image_url {
                let _ = writeln!(out, "Result: {}", url);
            }
            if let Some(url) = mask_image_url {
                let _ = writeln!(out, "Mask: {}", url);
            }
        }
        SubmissionOutcome::Empty => {
            let _ = writeln!(out, "Warning: the service reported success but returned no images.");
        }
        SubmissionOutcome::Failed(reason) => {
            let _ = writeln!(out, "Error: {}", reason);
            let _ = writeln!(out, "Hint: {}", reason.remediation().hint());
        }
    }

    out
}

/// JSON report.
pub fn render_json(report: &PipelineReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Message for an error raised before the API call.
pub fn render_error(err: &CliError) -> String {
    match err.remediation() {
        Some(remediation) => format!("Error: {}\nHint: {}\n", err, remediation.hint()),
        None => format!("Error: {}\n", err),
    }
}
