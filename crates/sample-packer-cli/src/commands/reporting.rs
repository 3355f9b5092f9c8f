//! Shared terminal output for validation results.

use colored::Colorize;
use sample_packer_spec::ValidationResult;
use serde::Serialize;

/// One validation message in JSON output.
#[derive(Debug, Serialize)]
pub(crate) struct JsonMessage {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Errors and warnings of a validation result as JSON messages.
pub(crate) fn json_messages(result: &ValidationResult) -> (Vec<JsonMessage>, Vec<JsonMessage>) {
    let errors = result
        .errors
        .iter()
        .map(|e| JsonMessage {
            code: e.code.code(),
            message: e.message.clone(),
            path: e.path.clone(),
        })
        .collect();
    let warnings = result
        .warnings
        .iter()
        .map(|w| JsonMessage {
            code: w.code.code(),
            message: w.message.clone(),
            path: w.path.clone(),
        })
        .collect();
    (errors, warnings)
}

/// Prints errors and warnings with colored markers.
pub(crate) fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}
