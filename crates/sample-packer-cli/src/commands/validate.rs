//! Validate command implementation
//!
//! Parses a pack manifest and reports every validation problem.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use sample_packer_spec::{validate_manifest, Manifest};
use serde::Serialize;

use super::reporting::{json_messages, print_validation_results, JsonMessage};

#[derive(Debug, Serialize)]
struct ValidateOutput {
    ok: bool,
    device: &'static str,
    sources: usize,
    errors: Vec<JsonMessage>,
    warnings: Vec<JsonMessage>,
}

/// Run the validate command
///
/// # Arguments
/// * `manifest_path` - Path to the manifest JSON file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(manifest_path: &str, json_output: bool) -> Result<ExitCode> {
    let manifest = Manifest::from_path(Path::new(manifest_path))
        .with_context(|| format!("Failed to load manifest: {}", manifest_path))?;
    let result = validate_manifest(&manifest);

    if json_output {
        let (errors, warnings) = json_messages(&result);
        let output = ValidateOutput {
            ok: result.is_ok(),
            device: manifest.device_name(),
            sources: manifest.source_files().len(),
            errors,
            warnings,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Validating:".cyan().bold(), manifest_path);
        println!(
            "{} {} ({} source files)",
            "Device:".dimmed(),
            manifest.device_name(),
            manifest.source_files().len()
        );
        print_validation_results(&result);

        if result.is_ok() {
            println!("\n{} Manifest is valid", "SUCCESS".green().bold());
        } else {
            println!(
                "\n{} Manifest has {} error(s)",
                "FAILED".red().bold(),
                result.errors.len()
            );
        }
    }

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest(dir: &Path, json: &str) -> String {
        let path = dir.join("pack.json");
        std::fs::write(&path, json).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_valid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{"device": "op1", "slots": [{"key": 0, "file": "a.wav"}]}"#,
        );
        assert_eq!(run(&path, false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(&path, true).unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_invalid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{"device": "op1", "slots": [{"key": 30, "file": "a.wav"}]}"#,
        );
        assert_eq!(run(&path, false).unwrap(), ExitCode::from(1));
    }

    #[test]
    fn test_unparseable_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), r#"{"device": "tape"}"#);
        let err = run(&path, false).unwrap_err();
        assert!(err.to_string().contains("Failed to load manifest"));
    }
}
