//! Build command implementation
//!
//! Decodes the sources named in a manifest, runs the device exporter and
//! writes the resulting files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use sample_packer_audio::WavDecoder;
use sample_packer_devices::{export_manifest, ExportBundle};
use sample_packer_spec::{validate_manifest, BackendError, Manifest};

use super::reporting::print_validation_results;

/// Run the build command
///
/// # Arguments
/// * `manifest_path` - Path to the manifest JSON file
/// * `out_dir` - Output directory (default: the manifest's directory)
///
/// # Returns
/// Exit code: 0 on success, 1 if the manifest is invalid
pub fn run(manifest_path: &str, out_dir: Option<&str>) -> Result<ExitCode> {
    let start = Instant::now();
    let manifest_path = Path::new(manifest_path);
    let base_dir = manifest_path.parent().unwrap_or(Path::new("."));

    println!("{} {}", "Building:".cyan().bold(), manifest_path.display());

    let manifest = Manifest::from_path(manifest_path)
        .with_context(|| format!("Failed to load manifest: {}", manifest_path.display()))?;

    let validation = validate_manifest(&manifest);
    if !validation.is_ok() {
        print_validation_results(&validation);
        println!(
            "\n{} Manifest has {} error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        return Ok(ExitCode::from(1));
    }
    print_validation_results(&validation);

    let bundle = export_manifest(&manifest, base_dir, &WavDecoder).map_err(|e| {
        anyhow::anyhow!("{} export failed [{}]: {}", manifest.device_name(), e.code(), e)
    })?;

    let out_dir = out_dir.map_or_else(|| base_dir.to_path_buf(), PathBuf::from);
    let written = write_bundle(&bundle, &out_dir)?;

    println!("\n{}", "Outputs:".cyan().bold());
    for ((path, bytes), file) in written.iter().zip(&bundle.files) {
        match &file.pcm_hash {
            Some(hash) => println!(
                "  {} {} ({} bytes, pcm {})",
                "+".green(),
                path.display(),
                bytes,
                hash.get(..16).unwrap_or(hash.as_str()).dimmed()
            ),
            None => println!("  {} {} ({} bytes)", "+".green(), path.display(), bytes),
        }
    }
    for skipped in &bundle.skipped {
        println!(
            "  {} {}: {}",
            "!".yellow(),
            skipped.path.display(),
            skipped.reason.dimmed()
        );
    }

    println!(
        "\n{} Wrote {} file(s) ({}ms)",
        "SUCCESS".green().bold(),
        written.len(),
        start.elapsed().as_millis()
    );
    Ok(ExitCode::SUCCESS)
}

/// Writes every bundle file under `out_dir`, creating the bundle folder.
///
/// Returns the written paths and their sizes.
pub fn write_bundle(bundle: &ExportBundle, out_dir: &Path) -> Result<Vec<(PathBuf, usize)>> {
    let mut written = Vec::with_capacity(bundle.files.len());
    for file in &bundle.files {
        let path = out_dir.join(bundle.relative_path(file));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&path, &file.bytes)
            .with_context(|| format!("Failed to write output: {}", path.display()))?;
        log::debug!("wrote {} ({})", path.display(), file.mime);
        written.push((path, file.bytes.len()));
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sample_packer_devices::OutputFile;

    #[test]
    fn test_write_bundle_creates_folder() {
        let dir = tempfile::tempdir().unwrap();
        let mut bundle = ExportBundle::new(Some("Bank 1".to_string()));
        bundle.push(OutputFile::new("info.txt", "text/plain", b"Pack".to_vec()));

        let written = write_bundle(&bundle, dir.path()).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, dir.path().join("Bank 1").join("info.txt"));
        assert_eq!(
            std::fs::read(dir.path().join("Bank 1/info.txt")).unwrap(),
            b"Pack"
        );
    }

    #[test]
    fn test_invalid_manifest_exits_nonzero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pack.json");
        std::fs::write(
            &path,
            r#"{"device": "microgranny", "bank": 12, "sounds": []}"#,
        )
        .unwrap();
        let code = run(path.to_str().unwrap(), None).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
