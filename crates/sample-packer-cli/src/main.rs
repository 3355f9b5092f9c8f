//! sample-packer CLI - Build sample packs for hardware samplers
//!
//! This binary builds OP-1/OP-Z drum patches, Microgranny presets and Squid
//! Salmple banks from JSON manifests, and inspects the files it writes.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use sample_packer_cli::commands;

/// sample-packer - Sample pack builder for hardware samplers
#[derive(Parser)]
#[command(name = "sample-packer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the device files described by a manifest
    Build {
        /// Path to the manifest JSON file
        #[arg(short, long)]
        manifest: String,

        /// Output directory (default: the manifest's directory)
        #[arg(short, long)]
        out_dir: Option<String>,
    },

    /// Inspect a WAV or AIFF file written by sample-packer
    Inspect {
        /// Path to the file to inspect
        #[arg(short, long)]
        file: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a manifest without decoding any audio
    Validate {
        /// Path to the manifest JSON file
        #[arg(short, long)]
        manifest: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { manifest, out_dir } => {
            commands::build::run(&manifest, out_dir.as_deref())
        }
        Commands::Inspect { file, json } => commands::inspect::run(&file, json),
        Commands::Validate { manifest, json } => commands::validate::run(&manifest, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_build() {
        let cli = Cli::try_parse_from([
            "sample-packer",
            "build",
            "--manifest",
            "pack.json",
            "--out-dir",
            "out",
        ])
        .unwrap();
        match cli.command {
            Commands::Build { manifest, out_dir } => {
                assert_eq!(manifest, "pack.json");
                assert_eq!(out_dir.as_deref(), Some("out"));
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_cli_parses_build_default_out_dir() {
        let cli = Cli::try_parse_from(["sample-packer", "build", "-m", "pack.json"]).unwrap();
        match cli.command {
            Commands::Build { out_dir, .. } => assert!(out_dir.is_none()),
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_cli_parses_inspect_with_json() {
        let cli =
            Cli::try_parse_from(["sample-packer", "inspect", "--file", "kit.aif", "--json"])
                .unwrap();
        match cli.command {
            Commands::Inspect { file, json } => {
                assert_eq!(file, "kit.aif");
                assert!(json);
            }
            _ => panic!("expected inspect command"),
        }
    }

    #[test]
    fn test_cli_parses_validate() {
        let cli = Cli::try_parse_from(["sample-packer", "validate", "-m", "pack.json"]).unwrap();
        match cli.command {
            Commands::Validate { manifest, json } => {
                assert_eq!(manifest, "pack.json");
                assert!(!json);
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_cli_requires_manifest() {
        assert!(Cli::try_parse_from(["sample-packer", "build"]).is_err());
        assert!(Cli::try_parse_from(["sample-packer", "pack"]).is_err());
    }
}
