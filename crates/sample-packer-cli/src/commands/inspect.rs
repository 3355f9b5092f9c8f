//! Inspect command implementation
//!
//! Walks a WAV or AIFF file and prints its chunk layout, format fields,
//! cue points, application metadata and a BLAKE3 hash of the PCM data.

use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use sample_packer_formats::aiff::read_extended;
use sample_packer_formats::{inspect_container, ContainerInfo, ContainerKind};
use serde::Serialize;

/// One chunk in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkReport {
    pub tag: String,
    pub offset: usize,
    pub length: u32,
}

/// Everything `inspect` reports about a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub kind: &'static str,
    pub declared_len: u32,
    pub file_len: usize,
    pub chunks: Vec<ChunkReport>,
    pub channels: u16,
    pub sample_rate: f64,
    pub bits_per_sample: u16,
    pub frames: u64,
    /// Frame offsets from the `cue ` chunk (WAV only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cue_offsets: Vec<u32>,
    /// `APPL` signature (AIFF only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    /// Parsed `APPL` payload when it is JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub pcm_hash: String,
}

fn read_u16(bytes: &[u8], at: usize, little_endian: bool) -> Result<u16> {
    let raw: [u8; 2] = bytes
        .get(at..at + 2)
        .and_then(|b| b.try_into().ok())
        .with_context(|| format!("field at offset {} past end of chunk", at))?;
    Ok(if little_endian {
        u16::from_le_bytes(raw)
    } else {
        u16::from_be_bytes(raw)
    })
}

fn read_u32(bytes: &[u8], at: usize, little_endian: bool) -> Result<u32> {
    let raw: [u8; 4] = bytes
        .get(at..at + 4)
        .and_then(|b| b.try_into().ok())
        .with_context(|| format!("field at offset {} past end of chunk", at))?;
    Ok(if little_endian {
        u32::from_le_bytes(raw)
    } else {
        u32::from_be_bytes(raw)
    })
}

fn required<'a>(info: &ContainerInfo, bytes: &'a [u8], tag: &[u8; 4]) -> Result<&'a [u8]> {
    info.payload(bytes, tag)
        .with_context(|| format!("missing '{}' chunk", String::from_utf8_lossy(tag)))
}

/// Builds the report for a container in memory.
pub fn inspect_bytes(bytes: &[u8]) -> Result<InspectReport> {
    let info = inspect_container(bytes)?;
    let chunks = info
        .chunks
        .iter()
        .map(|c| ChunkReport {
            tag: c.tag_str(),
            offset: c.offset,
            length: c.declared_len,
        })
        .collect();

    let mut report = InspectReport {
        kind: "",
        declared_len: info.declared_len,
        file_len: bytes.len(),
        chunks,
        channels: 0,
        sample_rate: 0.0,
        bits_per_sample: 0,
        frames: 0,
        cue_offsets: Vec::new(),
        application: None,
        metadata: None,
        pcm_hash: String::new(),
    };

    match info.kind {
        Some(ContainerKind::Wav) => {
            let fmt = required(&info, bytes, b"fmt ")?;
            let data = required(&info, bytes, b"data")?;
            report.kind = ContainerKind::Wav.name();
            report.channels = read_u16(fmt, 2, true)?;
            report.sample_rate = f64::from(read_u32(fmt, 4, true)?);
            report.bits_per_sample = read_u16(fmt, 14, true)?;
            let block_align = u64::from(read_u16(fmt, 12, true)?.max(1));
            report.frames = data.len() as u64 / block_align;
            report.pcm_hash = blake3::hash(data).to_hex().to_string();

            if let Some(cue) = info.payload(bytes, b"cue ") {
                let count = read_u32(cue, 0, true)? as usize;
                for i in 0..count {
                    // sample offset is the last field of each 24-byte point
                    report.cue_offsets.push(read_u32(cue, 4 + i * 24 + 20, true)?);
                }
            }
        }
        Some(ContainerKind::Aiff) => {
            let comm = required(&info, bytes, b"COMM")?;
            let ssnd = required(&info, bytes, b"SSND")?;
            report.kind = ContainerKind::Aiff.name();
            report.channels = read_u16(comm, 0, false)?;
            report.frames = u64::from(read_u32(comm, 2, false)?);
            report.bits_per_sample = read_u16(comm, 6, false)?;
            let rate: [u8; 10] = comm
                .get(8..18)
                .and_then(|b| b.try_into().ok())
                .context("COMM chunk too short for sample rate")?;
            report.sample_rate = read_extended(&rate);
            report.pcm_hash = blake3::hash(ssnd.get(8..).unwrap_or_default())
                .to_hex()
                .to_string();

            if let Some(appl) = info.payload(bytes, b"APPL") {
                let (signature, payload) = appl.split_at(appl.len().min(4));
                report.application = Some(String::from_utf8_lossy(signature).into_owned());
                report.metadata = serde_json::from_slice(payload).ok();
            }
        }
        None => bail!("unsupported container"),
    }

    Ok(report)
}

/// Run the inspect command
///
/// # Arguments
/// * `file` - Path to a WAV or AIFF file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success
pub fn run(file: &str, json_output: bool) -> Result<ExitCode> {
    let bytes = std::fs::read(file).with_context(|| format!("Failed to read file: {}", file))?;
    let report =
        inspect_bytes(&bytes).with_context(|| format!("Failed to inspect file: {}", file))?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Inspecting:".cyan().bold(), file);
    println!(
        "{} {} ({} bytes, declared length {})",
        "Container:".dimmed(),
        report.kind,
        report.file_len,
        report.declared_len
    );
    println!(
        "{} {} ch, {} Hz, {}-bit, {} frames",
        "Format:".dimmed(),
        report.channels,
        report.sample_rate,
        report.bits_per_sample,
        report.frames
    );

    println!("\n{}", "Chunks:".cyan().bold());
    for chunk in &report.chunks {
        println!(
            "  {} @ {:>8}  {} bytes",
            chunk.tag.bold(),
            chunk.offset,
            chunk.length
        );
    }

    if !report.cue_offsets.is_empty() {
        println!("\n{}", "Cue points:".cyan().bold());
        for (i, offset) in report.cue_offsets.iter().enumerate() {
            println!("  {:>3}  frame {}", i + 1, offset);
        }
    }

    if let Some(signature) = &report.application {
        println!("\n{} {}", "Application:".cyan().bold(), signature);
        if let Some(metadata) = &report.metadata {
            for key in ["start", "end"] {
                if let Some(values) = metadata.get(key).and_then(|v| v.as_array()) {
                    println!("  {} {} markers", key.dimmed(), values.len());
                }
            }
        }
    }

    println!("\n{} {}", "PCM hash:".dimmed(), report.pcm_hash);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sample_packer_audio::SampleBuffer;
    use sample_packer_formats::aiff::{write_aiff, AiffOptions, ApplicationData};
    use sample_packer_formats::wav::{write_wav, WavOptions, WavWriter};
    use sample_packer_spec::BitDepth;

    #[test]
    fn test_inspect_wav() {
        let buffers = [
            SampleBuffer::mono(vec![0.1; 100], 44100).unwrap(),
            SampleBuffer::mono(vec![0.2; 40], 44100).unwrap(),
        ];
        let wav = write_wav(&buffers, &WavOptions::default()).unwrap();
        let report = inspect_bytes(&wav).unwrap();

        assert_eq!(report.kind, "wav");
        assert_eq!(report.channels, 1);
        assert_eq!(report.sample_rate, 44100.0);
        assert_eq!(report.bits_per_sample, 16);
        assert_eq!(report.frames, 140);
        assert_eq!(report.cue_offsets, vec![0, 100]);
        let tags: Vec<_> = report.chunks.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["fmt ", "data", "cue "]);
        assert_eq!(report.pcm_hash.len(), 64);
    }

    #[test]
    fn test_inspect_aiff_with_metadata() {
        let metadata = br#"{"start":[0],"end":[9]}"#.to_vec();
        let options = AiffOptions {
            sample_rate: 44100,
            application: Some(ApplicationData::new("op-1", metadata).unwrap()),
        };
        let source = SampleBuffer::mono(vec![0.0; 64], 44100).unwrap();
        let aiff = write_aiff(&[source], &options).unwrap();
        let report = inspect_bytes(&aiff).unwrap();

        assert_eq!(report.kind, "aiff");
        assert_eq!(report.frames, 64);
        assert_eq!(report.sample_rate, 44100.0);
        assert_eq!(report.application.as_deref(), Some("op-1"));
        assert_eq!(report.metadata.unwrap()["end"][0], 9);
    }

    #[test]
    fn test_inspect_eight_bit_odd_length_wav() {
        let writer = WavWriter::new(WavOptions {
            sample_rate: 22050,
            bit_depth: BitDepth::Eight,
            cue_points: true,
        });
        let buffers = [
            SampleBuffer::mono(vec![0.5; 3], 22050).unwrap(),
            SampleBuffer::mono(vec![-0.5; 4], 22050).unwrap(),
        ];
        let result = writer.write_result(&buffers).unwrap();
        let report = inspect_bytes(&result.wav_data).unwrap();

        assert_eq!(report.frames, 7);
        assert_eq!(report.bits_per_sample, 8);
        assert_eq!(report.cue_offsets, vec![0, 3]);
        assert_eq!(report.pcm_hash, result.pcm_hash);
    }

    #[test]
    fn test_inspect_rejects_other_files() {
        assert!(inspect_bytes(b"ID3\x03\0\0\0\0\0\0\0\0\0\0").is_err());
    }
}
