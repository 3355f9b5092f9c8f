//! Squid Salmple banks.
//!
//! A bank is a folder of up to eight channel files. Each channel file is
//! every sample assigned to that channel concatenated into one WAV, with a
//! cue point marking where each sample starts.

use rayon::prelude::*;
use sample_packer_audio::{SampleBuffer, SlotList};
use sample_packer_formats::wav::{WavOptions, WavResult, WavWriter, WAV_MIME};
use sample_packer_spec::SQUID_CHANNEL_COUNT;

use crate::bundle::{ExportBundle, OutputFile, TEXT_MIME};
use crate::error::{DeviceError, DeviceResult};

/// Sample rate of channel files.
pub const SQUID_SAMPLE_RATE: u32 = 44100;

/// Longest channel the device plays in full.
pub const MAX_CHANNEL_SECONDS: f64 = 11.0;

/// Bank folder name: `Bank {n}`, or `Bank XX` when unset.
pub fn bank_folder(bank: Option<u8>) -> String {
    match bank {
        Some(n) if n > 0 => format!("Bank {n}"),
        _ => "Bank XX".to_string(),
    }
}

/// Channel file name for zero-based `channel`: `chan-001.wav` ...
pub fn channel_file_name(channel: usize) -> String {
    format!("chan-00{}.wav", channel + 1)
}

/// A bank under construction.
#[derive(Debug, Clone)]
pub struct SquidBank {
    /// Bank number, `1..=99`.
    pub bank: Option<u8>,
    /// Text written to `info.txt`.
    pub pack_name: String,
    /// Sample lists, one per channel.
    pub channels: Vec<SlotList<SampleBuffer>>,
}

impl Default for SquidBank {
    fn default() -> Self {
        Self {
            bank: None,
            pack_name: "Sample Pack".to_string(),
            channels: vec![SlotList::default(); SQUID_CHANNEL_COUNT],
        }
    }
}

impl SquidBank {
    /// Appends a sample to zero-based `channel`.
    pub fn push(&mut self, channel: usize, sample: SampleBuffer) -> DeviceResult<()> {
        let slots = self.channels.len();
        let list = self
            .channels
            .get_mut(channel)
            .ok_or(DeviceError::SlotOutOfRange {
                slot: channel,
                slots,
            })?;
        list.push(sample);
        Ok(())
    }
}

fn encode_channel(samples: &SlotList<SampleBuffer>) -> DeviceResult<WavResult> {
    let buffers = samples
        .populated()
        .map(|sample| -> DeviceResult<SampleBuffer> {
            let mut buffer = sample.clone();
            buffer.convert_to_mono();
            buffer.resample(SQUID_SAMPLE_RATE)?;
            Ok(buffer)
        })
        .collect::<DeviceResult<Vec<_>>>()?;

    let writer = WavWriter::new(WavOptions {
        sample_rate: SQUID_SAMPLE_RATE,
        ..WavOptions::default()
    });
    Ok(writer.write_result(&buffers)?)
}

/// Exports a bank: `info.txt` plus one cue-marked WAV per non-empty channel.
///
/// Channels are encoded in parallel; a channel that fails is skipped.
/// Channels longer than [`MAX_CHANNEL_SECONDS`] are written with a warning.
pub fn export_bank(bank: &SquidBank) -> DeviceResult<ExportBundle> {
    if let Some(n) = bank.bank {
        if !(1..=99).contains(&n) {
            return Err(DeviceError::BankOutOfRange {
                bank: n,
                min: 1,
                max: 99,
            });
        }
    }

    let mut bundle = ExportBundle::new(Some(bank_folder(bank.bank)));
    bundle.push(OutputFile::new(
        "info.txt",
        TEXT_MIME,
        bank.pack_name.clone().into_bytes(),
    ));

    for (i, channel) in bank.channels.iter().enumerate() {
        let duration = channel.duration();
        if duration > MAX_CHANNEL_SECONDS {
            log::warn!(
                "channel {} is {:.2}s, over the {}s maximum; the device may truncate it",
                i + 1,
                duration,
                MAX_CHANNEL_SECONDS
            );
        }
    }

    let encoded: Vec<(String, DeviceResult<WavResult>)> = bank
        .channels
        .par_iter()
        .enumerate()
        .filter(|(_, channel)| channel.any_populated())
        .map(|(i, channel)| (channel_file_name(i), encode_channel(channel)))
        .collect();

    for (name, result) in encoded {
        match result {
            Ok(wav) => {
                log::debug!(
                    "{}: {} samples, {:.2}s",
                    name,
                    wav.cue_offsets.len(),
                    wav.duration_seconds()
                );
                let file = OutputFile::new(name, WAV_MIME, wav.wav_data);
                bundle.push(file.with_pcm_hash(wav.pcm_hash));
            }
            Err(err) => bundle.skip(name, err),
        }
    }

    log::debug!(
        "exported {}: {} files, {} skipped",
        bundle.folder.as_deref().unwrap_or_default(),
        bundle.files.len(),
        bundle.skipped.len()
    );
    Ok(bundle)
}
