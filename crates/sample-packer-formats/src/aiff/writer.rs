//! AIFF container assembly.

use byteorder::BigEndian;
use sample_packer_audio::SampleBuffer;

use super::chunks::{application_chunk, common_chunk, sound_data_chunk, ApplicationData, SoundData};
use super::result::AiffResult;
use crate::chunk::assemble;
use crate::error::FormatResult;

/// Options for writing an AIFF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiffOptions {
    /// Sample rate every source buffer must already have.
    pub sample_rate: u32,
    /// Optional `APPL` chunk written after the sound data.
    pub application: Option<ApplicationData>,
}

impl Default for AiffOptions {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            application: None,
        }
    }
}

/// Writes a complete AIFF file.
///
/// Chunks are built in order `COMM`, `SSND`, then `APPL` when application
/// data is given. The `FORM` length field is the inner chunk total minus 8.
///
/// # Arguments
/// * `buffers` - Source buffers, all at `options.sample_rate`
/// * `options` - Sample rate and optional application data
///
/// # Returns
/// Complete AIFF file bytes
pub fn write_aiff(buffers: &[SampleBuffer], options: &AiffOptions) -> FormatResult<Vec<u8>> {
    build(buffers, options).map(|(bytes, _)| bytes)
}

fn build(buffers: &[SampleBuffer], options: &AiffOptions) -> FormatResult<(Vec<u8>, SoundData)> {
    let sound = sound_data_chunk(buffers, options.sample_rate)?;

    let mut chunks = vec![common_chunk(sound.frames, options.sample_rate)?];
    chunks.push(sound.bytes.clone());
    if let Some(app) = &options.application {
        chunks.push(application_chunk(app)?);
    }

    let aiff = assemble::<BigEndian>(b"FORM", b"AIFF", &chunks, |len| {
        u32::try_from(len).ok()?.checked_sub(8)
    })?;
    Ok((aiff, sound))
}

/// AIFF writer with fixed options.
#[derive(Debug, Clone, Default)]
pub struct AiffWriter {
    options: AiffOptions,
}

impl AiffWriter {
    /// Creates a writer with the given options.
    pub fn new(options: AiffOptions) -> Self {
        Self { options }
    }

    /// Attaches application data to every file written.
    pub fn with_application(mut self, application: ApplicationData) -> Self {
        self.options.application = Some(application);
        self
    }

    /// Writes `buffers` to AIFF bytes.
    pub fn write(&self, buffers: &[SampleBuffer]) -> FormatResult<Vec<u8>> {
        write_aiff(buffers, &self.options)
    }

    /// Writes `buffers` and returns the file with its offsets and PCM hash.
    pub fn write_result(&self, buffers: &[SampleBuffer]) -> FormatResult<AiffResult> {
        let (aiff_data, sound) = build(buffers, &self.options)?;
        Ok(AiffResult::new(aiff_data, &sound, self.options.sample_rate))
    }
}
