//! Decoded multi-channel sample buffer.

use std::borrow::Cow;

use sample_packer_spec::BitDepth;

use crate::error::{AudioError, AudioResult};
use crate::pcm::quantize_sample;
use crate::resample::resample_linear;

/// One decoded audio buffer: equal-length float channels at one sample rate.
///
/// Downmix and resample replace the channel data in place; nothing else
/// mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Creates a buffer from per-channel sample arrays.
    ///
    /// Fails if there are no channels, channel lengths differ, or the sample
    /// rate is zero.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }
        let expected = channels.first().ok_or(AudioError::NoChannels)?.len();
        if let Some((channel, data)) = channels
            .iter()
            .enumerate()
            .find(|(_, data)| data.len() != expected)
        {
            return Err(AudioError::RaggedChannels {
                channel,
                expected,
                found: data.len(),
            });
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Creates a single-channel buffer.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> AudioResult<Self> {
        Self::from_channels(vec![samples], sample_rate)
    }

    /// Creates a buffer from interleaved frames.
    pub fn from_interleaved(
        samples: &[f32],
        channel_count: usize,
        sample_rate: u32,
    ) -> AudioResult<Self> {
        if channel_count == 0 {
            return Err(AudioError::NoChannels);
        }
        let frames = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self::from_channels(channels, sample_rate)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds (`frames / sample_rate`).
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    /// Samples of one channel.
    pub fn channel(&self, channel: usize) -> Option<&[f32]> {
        self.channels.get(channel).map(Vec::as_slice)
    }

    /// Mono view of the buffer: borrowed if already mono, otherwise the
    /// per-frame mean of all channels.
    pub fn mono_samples(&self) -> Cow<'_, [f32]> {
        match self.channels.as_slice() {
            [only] => Cow::Borrowed(only.as_slice()),
            channels => {
                let count = channels.len() as f64;
                let mixed = (0..self.frames())
                    .map(|i| {
                        let sum: f64 = channels.iter().map(|c| f64::from(c[i])).sum();
                        (sum / count) as f32
                    })
                    .collect();
                Cow::Owned(mixed)
            }
        }
    }

    /// Downmixes to a single channel in place.
    ///
    /// Each output sample is the mean across channels at that index. Frame
    /// count and sample rate are unchanged. No-op on mono buffers.
    pub fn convert_to_mono(&mut self) {
        if self.channels.len() == 1 {
            return;
        }
        let mixed = self.mono_samples().into_owned();
        log::debug!(
            "downmixed {} channels to mono ({} frames)",
            self.channels.len(),
            mixed.len()
        );
        self.channels = vec![mixed];
    }

    /// Resamples every channel to `target_rate` in place.
    ///
    /// No-op when the rate already matches. The new frame count is
    /// `round(frames * target_rate / sample_rate)`.
    pub fn resample(&mut self, target_rate: u32) -> AudioResult<()> {
        if target_rate == self.sample_rate {
            return Ok(());
        }
        let channels = self
            .channels
            .iter()
            .map(|c| resample_linear(c, self.sample_rate, target_rate))
            .collect::<AudioResult<Vec<_>>>()?;

        log::debug!(
            "resampled {} Hz -> {} Hz ({} -> {} frames)",
            self.sample_rate,
            target_rate,
            self.frames(),
            channels.first().map_or(0, Vec::len)
        );
        self.channels = channels;
        self.sample_rate = target_rate;
        Ok(())
    }

    /// Quantizes one sample to a signed integer of the given bit depth.
    ///
    /// See [`quantize_sample`] for the scaling rules.
    pub fn quantize(&self, channel: usize, index: usize, depth: BitDepth) -> AudioResult<i32> {
        let data = self
            .channels
            .get(channel)
            .ok_or(AudioError::ChannelOutOfRange {
                channel,
                channels: self.channels.len(),
            })?;
        let sample = data.get(index).ok_or(AudioError::SampleOutOfRange {
            index,
            frames: data.len(),
        })?;
        Ok(quantize_sample(*sample, depth))
    }
}
