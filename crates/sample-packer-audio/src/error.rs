//! Error types for audio preprocessing.

use sample_packer_spec::BackendError;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while decoding or preprocessing audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Input could not be decoded (unsupported or corrupt container/codec).
    #[error("decode error: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// A buffer needs at least one channel.
    #[error("audio buffer has no channels")]
    NoChannels,

    /// Channels of one buffer have different lengths.
    #[error("channel {channel} has {found} frames, expected {expected}")]
    RaggedChannels {
        /// Offending channel index.
        channel: usize,
        /// Frame count of channel 0.
        expected: usize,
        /// Frame count of the offending channel.
        found: usize,
    },

    /// Channel index out of range.
    #[error("channel {channel} out of range (buffer has {channels})")]
    ChannelOutOfRange {
        /// Requested channel.
        channel: usize,
        /// Channel count of the buffer.
        channels: usize,
    },

    /// Sample index out of range.
    #[error("sample index {index} out of range (buffer has {frames} frames)")]
    SampleOutOfRange {
        /// Requested frame.
        index: usize,
        /// Frame count of the buffer.
        frames: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(io) => AudioError::Io(io),
            other => AudioError::decode(other.to_string()),
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::Decode { .. } => "AUDIO_001",
            AudioError::InvalidSampleRate { .. } => "AUDIO_002",
            AudioError::NoChannels => "AUDIO_003",
            AudioError::RaggedChannels { .. } => "AUDIO_004",
            AudioError::ChannelOutOfRange { .. } => "AUDIO_005",
            AudioError::SampleOutOfRange { .. } => "AUDIO_006",
            AudioError::Io(_) => "AUDIO_007",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
