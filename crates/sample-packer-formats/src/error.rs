//! Error types for container assembly.

use sample_packer_audio::AudioError;
use sample_packer_spec::BackendError;
use thiserror::Error;

/// Result type for format operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur while assembling or reading a container.
///
/// Chunk overflow and underfill are programming defects in a chunk builder:
/// the whole output unit is discarded rather than emitted truncated.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A write would run past the chunk's declared length.
    #[error("chunk '{tag}' overflow: declared {declared} bytes, write would reach {attempted}")]
    ChunkOverflow {
        /// Chunk tag.
        tag: String,
        /// Declared payload length.
        declared: u32,
        /// Payload length the write would have produced.
        attempted: usize,
    },

    /// A chunk was finished before its declared length was written.
    #[error("chunk '{tag}' incomplete: declared {declared} bytes, wrote {written}")]
    ChunkIncomplete {
        /// Chunk tag.
        tag: String,
        /// Declared payload length.
        declared: u32,
        /// Payload bytes actually written.
        written: usize,
    },

    /// Content does not fit a 32-bit chunk length.
    #[error("chunk payload of {bytes} bytes exceeds the 32-bit length field")]
    TooLarge {
        /// Requested payload size.
        bytes: usize,
    },

    /// A source buffer is not at the container's sample rate.
    #[error("buffer {index} is at {found} Hz, container expects {expected} Hz")]
    SampleRateMismatch {
        /// Index of the offending buffer.
        index: usize,
        /// Container sample rate.
        expected: u32,
        /// Buffer sample rate.
        found: u32,
    },

    /// Sample rate cannot be encoded.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Application signature is not four ASCII characters.
    #[error("invalid application signature '{signature}': expected 4 ASCII characters")]
    InvalidSignature {
        /// The rejected signature.
        signature: String,
    },

    /// Container bytes could not be parsed.
    #[error("malformed container: {message}")]
    Malformed {
        /// What was wrong.
        message: String,
    },

    /// Audio preprocessing failed.
    #[error(transparent)]
    Audio(#[from] AudioError),
}

impl FormatError {
    /// Creates a malformed-container error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

impl BackendError for FormatError {
    fn code(&self) -> &'static str {
        match self {
            FormatError::ChunkOverflow { .. } => "FORMAT_001",
            FormatError::ChunkIncomplete { .. } => "FORMAT_002",
            FormatError::TooLarge { .. } => "FORMAT_003",
            FormatError::SampleRateMismatch { .. } => "FORMAT_004",
            FormatError::InvalidSampleRate { .. } => "FORMAT_005",
            FormatError::InvalidSignature { .. } => "FORMAT_006",
            FormatError::Malformed { .. } => "FORMAT_007",
            FormatError::Audio(err) => err.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            FormatError::Audio(err) => err.category(),
            _ => "format",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_categories() {
        let err = FormatError::ChunkOverflow {
            tag: "data".to_string(),
            declared: 4,
            attempted: 6,
        };
        assert_eq!(err.code(), "FORMAT_001");
        assert_eq!(err.category(), "format");
        assert!(err.to_string().contains("'data'"));

        let audio: FormatError = AudioError::NoChannels.into();
        assert_eq!(audio.code(), "AUDIO_003");
        assert_eq!(audio.category(), "audio");
    }
}
