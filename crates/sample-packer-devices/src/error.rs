//! Error types for device exports.

use sample_packer_audio::AudioError;
use sample_packer_formats::FormatError;
use sample_packer_spec::BackendError;
use thiserror::Error;

/// Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors that can occur while encoding device presets or exports.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// A patch export had no populated slot.
    #[error("patch has no populated slots")]
    EmptyPatch,

    /// A sound name is not two characters from `0-9`/`A-Z`.
    #[error("invalid sound name '{name}': expected two characters from 0-9 or A-Z")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// A name used as an output file name would escape the output folder.
    #[error("unsafe file name '{name}': expected a single path component")]
    UnsafeFileName {
        /// The rejected name.
        name: String,
    },

    /// A slot index is past the end of the device's slot row.
    #[error("slot {slot} out of range (device has {slots} slots)")]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Number of slots.
        slots: usize,
    },

    /// Bank number cannot be encoded.
    #[error("bank {bank} out of range ({min}..={max})")]
    BankOutOfRange {
        /// Requested bank.
        bank: u8,
        /// Lowest valid bank.
        min: u8,
        /// Highest valid bank.
        max: u8,
    },

    /// Preset index cannot be encoded.
    #[error("preset index {index} out of range (1..=6)")]
    PresetIndexOutOfRange {
        /// Requested index.
        index: u8,
    },

    /// Metadata block could not be serialized.
    #[error("metadata serialization failed: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Audio preprocessing failed.
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// Container assembly failed.
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl BackendError for DeviceError {
    fn code(&self) -> &'static str {
        match self {
            DeviceError::EmptyPatch => "DEVICE_001",
            DeviceError::InvalidName { .. } => "DEVICE_002",
            DeviceError::SlotOutOfRange { .. } => "DEVICE_003",
            DeviceError::BankOutOfRange { .. } => "DEVICE_004",
            DeviceError::PresetIndexOutOfRange { .. } => "DEVICE_005",
            DeviceError::Metadata(_) => "DEVICE_006",
            DeviceError::UnsafeFileName { .. } => "DEVICE_007",
            DeviceError::Audio(err) => err.code(),
            DeviceError::Format(err) => err.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            DeviceError::Audio(err) => err.category(),
            DeviceError::Format(err) => err.category(),
            _ => "device",
        }
    }
}
