//! sample-packer manifest library
//!
//! This crate holds the types shared by every sample-packer crate: the pack
//! manifest that describes which decoded samples go into which device slot,
//! its validation rules, the bit depths the encoders support, and the error
//! reporting trait implemented by each backend error type.
//!
//! # Example
//!
//! ```
//! use sample_packer_spec::{validate_manifest, Manifest};
//!
//! let manifest = Manifest::from_json(
//!     r#"{"device": "squid", "bank": 86, "pack_name": "Drums",
//!         "channels": [{"channel": 1, "files": ["kick.wav", "snare.wav"]}]}"#,
//! )
//! .unwrap();
//!
//! let result = validate_manifest(&manifest);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`bit_depth`]: Supported PCM bit depths
//! - [`error`]: Error codes, validation errors and the backend error trait
//! - [`manifest`]: Per-device pack manifests
//! - [`validation`]: Manifest validation

pub mod bit_depth;
pub mod error;
pub mod manifest;
pub mod validation;

pub use bit_depth::BitDepth;
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use manifest::{
    ChannelEntry, Manifest, MicrogrannyManifest, Op1Manifest, Op1SlotEntry, SoundEntry,
    SoundOptions, SquidManifest, MICROGRANNY_SOUND_COUNT, OP1_KEY_COUNT, SQUID_CHANNEL_COUNT,
};
pub use validation::{is_safe_file_name, is_valid_sound_name, validate_manifest};
