//! Pack manifests.
//!
//! A manifest names the target device and assigns source audio files to the
//! device's slots. File paths are kept as written; the CLI resolves relative
//! paths against the manifest's directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bit_depth::BitDepth;
use crate::error::SpecError;

/// Number of key slots in an OP-1/OP-Z drum patch.
pub const OP1_KEY_COUNT: usize = 24;

/// Number of sound slots in a Microgranny preset.
pub const MICROGRANNY_SOUND_COUNT: usize = 6;

/// Number of sample channels in a Squid Salmple bank.
pub const SQUID_CHANNEL_COUNT: usize = 8;

/// A pack manifest, tagged by target device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "device", rename_all = "snake_case")]
pub enum Manifest {
    /// Teenage Engineering OP-1/OP-Z drum patch (one AIFF).
    Op1(Op1Manifest),
    /// Bastl Microgranny preset (preset record plus WAV files).
    Microgranny(MicrogrannyManifest),
    /// Squid Salmple bank (one cue-marked WAV per channel).
    Squid(SquidManifest),
}

impl Manifest {
    /// Parses a manifest from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a manifest file.
    pub fn from_path(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Short device name as used in the `device` tag.
    pub fn device_name(&self) -> &'static str {
        match self {
            Manifest::Op1(_) => "op1",
            Manifest::Microgranny(_) => "microgranny",
            Manifest::Squid(_) => "squid",
        }
    }

    /// Every source file referenced by the manifest, in declaration order.
    pub fn source_files(&self) -> Vec<&Path> {
        match self {
            Manifest::Op1(m) => m.slots.iter().map(|s| s.file.as_path()).collect(),
            Manifest::Microgranny(m) => m
                .sounds
                .iter()
                .filter_map(|s| s.file.as_deref())
                .collect(),
            Manifest::Squid(m) => m
                .channels
                .iter()
                .flat_map(|c| c.files.iter().map(PathBuf::as_path))
                .collect(),
        }
    }
}

/// OP-1/OP-Z drum patch manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Op1Manifest {
    /// Patch name, used for the output file name (`{patch_name}.aif`).
    #[serde(default = "default_patch_name")]
    pub patch_name: String,
    /// Key assignments.
    #[serde(default)]
    pub slots: Vec<Op1SlotEntry>,
}

fn default_patch_name() -> String {
    "patch".to_string()
}

/// One key assignment in an OP-1 patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Op1SlotEntry {
    /// Key index, `0..24`.
    pub key: usize,
    /// Source audio file.
    pub file: PathBuf,
}

/// Microgranny preset manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicrogrannyManifest {
    /// Preset bank digit, `0..=9`.
    #[serde(default)]
    pub bank: u8,
    /// Preset index within the bank, `1..=6`.
    #[serde(default = "default_preset_index")]
    pub index: u8,
    /// Sound slot overrides. Slots not listed keep their defaults.
    #[serde(default)]
    pub sounds: Vec<SoundEntry>,
}

fn default_preset_index() -> u8 {
    1
}

/// One Microgranny sound slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundEntry {
    /// Slot index, `0..6`.
    pub slot: usize,
    /// Two-character file name; defaults to the slot's `00`..`05` name.
    #[serde(default)]
    pub name: Option<String>,
    /// Output bit depth for this sound's WAV file.
    #[serde(default)]
    pub bit_depth: BitDepth,
    /// Source audio file; `None` leaves the slot without a sample.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Playback options; defaults to tuned + sync.
    #[serde(default)]
    pub options: SoundOptions,
}

/// Microgranny per-sound playback options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundOptions {
    /// Pitch follows the played note.
    pub tuned: bool,
    /// Notes do not retrigger the grain envelope.
    pub legato: bool,
    /// Loop the sample.
    pub repeat: bool,
    /// Sync grains to the clock.
    pub sync: bool,
    /// Randomize the grain start.
    pub random_shift: bool,
}

impl Default for SoundOptions {
    fn default() -> Self {
        Self {
            tuned: true,
            legato: false,
            repeat: false,
            sync: true,
            random_shift: false,
        }
    }
}

impl SoundOptions {
    /// Options with every flag cleared.
    pub fn none() -> Self {
        Self {
            tuned: false,
            legato: false,
            repeat: false,
            sync: false,
            random_shift: false,
        }
    }
}

/// Squid Salmple bank manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquidManifest {
    /// Bank number, `1..=99`; `None` produces a `Bank XX` folder.
    #[serde(default)]
    pub bank: Option<u8>,
    /// Pack name written to `info.txt`.
    #[serde(default = "default_pack_name")]
    pub pack_name: String,
    /// Channel sample lists.
    #[serde(default)]
    pub channels: Vec<ChannelEntry>,
}

fn default_pack_name() -> String {
    "Sample Pack".to_string()
}

/// Samples concatenated into one Squid Salmple channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelEntry {
    /// Channel number, `1..=8`.
    pub channel: usize,
    /// Source files in playback order.
    pub files: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_op1_manifest_defaults() {
        let manifest =
            Manifest::from_json(r#"{"device": "op1", "slots": [{"key": 3, "file": "k.wav"}]}"#)
                .unwrap();
        match manifest {
            Manifest::Op1(op1) => {
                assert_eq!(op1.patch_name, "patch");
                assert_eq!(op1.slots[0].key, 3);
                assert_eq!(op1.slots[0].file, PathBuf::from("k.wav"));
            }
            other => panic!("expected op1 manifest, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_microgranny_manifest() {
        let manifest = Manifest::from_json(
            r#"{
                "device": "microgranny",
                "bank": 2,
                "index": 4,
                "sounds": [
                    {"slot": 1, "name": "B7", "bit_depth": 8, "file": "hat.wav",
                     "options": {"repeat": true}}
                ]
            }"#,
        )
        .unwrap();

        let Manifest::Microgranny(mg) = manifest else {
            panic!("expected microgranny manifest");
        };
        assert_eq!(mg.bank, 2);
        assert_eq!(mg.index, 4);
        let sound = &mg.sounds[0];
        assert_eq!(sound.name.as_deref(), Some("B7"));
        assert_eq!(sound.bit_depth, BitDepth::Eight);
        // unspecified options keep their defaults
        assert_eq!(
            sound.options,
            SoundOptions {
                repeat: true,
                ..SoundOptions::default()
            }
        );
    }

    #[test]
    fn test_parse_squid_manifest_and_sources() {
        let manifest = Manifest::from_json(
            r#"{"device": "squid", "channels": [
                {"channel": 1, "files": ["a.wav", "b.wav"]},
                {"channel": 3, "files": ["c.wav"]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(manifest.device_name(), "squid");
        assert_eq!(
            manifest.source_files(),
            vec![Path::new("a.wav"), Path::new("b.wav"), Path::new("c.wav")]
        );
        let Manifest::Squid(squid) = manifest else {
            panic!("expected squid manifest");
        };
        assert_eq!(squid.bank, None);
        assert_eq!(squid.pack_name, "Sample Pack");
    }

    #[test]
    fn test_unknown_device_rejected() {
        let err = Manifest::from_json(r#"{"device": "mpc"}"#).unwrap_err();
        assert!(matches!(err, SpecError::JsonParse(_)));
    }
}
