//! Manifest validation.
//!
//! Validation collects every problem instead of stopping at the first one so
//! the CLI can report them all at once.

use std::collections::HashSet;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::manifest::{
    Manifest, MicrogrannyManifest, Op1Manifest, SquidManifest, MICROGRANNY_SOUND_COUNT,
    OP1_KEY_COUNT, SQUID_CHANNEL_COUNT,
};

/// Returns true if `name` is exactly two characters from `0-9` or `A-Z`.
pub fn is_valid_sound_name(name: &str) -> bool {
    name.len() == 2
        && name
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
}

/// Returns true if `name` can be used as a single output file name: no path
/// separators, no `..` and no control characters.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.contains(['/', '\\'])
        && !name.contains("..")
        && !name.chars().any(char::is_control)
}

/// Validates a manifest against the limits of its target device.
pub fn validate_manifest(manifest: &Manifest) -> ValidationResult {
    let mut result = ValidationResult::success();

    match manifest {
        Manifest::Op1(m) => validate_op1(m, &mut result),
        Manifest::Microgranny(m) => validate_microgranny(m, &mut result),
        Manifest::Squid(m) => validate_squid(m, &mut result),
    }

    result
}

fn validate_op1(manifest: &Op1Manifest, result: &mut ValidationResult) {
    if manifest.patch_name.trim().is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptyName,
            "patch name is empty",
            "patch_name",
        ));
    } else if !is_safe_file_name(&manifest.patch_name) {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsafeFileName,
            format!(
                "patch name '{}' must not contain path separators, '..' or control characters",
                manifest.patch_name.escape_debug()
            ),
            "patch_name",
        ));
    }

    if manifest.slots.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoSources,
            "an OP-1 patch needs at least one populated key",
            "slots",
        ));
    }

    let mut seen = HashSet::new();
    for (i, slot) in manifest.slots.iter().enumerate() {
        let path = format!("slots[{}].key", i);
        if slot.key >= OP1_KEY_COUNT {
            result.add_error(ValidationError::with_path(
                ErrorCode::SlotOutOfRange,
                format!("key {} out of range 0..{}", slot.key, OP1_KEY_COUNT),
                path,
            ));
        } else if !seen.insert(slot.key) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateSlot,
                format!("key {} assigned more than once", slot.key),
                path,
            ));
        }
    }
}

fn validate_microgranny(manifest: &MicrogrannyManifest, result: &mut ValidationResult) {
    if manifest.bank > 9 {
        result.add_error(ValidationError::with_path(
            ErrorCode::BankOutOfRange,
            format!("preset bank {} out of range 0..=9", manifest.bank),
            "bank",
        ));
    }
    if !(1..=6).contains(&manifest.index) {
        result.add_error(ValidationError::with_path(
            ErrorCode::PresetIndexOutOfRange,
            format!("preset index {} out of range 1..=6", manifest.index),
            "index",
        ));
    }

    let mut slots = HashSet::new();
    for (i, sound) in manifest.sounds.iter().enumerate() {
        if sound.slot >= MICROGRANNY_SOUND_COUNT {
            result.add_error(ValidationError::with_path(
                ErrorCode::SlotOutOfRange,
                format!(
                    "sound slot {} out of range 0..{}",
                    sound.slot, MICROGRANNY_SOUND_COUNT
                ),
                format!("sounds[{}].slot", i),
            ));
        } else if !slots.insert(sound.slot) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateSlot,
                format!("sound slot {} listed more than once", sound.slot),
                format!("sounds[{}].slot", i),
            ));
        }

        if let Some(name) = &sound.name {
            if !is_valid_sound_name(name) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidSoundName,
                    format!("'{}' is not two characters from 0-9/A-Z", name),
                    format!("sounds[{}].name", i),
                ));
            }
        }
    }

    // Resolve the final name of every slot (overrides on top of 00..05) and
    // make sure no two populated sounds share an output file.
    let mut names: Vec<String> = (0..MICROGRANNY_SOUND_COUNT)
        .map(|slot| format!("{:02}", slot))
        .collect();
    let mut populated = vec![false; MICROGRANNY_SOUND_COUNT];
    for sound in &manifest.sounds {
        if sound.slot < MICROGRANNY_SOUND_COUNT {
            if let Some(name) = &sound.name {
                names[sound.slot] = name.clone();
            }
            populated[sound.slot] = sound.file.is_some();
        }
    }
    let mut taken = HashSet::new();
    for (slot, name) in names.iter().enumerate() {
        if populated[slot] && !taken.insert(name.as_str()) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateSoundName,
                format!("two sounds would both be written to {}.WAV", name),
                format!("sounds[slot={}].name", slot),
            ));
        }
    }
}

fn validate_squid(manifest: &SquidManifest, result: &mut ValidationResult) {
    match manifest.bank {
        None => result.add_warning(ValidationWarning::with_path(
            WarningCode::UnassignedBank,
            "no bank number, output folder will be named 'Bank XX'",
            "bank",
        )),
        Some(bank) if !(1..=99).contains(&bank) => {
            result.add_error(ValidationError::with_path(
                ErrorCode::BankOutOfRange,
                format!("bank {} out of range 1..=99", bank),
                "bank",
            ))
        }
        Some(_) => {}
    }

    if manifest.pack_name.trim().is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptyName,
            "pack name is empty",
            "pack_name",
        ));
    }

    if manifest.channels.iter().all(|c| c.files.is_empty()) {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoSources,
            "a Squid Salmple bank needs at least one sample",
            "channels",
        ));
    }

    let mut seen = HashSet::new();
    for (i, channel) in manifest.channels.iter().enumerate() {
        let path = format!("channels[{}].channel", i);
        if !(1..=SQUID_CHANNEL_COUNT).contains(&channel.channel) {
            result.add_error(ValidationError::with_path(
                ErrorCode::SlotOutOfRange,
                format!(
                    "channel {} out of range 1..={}",
                    channel.channel, SQUID_CHANNEL_COUNT
                ),
                path,
            ));
        } else if !seen.insert(channel.channel) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateSlot,
                format!("channel {} listed more than once", channel.channel),
                path,
            ));
        }
    }
}
