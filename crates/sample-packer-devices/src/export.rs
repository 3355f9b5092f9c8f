//! Manifest-driven exports.
//!
//! Resolves every source file named in a manifest, decodes it, fills the
//! device's slots and runs the device exporter. A source that cannot be
//! read or decoded leaves its slot empty and the export carries on.

use std::path::Path;

use sample_packer_audio::{Decoder, SampleBuffer};
use sample_packer_spec::{Manifest, MicrogrannyManifest, Op1Manifest, SquidManifest};

use crate::bundle::ExportBundle;
use crate::error::{DeviceError, DeviceResult};
use crate::microgranny::{export_preset, Preset, SoundName};
use crate::op1::{export_patch, Op1Patch};
use crate::squid::{export_bank, SquidBank};

fn load_sample(decoder: &dyn Decoder, base_dir: &Path, file: &Path) -> Option<SampleBuffer> {
    let path = base_dir.join(file);
    match decoder.decode_file(&path) {
        Ok(buffer) => {
            log::debug!(
                "loaded {}: {} ch, {} Hz, {:.3}s",
                path.display(),
                buffer.channel_count(),
                buffer.sample_rate(),
                buffer.duration()
            );
            Some(buffer)
        }
        Err(err) => {
            log::warn!("could not decode {}, leaving slot empty: {}", path.display(), err);
            None
        }
    }
}

/// Builds an OP-1 patch from a manifest.
pub fn op1_patch(
    manifest: &Op1Manifest,
    base_dir: &Path,
    decoder: &dyn Decoder,
) -> DeviceResult<Op1Patch> {
    let mut patch = Op1Patch::new(manifest.patch_name.clone());
    for entry in &manifest.slots {
        if let Some(sample) = load_sample(decoder, base_dir, &entry.file) {
            patch.assign(entry.key, sample)?;
        }
    }
    Ok(patch)
}

/// Builds a Microgranny preset from a manifest. Slots the manifest does not
/// mention keep their defaults.
pub fn microgranny_preset(
    manifest: &MicrogrannyManifest,
    base_dir: &Path,
    decoder: &dyn Decoder,
) -> DeviceResult<Preset> {
    let mut preset = Preset {
        bank: manifest.bank,
        index: manifest.index,
        ..Preset::default()
    };
    for entry in &manifest.sounds {
        let sound = preset.sound_mut(entry.slot)?;
        if let Some(name) = &entry.name {
            sound.name = SoundName::parse(name)?;
        }
        sound.bit_depth = entry.bit_depth;
        sound.options = entry.options;
        sound.sample = entry
            .file
            .as_deref()
            .and_then(|file| load_sample(decoder, base_dir, file));
    }
    Ok(preset)
}

/// Builds a Squid Salmple bank from a manifest.
pub fn squid_bank(
    manifest: &SquidManifest,
    base_dir: &Path,
    decoder: &dyn Decoder,
) -> DeviceResult<SquidBank> {
    let mut bank = SquidBank {
        bank: manifest.bank,
        pack_name: manifest.pack_name.clone(),
        ..SquidBank::default()
    };
    for entry in &manifest.channels {
        // manifest channels are 1-based
        let channel = entry
            .channel
            .checked_sub(1)
            .ok_or(DeviceError::SlotOutOfRange {
                slot: entry.channel,
                slots: bank.channels.len(),
            })?;
        for file in &entry.files {
            if let Some(sample) = load_sample(decoder, base_dir, file) {
                bank.push(channel, sample)?;
            }
        }
    }
    Ok(bank)
}

/// Decodes a manifest's sources and exports the device files.
///
/// # Arguments
/// * `manifest` - Parsed pack manifest
/// * `base_dir` - Directory relative source paths are resolved against
/// * `decoder` - Decoder for the source files
pub fn export_manifest(
    manifest: &Manifest,
    base_dir: &Path,
    decoder: &dyn Decoder,
) -> DeviceResult<ExportBundle> {
    log::info!(
        "exporting {} pack with {} source files",
        manifest.device_name(),
        manifest.source_files().len()
    );
    match manifest {
        Manifest::Op1(m) => export_patch(&op1_patch(m, base_dir, decoder)?),
        Manifest::Microgranny(m) => export_preset(&microgranny_preset(m, base_dir, decoder)?),
        Manifest::Squid(m) => export_bank(&squid_bank(m, base_dir, decoder)?),
    }
}
