//! Bastl Microgranny presets.
//!
//! A preset is a `P{bank}{index}.TXT` file holding one fixed 13-byte record
//! per sound slot, plus the sound files themselves as `{name}.WAV` at
//! 22050 Hz. Each record starts from a constant bit template; the sound's
//! two-character file name and its playback options overwrite fixed bit
//! positions.
//!
//! Bits are numbered from the most significant bit of byte 0: bit `i` is
//! `byte[i / 8] & (1 << (7 - i % 8))`.

use std::fmt;

use rayon::prelude::*;
use sample_packer_audio::{SampleBuffer, SlotList};
use sample_packer_formats::wav::{WavOptions, WavResult, WavWriter, WAV_MIME};
use sample_packer_spec::{is_valid_sound_name, BitDepth, SoundOptions, MICROGRANNY_SOUND_COUNT};

use crate::bundle::{ExportBundle, OutputFile, PRESET_MIME};
use crate::error::{DeviceError, DeviceResult};

/// Sample rate of preset sound files.
pub const MICROGRANNY_SAMPLE_RATE: u32 = 22050;

/// Bytes per sound record (100 bits, zero padded).
pub const RECORD_LEN: usize = 13;

/// Record template: `01101101 00000011 00000000 00000000 00000000 00100000
/// 00000000 11111110 00000111 00000100 10000011 00000000` then zero bits.
const TEMPLATE: [u8; RECORD_LEN] = [
    0x6D, 0x03, 0x00, 0x00, 0x00, 0x20, 0x00, 0xFE, 0x07, 0x04, 0x83, 0x00, 0x00,
];

const RANDOM_SHIFT_BIT: usize = 65;
const SYNC_BIT: usize = 66;
const REPEAT_BIT: usize = 67;
const LEGATO_BIT: usize = 68;
const TUNED_BIT: usize = 69;
const FIRST_CHAR_BIT: usize = 71;
const SECOND_CHAR_BIT: usize = 80;
const ALPHA_FIRST_BIT: usize = 87;

/// A two-character sound file name from `0-9`/`A-Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundName([u8; 2]);

impl SoundName {
    /// Parses a name, rejecting anything but two characters from `0-9`/`A-Z`.
    pub fn parse(name: &str) -> DeviceResult<Self> {
        if !is_valid_sound_name(name) {
            return Err(DeviceError::InvalidName {
                name: name.to_string(),
            });
        }
        let bytes = name.as_bytes();
        Ok(Self([bytes[0], bytes[1]]))
    }

    /// Default name of slot `index`: `00`, `01`, ...
    fn for_slot(index: usize) -> Self {
        let tens = b'0' + (index / 10 % 10) as u8;
        let ones = b'0' + (index % 10) as u8;
        Self([tens, ones])
    }

    /// The two name characters.
    pub fn chars(&self) -> [u8; 2] {
        self.0
    }

    /// File name of the sound's WAV: `{name}.WAV`.
    pub fn file_name(&self) -> String {
        format!("{self}.WAV")
    }
}

impl fmt::Display for SoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(self.0[0]), char::from(self.0[1]))
    }
}

/// One sound slot of a preset.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetSlot {
    /// Sound file name.
    pub name: SoundName,
    /// Playback options.
    pub options: SoundOptions,
    /// Bit depth of the exported WAV.
    pub bit_depth: BitDepth,
    /// Attached sample, if any.
    pub sample: Option<SampleBuffer>,
}

impl PresetSlot {
    /// Default slot `index`: its numeric name, 16-bit, tuned + sync, no sample.
    pub fn with_defaults(index: usize) -> Self {
        Self {
            name: SoundName::for_slot(index),
            options: SoundOptions::default(),
            bit_depth: BitDepth::Sixteen,
            sample: None,
        }
    }
}

/// The six default sound slots.
pub fn default_slots() -> SlotList<PresetSlot> {
    SlotList::from_slots(
        (0..MICROGRANNY_SOUND_COUNT)
            .map(|i| Some(PresetSlot::with_defaults(i)))
            .collect(),
    )
}

fn set_bit(record: &mut [u8; RECORD_LEN], bit: usize, value: bool) {
    let mask = 1 << (7 - bit % 8);
    if value {
        record[bit / 8] |= mask;
    } else {
        record[bit / 8] &= !mask;
    }
}

fn write_char(record: &mut [u8; RECORD_LEN], first_bit: usize, c: u8) {
    for k in 0..7 {
        set_bit(record, first_bit + k, (c >> (6 - k)) & 1 == 1);
    }
}

/// Encodes one sound record.
///
/// A `None` slot encodes as the name `A1` with every option cleared.
pub fn encode_record(slot: Option<&PresetSlot>) -> [u8; RECORD_LEN] {
    let (name, options) = match slot {
        Some(slot) => (slot.name.chars(), slot.options),
        None => (*b"A1", SoundOptions::none()),
    };

    let mut record = TEMPLATE;
    write_char(&mut record, FIRST_CHAR_BIT, name[0]);
    write_char(&mut record, SECOND_CHAR_BIT, name[1]);
    // names starting with a digit keep this bit clear
    set_bit(&mut record, ALPHA_FIRST_BIT, name[0] > b'0');

    set_bit(&mut record, TUNED_BIT, options.tuned);
    set_bit(&mut record, LEGATO_BIT, options.legato);
    set_bit(&mut record, REPEAT_BIT, options.repeat);
    set_bit(&mut record, SYNC_BIT, options.sync);
    set_bit(&mut record, RANDOM_SHIFT_BIT, options.random_shift);
    record
}

/// Encodes a whole preset: one record per slot, in slot order.
pub fn encode_preset(slots: &SlotList<PresetSlot>) -> Vec<u8> {
    slots.iter().flat_map(encode_record).collect()
}

/// Preset file name `P{bank}{index}.TXT`.
pub fn preset_file_name(bank: u8, index: u8) -> DeviceResult<String> {
    if bank > 9 {
        return Err(DeviceError::BankOutOfRange {
            bank,
            min: 0,
            max: 9,
        });
    }
    if !(1..=MICROGRANNY_SOUND_COUNT as u8).contains(&index) {
        return Err(DeviceError::PresetIndexOutOfRange { index });
    }
    Ok(format!("P{bank}{index}.TXT"))
}

/// A preset under construction.
#[derive(Debug, Clone)]
pub struct Preset {
    /// Bank digit, `0..=9`.
    pub bank: u8,
    /// Index within the bank, `1..=6`.
    pub index: u8,
    /// Sound slots.
    pub sounds: SlotList<PresetSlot>,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            bank: 0,
            index: 1,
            sounds: default_slots(),
        }
    }
}

impl Preset {
    /// Preset file name.
    pub fn file_name(&self) -> DeviceResult<String> {
        preset_file_name(self.bank, self.index)
    }

    /// Mutable access to sound `slot`.
    pub fn sound_mut(&mut self, slot: usize) -> DeviceResult<&mut PresetSlot> {
        let slots = self.sounds.len();
        self.sounds
            .get_mut(slot)
            .ok_or(DeviceError::SlotOutOfRange { slot, slots })
    }

    /// Preset record bytes.
    pub fn encode(&self) -> Vec<u8> {
        encode_preset(&self.sounds)
    }
}

fn encode_sound(slot: &PresetSlot, sample: &SampleBuffer) -> DeviceResult<WavResult> {
    let mut buffer = sample.clone();
    buffer.convert_to_mono();
    buffer.resample(MICROGRANNY_SAMPLE_RATE)?;

    let writer = WavWriter::new(WavOptions {
        sample_rate: MICROGRANNY_SAMPLE_RATE,
        bit_depth: slot.bit_depth,
        cue_points: false,
    });
    Ok(writer.write_result(&[buffer])?)
}

/// Exports a preset: the record file plus one WAV per sound with a sample.
///
/// Files go in a folder named after the first three characters of the
/// preset file name (`P01`). Sound files are encoded in parallel; a sound
/// that fails to encode is skipped and the rest of the preset is kept.
pub fn export_preset(preset: &Preset) -> DeviceResult<ExportBundle> {
    let file_name = preset.file_name()?;
    let mut bundle = ExportBundle::new(Some(file_name[..3].to_string()));
    bundle.push(OutputFile::new(&file_name, PRESET_MIME, preset.encode()));

    let jobs: Vec<(&PresetSlot, &SampleBuffer)> = preset
        .sounds
        .populated()
        .filter_map(|slot| slot.sample.as_ref().map(|sample| (slot, sample)))
        .collect();

    let encoded: Vec<(String, DeviceResult<WavResult>)> = jobs
        .par_iter()
        .map(|(slot, sample)| (slot.name.file_name(), encode_sound(slot, sample)))
        .collect();

    for (name, result) in encoded {
        match result {
            Ok(wav) => bundle
                .push(OutputFile::new(name, WAV_MIME, wav.wav_data).with_pcm_hash(wav.pcm_hash)),
            Err(err) => bundle.skip(name, err),
        }
    }

    log::debug!(
        "exported preset {}: {} files, {} skipped",
        file_name,
        bundle.files.len(),
        bundle.skipped.len()
    );
    Ok(bundle)
}
