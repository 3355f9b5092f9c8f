//! OP-1/OP-Z drum patches.
//!
//! A drum patch is one AIFF file holding every key's sample back to back,
//! plus an `APPL` chunk signed `op-1` whose payload is a compact JSON
//! parameter block. The block's `start`/`end` arrays tell the device where
//! each of the 24 keys begins and ends in the concatenated audio, in the
//! device's own time units.

use sample_packer_audio::{SampleBuffer, SlotList};
use sample_packer_formats::aiff::{AiffOptions, AiffWriter, ApplicationData, AIFF_MIME};
use sample_packer_spec::{is_safe_file_name, OP1_KEY_COUNT};
use serde::Serialize;

use crate::bundle::{ExportBundle, OutputFile};
use crate::error::{DeviceError, DeviceResult};

/// Sample rate of drum patch audio.
pub const OP1_SAMPLE_RATE: u32 = 44100;

/// Longest patch the device is known to import without truncation.
pub const MAX_PATCH_SECONDS: f64 = 12.0;

/// Signature of the metadata `APPL` chunk.
pub const OP1_SIGNATURE: &str = "op-1";

/// Device time units per second of audio: `i32::MAX` spread over the
/// 12-second maximum.
pub const TIME_SCALE: f64 = i32::MAX as f64 / 12.0;

/// Gap between consecutive key markers, `round(TIME_SCALE / 44100)`.
pub const TIME_PADDING: i64 = 4058;

/// Start and end markers of every key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTimings {
    /// Start marker per key.
    pub start: Vec<i64>,
    /// End marker per key.
    pub end: Vec<i64>,
}

/// Computes the start/end markers for `durations` (seconds per key, `None`
/// for an empty key).
///
/// A populated key starts one padding after the previous key's end (0 for
/// the first key) and ends at `ceil(start + duration * TIME_SCALE)` minus
/// two paddings. An empty key repeats the previous key's markers (0 for the
/// first key).
pub fn key_timings(durations: &[Option<f64>]) -> KeyTimings {
    let mut start = Vec::with_capacity(durations.len());
    let mut end: Vec<i64> = Vec::with_capacity(durations.len());

    for (i, duration) in durations.iter().enumerate() {
        let previous = i.checked_sub(1);
        let (s, e) = match (duration, previous) {
            (Some(seconds), prev) => {
                let s = prev.map_or(0, |p| end[p] + TIME_PADDING);
                let e = (s as f64 + seconds * TIME_SCALE).ceil() as i64 - 2 * TIME_PADDING;
                (s, e)
            }
            (None, Some(p)) => (start[p], end[p]),
            (None, None) => (0, 0),
        };
        start.push(s);
        end.push(e);
    }

    KeyTimings { start, end }
}

/// The drum patch parameter block. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrumPatch {
    pub drum_version: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub octave: i32,
    pub pitch: Vec<i32>,
    pub playmode: Vec<i32>,
    pub reverse: Vec<i32>,
    pub volume: Vec<i32>,
    pub dyna_env: Vec<i32>,
    pub fx_active: bool,
    pub fx_type: String,
    pub fx_params: Vec<i32>,
    pub lfo_active: bool,
    pub lfo_type: String,
    pub lfo_params: Vec<i32>,
    pub start: Vec<i64>,
    pub end: Vec<i64>,
}

impl DrumPatch {
    /// Default parameters with the given key markers.
    pub fn new(timings: KeyTimings) -> Self {
        Self {
            drum_version: 1,
            kind: "drum".to_string(),
            name: "user".to_string(),
            octave: 0,
            pitch: vec![0; OP1_KEY_COUNT],
            playmode: vec![8192; OP1_KEY_COUNT],
            reverse: vec![8192; OP1_KEY_COUNT],
            volume: vec![8192; OP1_KEY_COUNT],
            dyna_env: vec![0, 8192, 0, 8192, 0, 0, 0, 0],
            fx_active: false,
            fx_type: "delay".to_string(),
            fx_params: vec![8000; 8],
            lfo_active: false,
            lfo_type: "tremolo".to_string(),
            lfo_params: vec![16000, 16000, 16000, 16000, 0, 0, 0, 0],
            start: timings.start,
            end: timings.end,
        }
    }

    /// Compact JSON encoding.
    pub fn to_json(&self) -> DeviceResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds the `op-1` application data for a key layout.
pub fn build_metadata(keys: &SlotList<SampleBuffer>) -> DeviceResult<ApplicationData> {
    let durations: Vec<Option<f64>> = keys
        .iter()
        .map(|key| key.map(SampleBuffer::duration))
        .collect();
    let json = DrumPatch::new(key_timings(&durations)).to_json()?;
    Ok(ApplicationData::new(OP1_SIGNATURE, json.into_bytes())?)
}

/// A drum patch under construction: a name and 24 key slots.
#[derive(Debug, Clone)]
pub struct Op1Patch {
    /// Patch name; the output file is `{name}.aif`.
    pub name: String,
    /// Key slots, in key order.
    pub keys: SlotList<SampleBuffer>,
}

impl Default for Op1Patch {
    fn default() -> Self {
        Self::new("patch")
    }
}

impl Op1Patch {
    /// Creates a patch with every key empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: SlotList::with_len(OP1_KEY_COUNT),
        }
    }

    /// Assigns a sample to `key`.
    pub fn assign(&mut self, key: usize, sample: SampleBuffer) -> DeviceResult<()> {
        if key >= self.keys.len() {
            return Err(DeviceError::SlotOutOfRange {
                slot: key,
                slots: self.keys.len(),
            });
        }
        self.keys.set(key, sample);
        Ok(())
    }

    /// Output file name.
    pub fn file_name(&self) -> String {
        format!("{}.aif", self.name)
    }

    /// Total duration of every assigned sample.
    pub fn duration(&self) -> f64 {
        self.keys.duration()
    }
}

/// Exports a drum patch as a single AIFF file.
///
/// Every populated key is downmixed and resampled to 44100 Hz; the key
/// markers are computed from the resampled durations. Patches longer than
/// [`MAX_PATCH_SECONDS`] are still written, with a warning.
pub fn export_patch(patch: &Op1Patch) -> DeviceResult<ExportBundle> {
    if !is_safe_file_name(&patch.name) {
        return Err(DeviceError::UnsafeFileName {
            name: patch.name.clone(),
        });
    }
    if !patch.keys.any_populated() {
        return Err(DeviceError::EmptyPatch);
    }

    let mut keys = patch.keys.clone();
    for index in 0..keys.len() {
        if let Some(buffer) = keys.get_mut(index) {
            buffer.convert_to_mono();
            buffer.resample(OP1_SAMPLE_RATE)?;
        }
    }

    let duration = keys.duration();
    if duration > MAX_PATCH_SECONDS {
        log::warn!(
            "patch '{}' is {:.2}s, over the {}s maximum; the device may truncate it",
            patch.name,
            duration,
            MAX_PATCH_SECONDS
        );
    }

    let metadata = build_metadata(&keys)?;
    let buffers: Vec<SampleBuffer> = keys.populated().cloned().collect();
    let writer = AiffWriter::new(AiffOptions {
        sample_rate: OP1_SAMPLE_RATE,
        application: None,
    })
    .with_application(metadata);
    let result = writer.write_result(&buffers)?;

    log::debug!(
        "exported patch '{}': {} keys, {:.2}s, {} bytes, pcm {}",
        patch.name,
        buffers.len(),
        result.duration_seconds(),
        result.aiff_data.len(),
        result.pcm_hash
    );

    let mut bundle = ExportBundle::new(None);
    bundle.push(
        OutputFile::new(patch.file_name(), AIFF_MIME, result.aiff_data)
            .with_pcm_hash(result.pcm_hash),
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sample_packer_formats::inspect_container;

    fn silence(frames: usize, rate: u32) -> SampleBuffer {
        SampleBuffer::mono(vec![0.0; frames], rate).unwrap()
    }

    #[test]
    fn test_padding_matches_scale() {
        assert_eq!((TIME_SCALE / 44100.0).round() as i64, TIME_PADDING);
    }

    #[test]
    fn test_timings_populated_empty_populated() {
        let timings = key_timings(&[Some(1.0), None, Some(2.0)]);

        let end0 = TIME_SCALE.ceil() as i64 - 2 * TIME_PADDING;
        assert_eq!(timings.start[0], 0);
        assert_eq!(timings.end[0], end0);

        // empty key repeats the previous markers
        assert_eq!(timings.start[1], 0);
        assert_eq!(timings.end[1], end0);

        let start2 = end0 + TIME_PADDING;
        assert_eq!(timings.start[2], start2);
        assert_eq!(
            timings.end[2],
            (start2 as f64 + 2.0 * TIME_SCALE).ceil() as i64 - 2 * TIME_PADDING
        );
        assert!(timings.end[0] < timings.start[2]);
    }

    #[test]
    fn test_timings_leading_empty_keys() {
        let timings = key_timings(&[None, None, Some(0.5)]);
        assert_eq!(&timings.start[..2], &[0, 0]);
        assert_eq!(&timings.end[..2], &[0, 0]);
        assert_eq!(timings.start[2], TIME_PADDING);
    }

    #[test]
    fn test_json_field_order() {
        let json = DrumPatch::new(key_timings(&[])).to_json().unwrap();
        let expected = concat!(
            r#"{"drum_version":1,"type":"drum","name":"user","octave":0,"#,
            r#""pitch":[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],"#,
        );
        assert!(json.starts_with(expected), "{json}");
        let tail = concat!(
            r#""dyna_env":[0,8192,0,8192,0,0,0,0],"fx_active":false,"fx_type":"delay","#,
            r#""fx_params":[8000,8000,8000,8000,8000,8000,8000,8000],"lfo_active":false,"#,
            r#""lfo_type":"tremolo","lfo_params":[16000,16000,16000,16000,0,0,0,0],"#,
            r#""start":[],"end":[]}"#,
        );
        assert!(json.ends_with(tail), "{json}");
    }

    #[test]
    fn test_metadata_has_all_keys() {
        let mut patch = Op1Patch::default();
        patch.assign(0, silence(22050, 44100)).unwrap();
        let app = build_metadata(&patch.keys).unwrap();
        assert_eq!(app.signature(), b"op-1");

        let value: serde_json::Value = serde_json::from_slice(app.data()).unwrap();
        assert_eq!(value["start"].as_array().unwrap().len(), OP1_KEY_COUNT);
        assert_eq!(value["end"].as_array().unwrap().len(), OP1_KEY_COUNT);
    }

    #[test]
    fn test_assign_out_of_range() {
        let mut patch = Op1Patch::new("kit");
        assert!(matches!(
            patch.assign(24, silence(4410, 44100)),
            Err(DeviceError::SlotOutOfRange { slot: 24, slots: 24 })
        ));
    }

    #[test]
    fn test_export_empty_patch() {
        assert!(matches!(
            export_patch(&Op1Patch::default()),
            Err(DeviceError::EmptyPatch)
        ));
    }

    #[test]
    fn test_export_resamples_and_concatenates() {
        let mut patch = Op1Patch::new("kit");
        patch.assign(0, silence(2205, 22050)).unwrap();
        patch.assign(5, silence(8820, 44100)).unwrap();

        let bundle = export_patch(&patch).unwrap();
        assert_eq!(bundle.folder, None);
        let file = bundle.file("kit.aif").unwrap();
        assert_eq!(file.mime, "audio/aiff");

        let info = inspect_container(&file.bytes).unwrap();
        let ssnd = info.find(b"SSND").unwrap();
        assert_eq!(ssnd.declared_len as usize, 8 + (4410 + 8820) * 2);
        let appl = info.payload(&file.bytes, b"APPL").unwrap();
        assert!(appl.starts_with(b"op-1{\"drum_version\":1"));
        assert_eq!(file.pcm_hash.as_ref().map(String::len), Some(64));
    }

    #[test]
    fn test_export_rejects_path_in_name() {
        for name in ["../../escaped", "sub/kit"] {
            let mut patch = Op1Patch::new(name);
            patch.assign(0, silence(10, 44100)).unwrap();
            assert!(matches!(
                export_patch(&patch),
                Err(DeviceError::UnsafeFileName { .. })
            ));
        }
    }
}
