//! End-to-end container tests: decoded sources through preprocessing into
//! finished files.

use std::io::Cursor;

use pretty_assertions::assert_eq;
use sample_packer_audio::{Decoder, SampleBuffer, WavDecoder};
use sample_packer_formats::aiff::{write_aiff, AiffOptions, ApplicationData};
use sample_packer_formats::wav::{write_wav, WavOptions};
use sample_packer_formats::{inspect_container, ContainerKind, FormatError};
use sample_packer_spec::BitDepth;

fn sine(frames: usize, rate: u32) -> SampleBuffer {
    let samples = (0..frames)
        .map(|i| (i as f32 * 0.05).sin() * 0.8)
        .collect();
    SampleBuffer::mono(samples, rate).unwrap()
}

#[test]
fn test_mixed_rate_sources_after_resampling() {
    let mut sources = vec![sine(4410, 44100), sine(2205, 22050), sine(4800, 48000)];
    for source in &mut sources {
        source.resample(44100).unwrap();
    }

    let wav = write_wav(&sources, &WavOptions::default()).unwrap();
    let info = inspect_container(&wav).unwrap();
    assert_eq!(info.kind, Some(ContainerKind::Wav));

    let cue = info.payload(&wav, b"cue ").unwrap();
    let count = u32::from_le_bytes([cue[0], cue[1], cue[2], cue[3]]);
    assert_eq!(count, 3);

    // the output decodes back to one mono buffer at the container rate
    let decoded = WavDecoder.decode(&wav).unwrap();
    assert_eq!(decoded.channel_count(), 1);
    assert_eq!(decoded.sample_rate(), 44100);
    assert_eq!(decoded.frames(), 4410 * 3);
}

#[test]
fn test_unresampled_source_is_rejected() {
    let sources = vec![sine(100, 44100), sine(100, 22050)];
    let err = write_wav(&sources, &WavOptions::default()).unwrap_err();
    assert!(matches!(err, FormatError::SampleRateMismatch { index: 1, .. }));

    let err = write_aiff(&sources, &AiffOptions::default()).unwrap_err();
    assert!(matches!(err, FormatError::SampleRateMismatch { index: 1, .. }));
}

#[test]
fn test_eight_bit_wav_round_trips_through_hound() {
    let options = WavOptions {
        sample_rate: 22050,
        bit_depth: BitDepth::Eight,
        cue_points: false,
    };
    let wav = write_wav(&[sine(64, 22050)], &options).unwrap();
    let reader = hound::WavReader::new(Cursor::new(&wav)).unwrap();
    assert_eq!(reader.spec().bits_per_sample, 8);
    assert_eq!(reader.len(), 64);
}

#[test]
fn test_aiff_with_metadata_walks_cleanly() {
    let app = ApplicationData::new("op-1", br#"{"drum_version":1}"#.to_vec()).unwrap();
    let options = AiffOptions {
        sample_rate: 44100,
        application: Some(app),
    };
    let aiff = write_aiff(&[sine(1000, 44100), sine(333, 44100)], &options).unwrap();
    let info = inspect_container(&aiff).unwrap();

    let ssnd = info.find(b"SSND").unwrap();
    assert_eq!(ssnd.declared_len, 8 + 1333 * 2);
    let appl = info.payload(&aiff, b"APPL").unwrap();
    assert!(appl.starts_with(b"op-1{"));
}
