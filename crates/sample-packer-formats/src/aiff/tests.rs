//! Tests for the AIFF writer module.

use pretty_assertions::assert_eq;
use sample_packer_audio::SampleBuffer;

use super::chunks::{application_chunk, common_chunk, sound_data_chunk, ApplicationData};
use super::writer::{write_aiff, AiffOptions, AiffWriter};
use super::AIFF_MIME;
use crate::chunk::CHUNK_HEADER_LEN;
use crate::error::FormatError;
use crate::reader::{inspect_container, ContainerKind};

fn buffer(value: f32, frames: usize) -> SampleBuffer {
    SampleBuffer::mono(vec![value; frames], 44100).unwrap()
}

fn be_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

// =========================================================================
// Application data tests
// =========================================================================

#[test]
fn test_application_signature_validation() {
    let app = ApplicationData::new("op-1", b"{}".to_vec()).unwrap();
    assert_eq!(app.signature(), b"op-1");
    assert_eq!(app.data(), b"{}");

    for bad in ["op1", "op-1x", "", "öp1"] {
        assert!(
            matches!(
                ApplicationData::new(bad, Vec::new()),
                Err(FormatError::InvalidSignature { .. })
            ),
            "{bad:?} accepted"
        );
    }
}

#[test]
fn test_application_chunk_odd_length_unpadded() {
    let app = ApplicationData::new("test", vec![1, 2, 3]).unwrap();
    let chunk = application_chunk(&app).unwrap();
    assert_eq!(chunk.len(), CHUNK_HEADER_LEN + 7);
    assert_eq!(&chunk[0..4], b"APPL");
    assert_eq!(be_u32(&chunk, 4), 7);
    assert_eq!(&chunk[8..], b"test\x01\x02\x03");
}

// =========================================================================
// Chunk tests
// =========================================================================

#[test]
fn test_common_chunk_layout() {
    let chunk = common_chunk(350, 44100).unwrap();
    assert_eq!(
        chunk,
        vec![
            b'C', b'O', b'M', b'M', 0, 0, 0, 18, // header
            0, 1, // channels
            0, 0, 0x01, 0x5E, // frames
            0, 16, // bits
            0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0,
        ]
    );
}

#[test]
fn test_sound_data_big_endian_samples() {
    let buffers = [
        SampleBuffer::mono(vec![1.0, -1.0], 44100).unwrap(),
        buffer(0.0, 1),
    ];
    let sound = sound_data_chunk(&buffers, 44100).unwrap();
    assert_eq!(sound.frames, 3);
    assert_eq!(sound.buffer_offsets, vec![0, 2]);
    assert_eq!(&sound.bytes[0..4], b"SSND");
    assert_eq!(be_u32(&sound.bytes, 4), 8 + 6);
    assert_eq!(&sound.bytes[8..16], &[0; 8]);
    assert_eq!(sound.samples(), &[0x7F, 0xFF, 0x80, 0x00, 0x00, 0x00]);
}

#[test]
fn test_sound_data_rejects_wrong_rate() {
    let buffers = [SampleBuffer::mono(vec![0.0; 4], 48000).unwrap()];
    assert!(matches!(
        sound_data_chunk(&buffers, 44100),
        Err(FormatError::SampleRateMismatch { index: 0, .. })
    ));
}

// =========================================================================
// Whole file tests
// =========================================================================

#[test]
fn test_form_length_and_chunk_order() {
    let app = ApplicationData::new("op-1", b"{\"a\":1}".to_vec()).unwrap();
    let options = AiffOptions {
        sample_rate: 44100,
        application: Some(app),
    };
    let aiff = write_aiff(&[buffer(0.1, 10), buffer(0.2, 5)], &options).unwrap();

    assert_eq!(&aiff[0..4], b"FORM");
    assert_eq!(&aiff[8..12], b"AIFF");
    let inner = aiff.len() - 12;
    assert_eq!(be_u32(&aiff, 4) as usize, inner - 8);

    let info = inspect_container(&aiff).unwrap();
    assert_eq!(info.kind, Some(ContainerKind::Aiff));
    let tags: Vec<_> = info.chunks.iter().map(|c| c.tag_str()).collect();
    assert_eq!(tags, vec!["COMM", "SSND", "APPL"]);
    assert_eq!(info.payload(&aiff, b"APPL"), Some(&b"op-1{\"a\":1}"[..]));

    let comm = info.payload(&aiff, b"COMM").unwrap();
    assert_eq!(be_u32(comm, 2), 15);
}

#[test]
fn test_without_application_chunk() {
    let aiff = write_aiff(&[buffer(0.1, 4)], &AiffOptions::default()).unwrap();
    let info = inspect_container(&aiff).unwrap();
    assert!(info.find(b"APPL").is_none());
    assert_eq!(info.chunks.len(), 2);
}

#[test]
fn test_empty_input() {
    let aiff = write_aiff(&[], &AiffOptions::default()).unwrap();
    let info = inspect_container(&aiff).unwrap();
    assert_eq!(info.find(b"SSND").unwrap().declared_len, 8);
    assert_eq!(be_u32(&aiff, 4), 26 + 16 - 8);
}

#[test]
fn test_invalid_rate_rejected() {
    let options = AiffOptions {
        sample_rate: 0,
        application: None,
    };
    assert!(matches!(
        write_aiff(&[], &options),
        Err(FormatError::InvalidSampleRate { rate: 0 })
    ));
}

#[test]
fn test_writer_result() {
    let writer = AiffWriter::default()
        .with_application(ApplicationData::new("op-1", Vec::new()).unwrap());
    let result = writer.write_result(&[buffer(0.3, 441), buffer(0.6, 441)]).unwrap();

    assert_eq!(result.num_frames, 882);
    assert_eq!(result.buffer_offsets, vec![0, 441]);
    assert_eq!(result.pcm_hash.len(), 64);
    assert!((result.duration_seconds() - 0.02).abs() < 1e-9);

    let bare = AiffWriter::default()
        .write_result(&[buffer(0.3, 441), buffer(0.6, 441)])
        .unwrap();
    assert_eq!(result.pcm_hash, bare.pcm_hash);
    assert_eq!(AIFF_MIME, "audio/aiff");
}
