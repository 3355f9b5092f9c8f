//! Preprocessing pipeline tests: decode, downmix, resample, quantize.

use std::io::Cursor;

use pretty_assertions::assert_eq;
use sample_packer_audio::{Decoder, SampleBuffer, SlotList, WavDecoder};
use sample_packer_spec::BitDepth;

fn stereo_wav(frames: usize, rate: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for _ in 0..frames {
            writer.write_sample(16384i16).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

#[test]
fn test_decode_downmix_resample_quantize() {
    let mut buffer = WavDecoder.decode(&stereo_wav(441, 44100)).unwrap();
    assert_eq!(buffer.channel_count(), 2);

    buffer.convert_to_mono();
    assert_eq!(buffer.channel_count(), 1);
    assert_eq!(buffer.frames(), 441);

    buffer.resample(22050).unwrap();
    assert_eq!(buffer.sample_rate(), 22050);
    assert_eq!(buffer.frames(), 221);

    // (0.5 + 0.0) / 2 = 0.25 everywhere, resampling a constant keeps it
    assert_eq!(buffer.quantize(0, 100, BitDepth::Sixteen).unwrap(), 8191);
    assert_eq!(buffer.quantize(0, 100, BitDepth::Eight).unwrap(), 31);
    assert!(buffer.quantize(0, 221, BitDepth::Sixteen).is_err());
}

#[test]
fn test_slot_durations() {
    let mut slots: SlotList<SampleBuffer> = SlotList::with_len(4);
    slots.set(0, SampleBuffer::mono(vec![0.0; 44100], 44100).unwrap());
    slots.set(2, SampleBuffer::mono(vec![0.0; 11025], 22050).unwrap());

    assert_eq!(slots.populated().count(), 2);
    assert!((slots.duration() - 1.5).abs() < 1e-9);

    slots.move_item(2, 0);
    assert!(slots.get(0).is_some());
    assert!(slots.get(1).is_some());
    assert!(slots.get(2).is_none());
}
