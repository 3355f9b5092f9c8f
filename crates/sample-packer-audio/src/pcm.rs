//! Float to integer PCM quantization.

use sample_packer_spec::BitDepth;

/// Converts one float sample to a signed integer of the given bit depth.
///
/// The input is clamped to [-1.0, 1.0]. Negative values scale by
/// `2^(bits - 1)` and non-negative values by `2^(bits - 1) - 1`, so full
/// scale maps onto the whole signed range without overflowing on the
/// positive side. The scaled value is truncated toward zero.
///
/// # Arguments
/// * `sample` - Float sample, nominally in [-1.0, 1.0]
/// * `depth` - Target bit depth
///
/// # Returns
/// Quantized sample in `-2^(bits-1)..=2^(bits-1)-1`
pub fn quantize_sample(sample: f32, depth: BitDepth) -> i32 {
    let clamped = f64::from(sample).clamp(-1.0, 1.0);
    let scaled = if clamped < 0.0 {
        clamped * depth.negative_scale()
    } else {
        clamped * depth.positive_scale()
    };
    // NaN falls through the clamp and saturates to 0 here
    scaled.trunc() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_scale_16() {
        assert_eq!(quantize_sample(-1.0, BitDepth::Sixteen), -32768);
        assert_eq!(quantize_sample(1.0, BitDepth::Sixteen), 32767);
        assert_eq!(quantize_sample(0.0, BitDepth::Sixteen), 0);
    }

    #[test]
    fn test_full_scale_8() {
        assert_eq!(quantize_sample(-1.0, BitDepth::Eight), -128);
        assert_eq!(quantize_sample(1.0, BitDepth::Eight), 127);
    }

    #[test]
    fn test_asymmetric_half_scale() {
        assert_eq!(quantize_sample(-0.5, BitDepth::Sixteen), -16384);
        // 0.5 * 32767 = 16383.5, truncated
        assert_eq!(quantize_sample(0.5, BitDepth::Sixteen), 16383);
    }

    #[test]
    fn test_clipping() {
        assert_eq!(quantize_sample(2.0, BitDepth::Sixteen), 32767);
        assert_eq!(quantize_sample(-2.0, BitDepth::Sixteen), -32768);
        assert_eq!(quantize_sample(f32::NAN, BitDepth::Sixteen), 0);
    }

    #[test]
    fn test_monotonic() {
        for depth in [BitDepth::Eight, BitDepth::Sixteen] {
            let mut previous = i32::MIN;
            for step in -1100..=1100 {
                let value = quantize_sample(step as f32 / 1000.0, depth);
                assert!(value >= previous, "{} < {} at step {}", value, previous, step);
                previous = value;
            }
        }
    }
}
