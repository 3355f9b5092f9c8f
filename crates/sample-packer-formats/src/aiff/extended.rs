//! 80-bit IEEE 754 extended precision sample rates.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{FormatError, FormatResult};

const EXPONENT_BIAS: i32 = 16383;

/// Encodes an integer sample rate as a big-endian 80-bit extended float.
///
/// The layout is a sign bit and 15-bit biased exponent, followed by a
/// 64-bit mantissa with an explicit integer bit. Integer rates are always
/// exact.
///
/// ```
/// use sample_packer_formats::aiff::extended_sample_rate;
///
/// let bytes = extended_sample_rate(44100).unwrap();
/// assert_eq!(bytes, [0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0]);
/// ```
pub fn extended_sample_rate(rate: u32) -> FormatResult<[u8; 10]> {
    if rate == 0 {
        return Err(FormatError::InvalidSampleRate { rate });
    }
    let msb = 31 - rate.leading_zeros();
    let exponent = (EXPONENT_BIAS + msb as i32) as u16;
    let mantissa = u64::from(rate) << (63 - msb);

    let mut bytes = [0u8; 10];
    BigEndian::write_u16(&mut bytes[0..2], exponent);
    BigEndian::write_u64(&mut bytes[2..10], mantissa);
    Ok(bytes)
}

/// Decodes an 80-bit extended float, as found in a `COMM` chunk.
pub fn read_extended(bytes: &[u8; 10]) -> f64 {
    let sign_exponent = BigEndian::read_u16(&bytes[0..2]);
    let mantissa = BigEndian::read_u64(&bytes[2..10]);
    if mantissa == 0 {
        return 0.0;
    }
    let exponent = i32::from(sign_exponent & 0x7FFF) - EXPONENT_BIAS - 63;
    let value = mantissa as f64 * 2f64.powi(exponent);
    if sign_exponent & 0x8000 != 0 {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_common_rates() {
        assert_eq!(
            extended_sample_rate(44100).unwrap(),
            [0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            extended_sample_rate(22050).unwrap(),
            [0x40, 0x0D, 0xAC, 0x44, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            extended_sample_rate(48000).unwrap(),
            [0x40, 0x0E, 0xBB, 0x80, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            extended_sample_rate(1).unwrap(),
            [0x3F, 0xFF, 0x80, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(matches!(
            extended_sample_rate(0),
            Err(FormatError::InvalidSampleRate { rate: 0 })
        ));
    }

    #[test]
    fn test_decode_matches_encode() {
        for rate in [8000u32, 11025, 22050, 32000, 44100, 96000, 192000, u32::MAX] {
            let bytes = extended_sample_rate(rate).unwrap();
            assert_eq!(read_extended(&bytes), f64::from(rate));
        }
    }
}
