//! Sample rate conversion.
//!
//! Offline linear interpolation. Exact filter behavior is not part of any
//! output contract; only the output length is.

use crate::error::{AudioError, AudioResult};

/// Number of output frames when converting `frames` from `from_rate` to `to_rate`.
///
/// `round(frames * to_rate / from_rate)`.
pub fn resampled_len(frames: usize, from_rate: u32, to_rate: u32) -> usize {
    let len = frames as f64 * f64::from(to_rate) / f64::from(from_rate);
    len.round() as usize
}

/// Resamples one channel of audio.
///
/// # Arguments
/// * `samples` - Input samples
/// * `from_rate` - Source sample rate in Hz
/// * `to_rate` - Target sample rate in Hz
///
/// # Returns
/// Resampled samples, or an error if either rate is zero
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> AudioResult<Vec<f32>> {
    if from_rate == 0 {
        return Err(AudioError::InvalidSampleRate { rate: from_rate });
    }
    if to_rate == 0 {
        return Err(AudioError::InvalidSampleRate { rate: to_rate });
    }

    if from_rate == to_rate {
        return Ok(samples.to_vec());
    }

    let output_len = resampled_len(samples.len(), from_rate, to_rate);
    if samples.is_empty() || output_len == 0 {
        return Ok(Vec::new());
    }

    let step = f64::from(from_rate) / f64::from(to_rate);
    let last = samples.len() - 1;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_pos = i as f64 * step;
        let src_idx = src_pos.floor() as usize;

        if src_idx >= last {
            output.push(samples[last]);
        } else {
            let frac = (src_pos - src_idx as f64) as f32;
            output.push(samples[src_idx] * (1.0 - frac) + samples[src_idx + 1] * frac);
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resampled_len_rounds() {
        assert_eq!(resampled_len(48000, 48000, 44100), 44100);
        assert_eq!(resampled_len(44100, 44100, 22050), 22050);
        assert_eq!(resampled_len(3, 48000, 44100), 3);
        assert_eq!(resampled_len(1, 44100, 22050), 1); // 0.5 rounds away from zero
        assert_eq!(resampled_len(0, 44100, 22050), 0);
    }

    #[test]
    fn test_same_rate_is_copy() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(resample_linear(&samples, 44100, 44100).unwrap(), samples);
    }

    #[test]
    fn test_downsample_by_two_picks_even_samples() {
        let samples: Vec<f32> = (0..8).map(|i| i as f32).collect();
        let out = resample_linear(&samples, 44100, 22050).unwrap();
        assert_eq!(out, vec![0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_upsample_interpolates() {
        let samples = vec![0.0, 1.0];
        let out = resample_linear(&samples, 22050, 44100).unwrap();
        assert_eq!(out, vec![0.0, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(matches!(
            resample_linear(&[0.0], 0, 44100),
            Err(AudioError::InvalidSampleRate { rate: 0 })
        ));
        assert!(matches!(
            resample_linear(&[0.0], 44100, 0),
            Err(AudioError::InvalidSampleRate { rate: 0 })
        ));
    }
}
