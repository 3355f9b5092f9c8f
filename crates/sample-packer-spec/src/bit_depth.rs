//! Supported PCM bit depths.

use serde::{Deserialize, Serialize};

/// Bit depth of quantized PCM output.
///
/// Serialized as the plain number of bits (`8` or `16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum BitDepth {
    /// 8-bit PCM.
    Eight,
    /// 16-bit PCM.
    #[default]
    Sixteen,
}

impl BitDepth {
    /// Number of bits per sample.
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
        }
    }

    /// Number of bytes per sample.
    pub fn bytes(self) -> usize {
        usize::from(self.bits() / 8)
    }

    /// Magnitude used to scale negative samples (`2^(bits - 1)`).
    pub fn negative_scale(self) -> f64 {
        f64::from(1u32 << (self.bits() - 1))
    }

    /// Magnitude used to scale non-negative samples (`2^(bits - 1) - 1`).
    pub fn positive_scale(self) -> f64 {
        self.negative_scale() - 1.0
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = String;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            other => Err(format!("unsupported bit depth {} (expected 8 or 16)", other)),
        }
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> Self {
        depth.bits()
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales() {
        assert_eq!(BitDepth::Sixteen.negative_scale(), 32768.0);
        assert_eq!(BitDepth::Sixteen.positive_scale(), 32767.0);
        assert_eq!(BitDepth::Eight.negative_scale(), 128.0);
        assert_eq!(BitDepth::Eight.positive_scale(), 127.0);
        assert_eq!(BitDepth::Eight.bytes(), 1);
        assert_eq!(BitDepth::Sixteen.bytes(), 2);
    }

    #[test]
    fn test_serde_as_number() {
        let depth: BitDepth = serde_json::from_str("8").unwrap();
        assert_eq!(depth, BitDepth::Eight);
        assert_eq!(serde_json::to_string(&BitDepth::Sixteen).unwrap(), "16");
        assert!(serde_json::from_str::<BitDepth>("24").is_err());
    }
}
