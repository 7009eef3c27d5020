//! Conversion between normalized f32 samples and 16-bit PCM bytes.

/// Convert f32 samples to interleaved little-endian PCM16 bytes.
/// Samples are clamped to [-1.0, 1.0] before scaling; overdriven input
/// saturates instead of wrapping.
pub fn f32_to_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        let value = (clamped * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Convert little-endian PCM16 bytes back to normalized f32 samples.
/// A trailing odd byte is ignored.
pub fn pcm16_to_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / 32768.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_scale_samples_hit_the_i16_limits() {
        let pcm = f32_to_pcm16(&[0.0, 1.0, -1.0]);
        assert_eq!(pcm.len(), 6);
        assert_eq!(i16::from_le_bytes([pcm[0], pcm[1]]), 0);
        assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), 32767);
        assert_eq!(i16::from_le_bytes([pcm[4], pcm[5]]), -32767);
    }

    #[test]
    fn out_of_range_samples_saturate() {
        let pcm = f32_to_pcm16(&[2.5, -7.0]);
        assert_eq!(i16::from_le_bytes([pcm[0], pcm[1]]), 32767);
        assert_eq!(i16::from_le_bytes([pcm[2], pcm[3]]), -32767);
    }

    #[test]
    fn round_trip_stays_within_quantization_error() {
        let samples = [0.0f32, 0.25, -0.5, 0.9, -0.9];
        let decoded = pcm16_to_f32(&f32_to_pcm16(&samples));
        assert_eq!(decoded.len(), samples.len());
        for (a, b) in samples.iter().zip(&decoded) {
            assert!((a - b).abs() < 1.0 / 32000.0, "{a} vs {b}");
        }
    }

    #[test]
    fn trailing_odd_byte_is_dropped() {
        assert_eq!(pcm16_to_f32(&[0, 0, 42]).len(), 1);
    }
}
