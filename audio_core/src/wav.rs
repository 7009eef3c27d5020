//! WAV container assembly and decoding.

use std::io::Cursor;

use crate::pcm::f32_to_pcm16;
use crate::AudioError;

/// Size of the fixed RIFF/fmt/data header this crate writes.
pub const WAV_HEADER_LEN: usize = 44;

/// Assemble a complete WAV file from normalized f32 samples.
///
/// The layout is fixed: RIFF header, a 16-byte `fmt ` chunk declaring
/// PCM, mono, 16 bits per sample at `sample_rate`, then one `data`
/// chunk. For N samples the data chunk size is N*2 and the RIFF size
/// field is 36 + N*2.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let pcm = f32_to_pcm16(samples);
    let data_size = pcm.len() as u32;
    let riff_size = 36 + data_size;
    let channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let block_align = channels * (bits_per_sample / 8);
    let byte_rate = sample_rate * block_align as u32;

    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&riff_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format tag
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(&pcm);
    wav
}

/// [`encode_wav`], base64-encoded for the app bridge.
pub fn encode_wav_base64(samples: &[f32], sample_rate: u32) -> String {
    crate::to_base64(&encode_wav(samples, sample_rate))
}

/// Decode a WAV file into mono normalized samples and the source rate.
/// Integer samples are scaled by their nominal full range; multichannel
/// audio is averaged down to mono.
pub fn decode_wav(bytes: &[u8]) -> Result<(Vec<f32>, u32), AudioError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| AudioError::InvalidData(format!("unreadable WAV: {e}")))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| AudioError::InvalidData(format!("bad sample data: {e}")))?,
        hound::SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(AudioError::InvalidData(format!(
                    "unsupported sample width: {} bits",
                    spec.bits_per_sample
                )));
            }
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(|e| AudioError::InvalidData(format!("bad sample data: {e}")))?
        }
    };

    Ok((mix_to_mono(&samples, spec.channels), spec.sample_rate))
}

fn mix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    let channels = channels as usize;
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}
