//! Audio byte handling for the note client.
//!
//! The capture layer hands recordings across the app bridge as base64;
//! this crate turns them back into bytes, converts between normalized
//! f32 samples and 16-bit PCM, and assembles complete WAV files for
//! upload when a recording arrives as bare samples.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

mod pcm;
mod wav;

pub use pcm::{f32_to_pcm16, pcm16_to_f32};
pub use wav::{decode_wav, encode_wav, encode_wav_base64, WAV_HEADER_LEN};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Invalid audio data: {0}")]
    InvalidData(String),

    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Encode bytes for transport across the app bridge.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base64 payload from the app bridge. Surrounding whitespace
/// is tolerated since bridge strings often end in a newline.
pub fn from_base64(encoded: &str) -> Result<Vec<u8>, AudioError> {
    Ok(STANDARD.decode(encoded.trim())?)
}
