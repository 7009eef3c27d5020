//! MIME handling for payloads crossing the API boundary.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Fallback container extension when a MIME type is unknown. Captures
/// from browser recorders arrive as WebM unless told otherwise.
pub const FALLBACK_AUDIO_EXT: &str = "webm";

/// Map an audio MIME type to the file extension the transcription
/// endpoint expects on the uploaded part. The service checks container
/// support by extension; the mapping is a fixed table.
/// Codec parameters (`audio/webm;codecs=opus`) are ignored.
pub fn extension_for_mime(mime: &str) -> &'static str {
    let essence = mime.split(';').next().unwrap_or(mime).trim();
    match essence {
        "audio/webm" | "video/webm" => "webm",
        "audio/mp4" | "audio/x-m4a" | "audio/m4a" => "m4a",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/ogg" | "application/ogg" => "ogg",
        "audio/flac" | "audio/x-flac" => "flac",
        _ => FALLBACK_AUDIO_EXT,
    }
}

/// Reverse lookup for callers that only know a file extension, such as
/// the CLI reading from disk. Covers the audio containers above plus the
/// image types the vision call accepts.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_ascii_lowercase().as_str() {
        "webm" => "audio/webm",
        "m4a" => "audio/mp4",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        _ => return None,
    };
    Some(mime)
}

/// Inline a binary payload as an RFC 2397 data URL for the vision call.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
