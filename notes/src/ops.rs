//! Operations the app shell invokes, with the failure policy applied.
//!
//! Text-producing operations never fail outward: an API error becomes a
//! readable placeholder in the field it would have filled, and a note is
//! still created around it. Speech synthesis is the exception and
//! propagates its error; audio has no field to carry a message.

use std::fmt::Display;

use ai_core::{ApiClient, ApiError, ChatMessage, ChatSession, SpeechAudio};
use tracing::{error, info};

use crate::note::{Note, NoteKind};
use crate::text::clean_for_speech;

const SUMMARY_PROMPT: &str = "Summarize the note you are given in two or three short \
sentences. Answer in the language the note is written in.";

const ASK_PROMPT: &str = "You are the assistant inside a note-taking app. Answer the \
user's questions from their notes below. When the notes do not cover a question, say so \
instead of guessing.";

/// Failure text that lands where the result would have gone.
fn placeholder(action: &str, err: &dyn Display) -> String {
    format!("[{action} failed: {err}]")
}

/// Summarize a note's body. Returns the summary, or a placeholder when
/// the note is empty or the call fails.
pub async fn summarize(client: &ApiClient, note: &Note) -> String {
    if note.body.trim().is_empty() {
        return placeholder(
            "summary",
            &ApiError::InvalidInput("note has no content".to_string()),
        );
    }

    let messages = [
        ChatMessage::system(SUMMARY_PROMPT),
        ChatMessage::user(note.body.clone()),
    ];
    match client.chat(&messages).await {
        Ok(summary) => {
            info!(note = %note.id, "summarized note");
            summary
        }
        Err(err) => {
            error!(note = %note.id, %err, "summary failed");
            placeholder("summary", &err)
        }
    }
}

/// Turn a captured recording into a voice note. A failed transcription
/// still yields a note; its body carries the placeholder.
pub async fn note_from_audio(client: &ApiClient, audio: Vec<u8>, mime: &str) -> Note {
    let body = match client.transcribe(audio, mime).await {
        Ok(transcript) => {
            info!(chars = transcript.chars().count(), "transcription complete");
            transcript
        }
        Err(err) => {
            error!(%err, "transcription failed");
            placeholder("transcription", &err)
        }
    };
    Note::new(NoteKind::Voice, body)
}

/// Voice note from a base64 recording as delivered over the app bridge.
pub async fn note_from_audio_base64(client: &ApiClient, encoded: &str, mime: &str) -> Note {
    match audio_core::from_base64(encoded) {
        Ok(audio) => note_from_audio(client, audio, mime).await,
        Err(err) => {
            error!(%err, "recording payload was not valid base64");
            Note::new(NoteKind::Voice, placeholder("transcription", &err))
        }
    }
}

/// Voice note from bare samples: wrapped into a WAV container first,
/// then transcribed like any other recording.
pub async fn note_from_samples(client: &ApiClient, samples: &[f32], sample_rate: u32) -> Note {
    let wav = audio_core::encode_wav(samples, sample_rate);
    note_from_audio(client, wav, "audio/wav").await
}

/// Turn a photo into a note holding its readable text.
pub async fn note_from_photo(client: &ApiClient, image: Vec<u8>, mime: &str) -> Note {
    let body = match client.extract_text(&image, mime).await {
        Ok(text) => {
            info!(chars = text.chars().count(), "text extraction complete");
            text
        }
        Err(err) => {
            error!(%err, "text extraction failed");
            placeholder("text extraction", &err)
        }
    };
    Note::new(NoteKind::Photo, body)
}

/// Import pasted or shared document text as a note. Purely local.
pub fn note_from_document(text: &str) -> Note {
    Note::new(NoteKind::Document, text.trim())
}

/// Seed a Q&A session whose system turn carries the notes as context.
pub fn session_for(notes: &[Note]) -> ChatSession {
    let mut prompt = String::from(ASK_PROMPT);
    if !notes.is_empty() {
        prompt.push_str("\n\nNotes:");
        for note in notes {
            prompt.push_str("\n\n## ");
            prompt.push_str(&note.title);
            prompt.push('\n');
            prompt.push_str(&note.body);
        }
    }
    ChatSession::with_system(prompt)
}

/// Ask a question in an ongoing session. Both the question and the
/// answer are recorded in the transcript; a failed call records its
/// placeholder as the answer turn.
pub async fn ask(client: &ApiClient, session: &mut ChatSession, question: &str) -> String {
    session.push_user(question);
    let answer = match client.chat(session.messages()).await {
        Ok(answer) => {
            info!(session = %session.id, turns = session.len(), "answered question");
            answer
        }
        Err(err) => {
            error!(session = %session.id, %err, "question failed");
            placeholder("answer", &err)
        }
    };
    session.push_assistant(answer.clone());
    answer
}

/// Clean a note's markdown and synthesize it as speech. Unlike the text
/// operations this propagates failure; there is no field to carry a
/// placeholder.
pub async fn read_aloud(client: &ApiClient, text: &str) -> Result<SpeechAudio, ApiError> {
    client.synthesize(&clean_for_speech(text)).await
}
