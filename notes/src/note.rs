use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Where a note's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Typed,
    Voice,
    Photo,
    Document,
}

/// A captured note. Storage and sync belong to the app shell; this is
/// the shape the operations hand back.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: Uuid,
    pub kind: NoteKind,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

const TITLE_MAX_CHARS: usize = 64;

impl Note {
    pub fn new(kind: NoteKind, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            id: Uuid::new_v4(),
            kind,
            title: derive_title(&body),
            body,
            created_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Title from the first line of the body, shortened at a word break when
/// the line runs long.
fn derive_title(body: &str) -> String {
    let first_line = body.trim().lines().next().unwrap_or("").trim();
    if first_line.is_empty() {
        return "Untitled note".to_string();
    }
    if first_line.chars().count() <= TITLE_MAX_CHARS {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(TITLE_MAX_CHARS).collect();
    let kept = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}…", kept.trim_end())
}
