//! Note model and operations for the AI note-taking client.
//!
//! The app shell owns capture, storage and display; these modules own
//! what happens between a captured payload and a finished note. API
//! failures inside an operation become readable placeholder text in the
//! result, rendered in place like any other content.

pub mod note;
pub mod ops;
pub mod text;

pub use note::{Note, NoteKind};
