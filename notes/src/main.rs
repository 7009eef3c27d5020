use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use ai_core::media::mime_for_extension;
use ai_core::ApiClient;
use notes::{ops, Note};

#[derive(Parser)]
#[command(name = "notes", version, about = "AI note-taking companion")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a note file
    Summarize {
        file: PathBuf,
    },
    /// Transcribe a recording into a voice note
    Transcribe {
        file: PathBuf,
        /// MIME type of the recording; guessed from the extension when omitted
        #[arg(long)]
        mime: Option<String>,
    },
    /// Extract the readable text from a photo into a note
    Ocr {
        file: PathBuf,
        /// MIME type of the image; guessed from the extension when omitted
        #[arg(long)]
        mime: Option<String>,
    },
    /// Read a note file aloud into an audio file
    Speak {
        file: PathBuf,
        /// Where to write the stitched audio
        #[arg(short, long, default_value = "note.mp3")]
        out: PathBuf,
    },
    /// Ask a question over one or more note files
    Ask {
        question: String,
        /// Note files to answer from; repeatable
        #[arg(long = "note")]
        notes: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    let client = ApiClient::from_env();

    match cli.command {
        Command::Summarize { file } => {
            let note = note_from_file(&file)?;
            println!("{}", ops::summarize(&client, &note).await);
        }
        Command::Transcribe { file, mime } => {
            let audio = read_binary(&file)?;
            let mime = resolve_mime(&file, mime, "audio/webm");
            let note = ops::note_from_audio(&client, audio, &mime).await;
            print_note(&note);
        }
        Command::Ocr { file, mime } => {
            let image = read_binary(&file)?;
            let mime = resolve_mime(&file, mime, "image/jpeg");
            let note = ops::note_from_photo(&client, image, &mime).await;
            print_note(&note);
        }
        Command::Speak { file, out } => {
            let text = read_text(&file)?;
            let audio = ops::read_aloud(&client, &text).await?;
            if audio.is_empty() {
                println!("Nothing to read in {}", file.display());
            } else {
                std::fs::write(&out, &audio.data)
                    .with_context(|| format!("writing {}", out.display()))?;
                info!(bytes = audio.data.len(), format = audio.format, "audio written");
                println!("Wrote {} ({} bytes)", out.display(), audio.data.len());
            }
        }
        Command::Ask { question, notes } => {
            let notes = notes
                .iter()
                .map(|path| note_from_file(path))
                .collect::<Result<Vec<Note>>>()?;
            let mut session = ops::session_for(&notes);
            println!("{}", ops::ask(&client, &mut session, &question).await);
        }
    }

    Ok(())
}

fn note_from_file(path: &Path) -> Result<Note> {
    let text = read_text(path)?;
    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("note")
        .to_string();
    Ok(ops::note_from_document(&text).with_title(title))
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn read_binary(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn resolve_mime(path: &Path, explicit: Option<String>, fallback: &str) -> String {
    explicit.unwrap_or_else(|| {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(mime_for_extension)
            .unwrap_or(fallback)
            .to_string()
    })
}

fn print_note(note: &Note) {
    println!("{}\n", note.title);
    println!("{}", note.body);
}
