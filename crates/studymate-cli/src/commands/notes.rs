//! Notes subcommand implementations.
//!
//! `notes edit` watches a local file and pushes changes through the
//! auto-saver on the configured interval, mirroring how the notes panel
//! saves in the background while the user types.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use studymate_api::{NoteAutosaver, NoteSink};

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct NotesCommand {
    #[command(subcommand)]
    pub command: NotesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NotesSubcommand {
    /// Print the note for a document
    Show(ShowArgs),

    /// Replace the note for a document
    Save(SaveArgs),

    /// Edit a local file with periodic auto-save
    Edit(EditArgs),
}

pub async fn handle(cmd: NotesCommand) -> Result<()> {
    match cmd.command {
        NotesSubcommand::Show(args) => show(args).await,
        NotesSubcommand::Save(args) => save(args).await,
        NotesSubcommand::Edit(args) => edit(args).await,
    }
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Document id
    #[arg(long)]
    pub pdf: u64,
}

async fn show(args: ShowArgs) -> Result<()> {
    let provider = session::open_authenticated()?;
    let note = provider.note(args.pdf).await.context("Failed to fetch note")?;

    if note.content.is_empty() {
        eprintln!("{}", "(no note yet)".dimmed());
    } else {
        println!("{}", note.content);
    }

    Ok(())
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Document id
    #[arg(long)]
    pub pdf: u64,

    /// File with the new note content (reads stdin when omitted)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

async fn save(args: SaveArgs) -> Result<()> {
    let provider = session::open_authenticated()?;

    let content = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let saved = provider
        .save_note(args.pdf, &content)
        .await
        .context("Failed to save note")?;

    output::success("Note saved");
    if let Some(updated_at) = saved.updated_at {
        output::field("Updated", &updated_at);
    }

    Ok(())
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Document id
    #[arg(long)]
    pub pdf: u64,

    /// Local file to watch and auto-save
    pub file: PathBuf,

    /// Auto-save interval in seconds
    #[arg(long, default_value_t = 30)]
    pub interval: u64,
}

async fn edit(args: EditArgs) -> Result<()> {
    let provider = session::open_authenticated()?;

    // Seed the local file from the server if it doesn't exist yet
    if !args.file.exists() {
        let note = provider.note(args.pdf).await.context("Failed to fetch note")?;
        std::fs::write(&args.file, &note.content)
            .with_context(|| format!("Failed to create {}", args.file.display()))?;
    }

    let saver = NoteAutosaver::spawn(
        Arc::new(provider.clone()) as Arc<dyn NoteSink>,
        args.pdf,
        Duration::from_secs(args.interval),
    );

    eprintln!(
        "{}",
        format!(
            "Watching {} (auto-save every {}s). Press Ctrl-C to save and exit.",
            args.file.display(),
            args.interval
        )
        .dimmed()
    );

    let mut last = std::fs::read_to_string(&args.file).unwrap_or_default();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(Duration::from_secs(1)) => {
                if let Ok(content) = std::fs::read_to_string(&args.file)
                    && content != last
                {
                    last = content.clone();
                    saver.stage(content);
                }
            }
        }
    }

    saver.flush().await.context("Failed to save note")?;
    saver.stop();

    println!();
    output::success("Note saved");
    Ok(())
}
