//! Document subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct DocsCommand {
    #[command(subcommand)]
    pub command: DocsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DocsSubcommand {
    /// List uploaded documents
    List(ListArgs),

    /// Upload a PDF
    Upload(UploadArgs),

    /// Delete a document
    Delete(DeleteArgs),
}

pub async fn handle(cmd: DocsCommand) -> Result<()> {
    match cmd.command {
        DocsSubcommand::List(args) => list(args).await,
        DocsSubcommand::Upload(args) => upload(args).await,
        DocsSubcommand::Delete(args) => delete(args).await,
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {}

async fn list(_args: ListArgs) -> Result<()> {
    let provider = session::open_authenticated()?;
    let documents = provider
        .list_documents()
        .await
        .context("Failed to list documents")?;

    for document in &documents {
        output::json(document)?;
    }

    Ok(())
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Path to the PDF to upload
    pub file: PathBuf,
}

async fn upload(args: UploadArgs) -> Result<()> {
    let provider = session::open_authenticated()?;

    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .context("Invalid file name")?
        .to_string();
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    eprintln!("{}", "Uploading...".dimmed());

    let uploaded = provider
        .upload_document(&filename, bytes)
        .await
        .context("Failed to upload document")?;

    output::success("Document uploaded");
    println!();
    output::field("ID", &uploaded.pdf_id.to_string());
    output::field("Filename", &uploaded.filename);
    output::field("Pages", &uploaded.pages.to_string());

    Ok(())
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Document id to delete
    pub id: u64,
}

async fn delete(args: DeleteArgs) -> Result<()> {
    let provider = session::open_authenticated()?;

    provider
        .delete_document(args.id)
        .await
        .context("Failed to delete document")?;

    output::success("Document deleted");
    Ok(())
}
