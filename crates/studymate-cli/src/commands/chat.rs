//! Chat subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::session;

#[derive(Args, Debug)]
pub struct ChatCommand {
    #[command(subcommand)]
    pub command: ChatSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ChatSubcommand {
    /// Print the chat history for a document
    History(HistoryArgs),

    /// Send a message to the tutor
    Send(SendArgs),
}

pub async fn handle(cmd: ChatCommand) -> Result<()> {
    match cmd.command {
        ChatSubcommand::History(args) => history(args).await,
        ChatSubcommand::Send(args) => send(args).await,
    }
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Document id
    #[arg(long)]
    pub pdf: u64,
}

async fn history(args: HistoryArgs) -> Result<()> {
    let provider = session::open_authenticated()?;
    let messages = provider
        .chat_history(args.pdf)
        .await
        .context("Failed to fetch chat history")?;

    if messages.is_empty() {
        eprintln!("{}", "(no messages yet)".dimmed());
        return Ok(());
    }

    for message in &messages {
        let speaker = match message.role.as_str() {
            "user" => "you".cyan().bold(),
            _ => "tutor".green().bold(),
        };
        println!("{}: {}", speaker, message.content);
    }

    Ok(())
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Document id
    #[arg(long)]
    pub pdf: u64,

    /// The message to send
    pub message: String,
}

async fn send(args: SendArgs) -> Result<()> {
    let provider = session::open_authenticated()?;

    eprintln!("{}", "Waiting for the tutor...".dimmed());

    let reply = provider
        .send_message(args.pdf, &args.message)
        .await
        .context("Failed to send message")?;

    println!("{}: {}", "tutor".green().bold(), reply);
    Ok(())
}
