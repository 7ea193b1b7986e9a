//! Flashcard subcommand implementations.

use std::io::BufRead;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use studymate_core::Deck;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct FlashcardsCommand {
    #[command(subcommand)]
    pub command: FlashcardsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FlashcardsSubcommand {
    /// Generate flashcards and print them as JSON
    Generate(GenerateArgs),

    /// Generate flashcards and page through them interactively
    Study(StudyArgs),
}

pub async fn handle(cmd: FlashcardsCommand) -> Result<()> {
    match cmd.command {
        FlashcardsSubcommand::Generate(args) => generate(args).await,
        FlashcardsSubcommand::Study(args) => study(args).await,
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Document id
    #[arg(long)]
    pub pdf: u64,

    /// Number of cards to generate
    #[arg(long, default_value_t = 10)]
    pub count: u32,
}

async fn generate(args: GenerateArgs) -> Result<()> {
    let provider = session::open_authenticated()?;

    eprintln!("{}", "Generating flashcards...".dimmed());

    let cards = provider
        .generate_flashcards(args.pdf, args.count)
        .await
        .context("Failed to generate flashcards")?;

    output::json_pretty(&cards)?;
    Ok(())
}

#[derive(Args, Debug)]
pub struct StudyArgs {
    /// Document id
    #[arg(long)]
    pub pdf: u64,

    /// Number of cards to generate
    #[arg(long, default_value_t = 10)]
    pub count: u32,
}

async fn study(args: StudyArgs) -> Result<()> {
    let provider = session::open_authenticated()?;

    eprintln!("{}", "Generating flashcards...".dimmed());

    let cards = provider
        .generate_flashcards(args.pdf, args.count)
        .await
        .context("Failed to generate flashcards")?;
    let mut deck = Deck::new(cards).context("Failed to build deck")?;

    println!(
        "{}",
        "[enter/f] flip   [n] next   [p] previous   [q] quit".dimmed()
    );

    show_card(&deck);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        match line.trim() {
            "" | "f" => deck.flip(),
            "n" => {
                if !deck.next() {
                    eprintln!("{}", "(last card)".dimmed());
                }
            }
            "p" => {
                if !deck.prev() {
                    eprintln!("{}", "(first card)".dimmed());
                }
            }
            "q" => break,
            other => {
                output::error(&format!("unknown command '{other}'"));
            }
        }
        show_card(&deck);
    }

    Ok(())
}

fn show_card(deck: &Deck) {
    let card = deck.current();
    let (side, text) = if deck.is_flipped() {
        ("back", card.back.as_str())
    } else {
        ("front", card.front.as_str())
    };

    println!();
    println!(
        "{} {}",
        format!("[{}/{}]", deck.position() + 1, deck.len()).dimmed(),
        side.yellow()
    );
    println!("{}", text.bold());
}
