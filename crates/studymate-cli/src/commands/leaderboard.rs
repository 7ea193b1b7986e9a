//! Leaderboard command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::session;

#[derive(Args, Debug)]
pub struct LeaderboardArgs {}

pub async fn run(_args: LeaderboardArgs) -> Result<()> {
    let provider = session::open_authenticated()?;
    let board = provider
        .leaderboard()
        .await
        .context("Failed to fetch leaderboard")?;

    if board.is_empty() {
        eprintln!("{}", "(leaderboard is empty)".dimmed());
        return Ok(());
    }

    for (i, profile) in board.iter().enumerate() {
        println!(
            "{} {:<20} {:>6} XP  {}",
            format!("{:>2}.", i + 1).dimmed(),
            profile.username,
            profile.xp,
            profile.rank
        );
    }

    Ok(())
}
