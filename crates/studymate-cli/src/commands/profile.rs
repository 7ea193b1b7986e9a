//! Profile command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ProfileArgs {}

pub async fn run(_args: ProfileArgs) -> Result<()> {
    let provider = session::open_authenticated()?;
    let profile = provider.profile().await.context("Failed to fetch profile")?;

    output::field("User", &profile.username);
    output::field("Rank", &profile.rank);
    output::field("Level", &profile.level.to_string());
    output::field("XP", &profile.xp.to_string());
    output::field("Weekly XP", &profile.weekly_xp.to_string());

    if !profile.achievements.is_empty() {
        println!();
        println!("{}", "Achievements".bold());
        for achievement in &profile.achievements {
            println!("  {} - {}", achievement.name, achievement.description);
        }
    }

    if !profile.quiz_history.is_empty() {
        println!();
        println!("{}", "Quiz history".bold());
        for result in &profile.quiz_history {
            println!(
                "  {}/{} (+{} XP)",
                result.score, result.total_questions, result.xp_earned
            );
        }
    }

    Ok(())
}
