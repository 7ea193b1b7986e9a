//! Quiz subcommand implementations.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

use studymate_core::quiz::{AnswerSheet, Question, Quiz};

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct QuizCommand {
    #[command(subcommand)]
    pub command: QuizSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum QuizSubcommand {
    /// Generate a quiz and print it as JSON
    Generate(GenerateArgs),

    /// Generate a quiz, answer it interactively and submit the score
    Take(TakeArgs),
}

pub async fn handle(cmd: QuizCommand) -> Result<()> {
    match cmd.command {
        QuizSubcommand::Generate(args) => generate(args).await,
        QuizSubcommand::Take(args) => take(args).await,
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Document id
    #[arg(long)]
    pub pdf: u64,

    /// Number of questions
    #[arg(long, default_value_t = 5)]
    pub count: u32,

    /// Optional topic to focus on
    #[arg(long, default_value = "")]
    pub topic: String,
}

async fn generate(args: GenerateArgs) -> Result<()> {
    let provider = session::open_authenticated()?;

    eprintln!("{}", "Generating quiz...".dimmed());

    let quiz = provider
        .generate_quiz(args.pdf, args.count, &args.topic)
        .await
        .context("Failed to generate quiz")?;

    output::json_pretty(&quiz)?;
    Ok(())
}

#[derive(Args, Debug)]
pub struct TakeArgs {
    /// Document id
    #[arg(long)]
    pub pdf: u64,

    /// Number of questions
    #[arg(long, default_value_t = 5)]
    pub count: u32,

    /// Optional topic to focus on
    #[arg(long, default_value = "")]
    pub topic: String,
}

async fn take(args: TakeArgs) -> Result<()> {
    let provider = session::open_authenticated()?;

    eprintln!("{}", "Generating quiz...".dimmed());

    let quiz = provider
        .generate_quiz(args.pdf, args.count, &args.topic)
        .await
        .context("Failed to generate quiz")?;

    let answers = collect_answers(&quiz)?;

    let (score, reward) = provider
        .score_and_submit(&quiz, &answers)
        .await
        .context("Failed to submit quiz")?;

    println!();
    output::success(&format!("Score: {}/{}", score, quiz.len()));
    output::field("XP earned", &reward.xp_earned.to_string());
    output::field("Total XP", &reward.new_xp.to_string());
    output::field("Rank", &reward.new_rank);

    // Reveal corrections after submission, like the results screen
    for (i, question) in quiz.questions.iter().enumerate() {
        let chosen = answers.get(i).unwrap_or("-");
        if chosen != question.correct_answer {
            println!();
            println!("{} {}", format!("{}.", i + 1).dimmed(), question.question);
            println!(
                "  {} {}   {} {}",
                "your answer:".red(),
                chosen,
                "correct:".green(),
                question.correct_answer
            );
        }
    }

    Ok(())
}

fn collect_answers(quiz: &Quiz) -> Result<AnswerSheet> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut answers = AnswerSheet::new();

    for (i, question) in quiz.questions.iter().enumerate() {
        print_question(i, question);

        loop {
            print!("{} ", "answer:".dimmed());
            std::io::stdout().flush().context("Failed to flush stdout")?;

            let Some(line) = lines.next() else {
                bail!("Aborted before answering every question");
            };
            let choice = line.context("Failed to read input")?.trim().to_uppercase();

            if question.options.contains_key(&choice) {
                answers.answer(i, choice);
                break;
            }
            output::error("pick one of the listed options");
        }
    }

    Ok(answers)
}

fn print_question(index: usize, question: &Question) {
    println!();
    println!("{} {}", format!("{}.", index + 1).bold(), question.question);
    for (key, text) in &question.options {
        println!("  {} {}", format!("{key}.").cyan(), text);
    }
}
