//! studymate - CLI client for the studymate backend.
//!
//! This is a thin wrapper over the `studymate-api` library: one subcommand
//! per backend operation, with the session persisted between invocations.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Login(args) => commands::login::run(args).await,
        Commands::Register(args) => commands::register::run(args).await,
        Commands::Logout(args) => commands::logout::run(args).await,
        Commands::Whoami(args) => commands::whoami::run(args).await,
        Commands::Docs(cmd) => commands::docs::handle(cmd).await,
        Commands::Notes(cmd) => commands::notes::handle(cmd).await,
        Commands::Chat(cmd) => commands::chat::handle(cmd).await,
        Commands::Flashcards(cmd) => commands::flashcards::handle(cmd).await,
        Commands::Quiz(cmd) => commands::quiz::handle(cmd).await,
        Commands::Profile(args) => commands::profile::run(args).await,
        Commands::Leaderboard(args) => commands::leaderboard::run(args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
