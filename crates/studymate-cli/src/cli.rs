//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{
    chat, docs, flashcards, leaderboard, login, logout, notes, profile, quiz, register, whoami,
};

/// Study-assistant CLI: documents, quizzes, flashcards, notes and progress.
#[derive(Parser, Debug)]
#[command(name = "studymate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and persist the session
    Login(login::LoginArgs),

    /// Create an account, then log in with it
    Register(register::RegisterArgs),

    /// Clear the persisted session
    Logout(logout::LogoutArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),

    /// Document operations (list, upload, delete)
    Docs(docs::DocsCommand),

    /// Per-document notes (show, save, edit with auto-save)
    Notes(notes::NotesCommand),

    /// Chat with the tutor about a document
    Chat(chat::ChatCommand),

    /// Generate and study flashcards
    Flashcards(flashcards::FlashcardsCommand),

    /// Generate, take and submit quizzes
    Quiz(quiz::QuizCommand),

    /// Show your progress profile
    Profile(profile::ProfileArgs),

    /// Show the XP leaderboard
    Leaderboard(leaderboard::LeaderboardArgs),
}
