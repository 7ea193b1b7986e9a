//! Subcommand implementations.

pub mod chat;
pub mod docs;
pub mod flashcards;
pub mod leaderboard;
pub mod login;
pub mod logout;
pub mod notes;
pub mod profile;
pub mod quiz;
pub mod register;
pub mod whoami;
