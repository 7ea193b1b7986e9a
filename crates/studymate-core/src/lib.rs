//! studymate-core - Core types and session primitives for the studymate client.
//!
//! This crate holds the pieces of the client that do not touch the network:
//! token newtypes and the persistence seam for them, unverified claim
//! decoding, quiz scoring, flashcard deck paging, and the unified error
//! type shared by the HTTP layer and the CLI.

pub mod claims;
pub mod credentials;
pub mod error;
pub mod flashcards;
pub mod quiz;
pub mod store;
pub mod tokens;
pub mod types;

pub use claims::Identity;
pub use credentials::Credentials;
pub use error::Error;
pub use flashcards::{Deck, Flashcard};
pub use quiz::{AnswerSheet, Quiz};
pub use store::{MemoryTokenStore, TokenStore};
pub use tokens::{AccessToken, RefreshToken, TokenPair};
pub use types::BaseUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
