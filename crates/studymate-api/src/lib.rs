//! studymate-api - HTTP client for the studymate backend.
//!
//! All backend operations flow through a [`SessionProvider`], which owns
//! the token store, runs the pre-request expiry check, and manages the
//! login/register/logout lifecycle.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use studymate_api::SessionProvider;
//! use studymate_core::{BaseUrl, Credentials, MemoryTokenStore};
//!
//! # async fn example() -> Result<(), studymate_core::Error> {
//! let base = BaseUrl::new("https://study.example.com/api")?;
//! let provider = SessionProvider::new(base, Arc::new(MemoryTokenStore::new()));
//! provider.initialize()?;
//!
//! provider.login(Credentials::new("alice", "hunter2")).await?;
//! for doc in provider.list_documents().await? {
//!     println!("{}: {}", doc.id, doc.file);
//! }
//! # Ok(())
//! # }
//! ```

pub mod authorizer;
pub mod autosave;
pub mod client;
pub mod endpoints;
pub mod provider;

pub use authorizer::RequestAuthorizer;
pub use autosave::{NoteAutosaver, NoteSink};
pub use client::HttpClient;
pub use provider::{SessionProvider, SessionState};
