//! Token-pair persistence seam.

use std::sync::Mutex;

use crate::Result;
use crate::tokens::TokenPair;

/// Durable storage for the session token pair.
///
/// Semantics required of every implementation:
///
/// - `save` overwrites any existing pair; last write wins, no merging.
/// - `clear` is idempotent.
/// - `read` returns `None` unless both tokens are present.
/// - Reads and writes are synchronous, so the request authorizer always
///   observes the most recently persisted pair.
pub trait TokenStore: Send + Sync {
    /// Persist both tokens, replacing any existing pair.
    fn save(&self, tokens: &TokenPair) -> Result<()>;

    /// Load the persisted pair, if a complete one exists.
    fn read(&self) -> Result<Option<TokenPair>>;

    /// Remove both tokens.
    fn clear(&self) -> Result<()>;
}

/// In-memory token store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, tokens: &TokenPair) -> Result<()> {
        *self.tokens.lock().unwrap() = Some(tokens.clone());
        Ok(())
    }

    fn read(&self) -> Result<Option<TokenPair>> {
        Ok(self.tokens.lock().unwrap().clone())
    }

    fn clear(&self) -> Result<()> {
        *self.tokens.lock().unwrap() = None;
        Ok(())
    }
}
