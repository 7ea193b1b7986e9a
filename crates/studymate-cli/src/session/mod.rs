//! CLI session wiring.

pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result, bail};

use studymate_api::SessionProvider;
use studymate_core::{BaseUrl, TokenStore};

use storage::FileTokenStore;

/// Default backend when none is configured.
pub const DEFAULT_API: &str = "https://api.studymate.app/api";

/// Environment override for the backend base URL.
pub const API_ENV: &str = "STUDYMATE_API";

/// Resolve the backend base URL: flag, then environment, then the URL
/// remembered at last login, then the default.
pub fn resolve_api(flag: Option<&str>, store: &FileTokenStore) -> Result<BaseUrl> {
    let url = match flag {
        Some(url) => url.to_string(),
        None => match std::env::var(API_ENV) {
            Ok(url) if !url.is_empty() => url,
            _ => match store.stored_api().context("Failed to read session file")? {
                Some(url) => url,
                None => DEFAULT_API.to_string(),
            },
        },
    };

    BaseUrl::new(&url).context("Invalid backend base URL")
}

/// Build an initialized provider without requiring a logged-in session.
pub fn open_anonymous(api_flag: Option<&str>) -> Result<(SessionProvider, Arc<FileTokenStore>)> {
    let store = Arc::new(FileTokenStore::open_default()?);
    let base = resolve_api(api_flag, &store)?;
    tracing::debug!(%base, "using backend");

    let provider = SessionProvider::new(base, Arc::clone(&store) as Arc<dyn TokenStore>);
    provider
        .initialize()
        .context("Failed to initialize session")?;

    Ok((provider, store))
}

/// Build a provider for a protected command; errors when logged out.
pub fn open_authenticated() -> Result<SessionProvider> {
    let (provider, _store) = open_anonymous(None)?;

    if !provider.is_authenticated() {
        bail!("Not logged in. Run 'studymate login' first.");
    }

    Ok(provider)
}
