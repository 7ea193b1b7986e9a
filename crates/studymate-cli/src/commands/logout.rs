//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use studymate_core::TokenStore;

use crate::output;
use crate::session::storage::FileTokenStore;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs) -> Result<()> {
    // Unconditional and idempotent: logging out while logged out succeeds
    let store = FileTokenStore::open_default()?;
    store.clear().context("Failed to clear session")?;

    output::success("Logged out");
    Ok(())
}
