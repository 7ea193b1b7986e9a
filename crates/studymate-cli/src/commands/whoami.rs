//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let provider = session::open_authenticated()?;
    let identity = provider.identity().context("No active session")?;

    output::field("User", &identity.subject);
    if let Some(expires) = chrono::DateTime::from_timestamp(identity.expires_at, 0) {
        output::field("Token expires", &expires.to_rfc3339());
    }
    output::field("API", provider.base().as_str());

    Ok(())
}
