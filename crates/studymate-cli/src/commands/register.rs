//! Register command implementation.
//!
//! Registration does not itself establish a session; on success the
//! provider immediately logs in with the same credentials.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Email address for the new account
    #[arg(long)]
    pub email: String,

    /// Password for the new account
    #[arg(long)]
    pub password: String,

    /// Backend base URL (defaults to the last-used or built-in backend)
    #[arg(long)]
    pub api: Option<String>,
}

pub async fn run(args: RegisterArgs) -> Result<()> {
    let (provider, store) = session::open_anonymous(args.api.as_deref())?;

    eprintln!("{}", "Creating account...".dimmed());

    let identity = provider
        .register(&args.username, &args.email, &args.password)
        .await
        .context("Failed to register")?;

    store
        .remember_api(provider.base())
        .context("Failed to save session")?;

    output::success("Account created and logged in");
    println!();
    output::field("User", &identity.subject);
    output::field("API", provider.base().as_str());

    Ok(())
}
