//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use studymate_core::Credentials;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Backend base URL (defaults to the last-used or built-in backend)
    #[arg(long)]
    pub api: Option<String>,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let (provider, store) = session::open_anonymous(args.api.as_deref())?;
    let credentials = Credentials::new(&args.username, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let identity = provider
        .login(credentials)
        .await
        .context("Failed to log in")?;

    // Remember the backend only once it accepted the credentials
    store
        .remember_api(provider.base())
        .context("Failed to save session")?;

    output::success("Logged in successfully");
    println!();
    output::field("User", &identity.subject);
    output::field("API", provider.base().as_str());

    Ok(())
}
