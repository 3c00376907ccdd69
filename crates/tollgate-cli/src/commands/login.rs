//! Login command implementation.

use anyhow::{Context as _, Result, bail};
use clap::Args;
use colored::Colorize;

use tollgate_core::{Credentials, LoginOutcome};

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Login name
    #[arg(short, long)]
    pub username: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,
}

pub async fn run(ctx: &Context, args: LoginArgs) -> Result<()> {
    let credentials = Credentials::new(args.username, args.password);
    let flow = ctx.login_flow()?;

    eprintln!("{}", "Logging in...".dimmed());

    let identity = match flow.login(&credentials).await.context("Failed to login")? {
        LoginOutcome::Authenticated(identity) => identity,
        LoginOutcome::Rejected => bail!("Invalid credentials"),
    };

    output::success("Logged in successfully");
    println!();
    if let Some(id) = &identity.id {
        output::field("Id", id.as_str());
    }
    output::field("Username", identity.username.as_str());
    output::field("Name", identity.display_name());
    output::field(
        "Token",
        if identity.bearer_token().is_some() { "present" } else { "none" },
    );
    output::redirect(ctx.guard.landing().as_str());

    Ok(())
}
