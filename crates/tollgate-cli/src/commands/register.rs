//! Register command implementation.

use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;

use tollgate_core::{NewAccount, Username};

use crate::context::Context;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Login name for the new user
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,
}

pub async fn run(ctx: &Context, args: RegisterArgs) -> Result<()> {
    let username = Username::new(&args.username).context("Invalid username")?;
    let directory = ctx.directory()?;

    eprintln!("{}", "Registering...".dimmed());

    let identity = directory
        .register(NewAccount {
            username,
            password: args.password,
            name: args.name,
        })
        .await
        .context("Failed to register")?;

    output::success("Registered successfully");
    println!();
    if let Some(id) = &identity.id {
        output::field("Id", id.as_str());
    }
    output::field("Username", identity.username.as_str());
    output::field("Next", ctx.guard.login().as_str());

    Ok(())
}
